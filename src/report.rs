//! Status report rendering
//!
//! Builds the human-readable README: per-class counts plus a bounded random
//! sample of the accepted proxies. Presentation only; the flat files are
//! the canonical output.

use crate::proxy::models::{ProtocolClass, ProtocolResultSet, ProxyRecord};
use chrono::Utc;
use rand::seq::SliceRandom;

/// Rows sampled per protocol class table.
pub const SAMPLE_ROWS: usize = 5;

/// Render the full report document.
pub fn render(result_set: &ProtocolResultSet) -> String {
    let updated = Utc::now().format("%H:%M %d-%m-%Y UTC");
    let mut tables = String::new();

    // Only classes present in the result set were processed this run; a
    // single-class run must not render placeholder tables for the others.
    for class in ProtocolClass::ALL {
        let Some(records) = result_set.get(&class) else {
            continue;
        };
        tables.push_str(&render_class_table(class, records));
    }

    format!(
        "# 📊 ProxyProwler (last update: {updated})\n\
         \n\
         Harvested SOCKS5, SOCKS4 and HTTPS proxy lists, probed over raw TCP.\n\
         Full lists live in `SOCKS5.txt`, `SOCKS4.txt` and `HTTPS.txt` next to\n\
         this file; the tables below show a random sample of the active entries.\n\
         {tables}\n\
         > **Note**: download the per-class files for the complete, current lists.\n"
    )
}

fn render_class_table(class: ProtocolClass, records: &[ProxyRecord]) -> String {
    let mut table = format!(
        "\n### 🔗 {class} Proxies ({} active)\n\
         | # | Server | Port | Ping | Status |\n\
         |---|--------|------|------|--------|\n",
        records.len()
    );

    let sample = records.choose_multiple(&mut rand::thread_rng(), SAMPLE_ROWS);
    let mut rows = 0;
    for (i, record) in sample.enumerate() {
        let (server, port) = record
            .address
            .split_once(':')
            .unwrap_or((record.address.as_str(), "-"));
        table.push_str(&format!(
            "| {} | `{server}` | `{port}` | {:.2}ms | ✅ online |\n",
            i + 1,
            record.latency_ms
        ));
        rows += 1;
    }
    if rows == 0 {
        table.push_str("| - | - | - | - | no active proxies found |\n");
    }
    table
}
