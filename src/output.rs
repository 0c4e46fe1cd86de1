//! Output sink
//!
//! Writes the per-class flat files and the rendered report. An empty result
//! set still produces an empty file, so downstream consumers always find
//! the file they expect.

use crate::error::ProwlerError;
use crate::proxy::models::{ProtocolClass, ProxyRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding the output directory.
pub const OUTPUT_DIR_ENV: &str = "PROXY_OUTPUT_DIR";

/// Resolve the output directory: explicit override, then the environment
/// variable, then the working directory.
pub fn resolve_output_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    std::env::var_os(OUTPUT_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Writes harvest results under one directory.
pub struct OutputSink {
    dir: PathBuf,
}

impl OutputSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `{CLASS}.txt`: one address per line, newline-terminated, UTF-8,
    /// no header. Empty record set, empty file.
    pub fn save_class(
        &self,
        class: ProtocolClass,
        records: &[ProxyRecord],
    ) -> Result<PathBuf, ProwlerError> {
        let path = self.dir.join(format!("{class}.txt"));
        let mut content = String::new();
        for record in records {
            content.push_str(&record.address);
            content.push('\n');
        }
        fs::write(&path, content).map_err(|source| ProwlerError::Write {
            path: path.clone(),
            source,
        })?;
        info!(
            "saved {} unique {class} proxies to {}",
            records.len(),
            path.display()
        );
        Ok(path)
    }

    /// Write the rendered status report as `README.md`.
    pub fn save_report(&self, content: &str) -> Result<PathBuf, ProwlerError> {
        let path = self.dir.join("README.md");
        fs::write(&path, content).map_err(|source| ProwlerError::Write {
            path: path.clone(),
            source,
        })?;
        info!("updated report at {}", path.display());
        Ok(path)
    }
}
