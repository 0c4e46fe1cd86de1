//! Harvest configuration
//!
//! All tunables live in one explicit structure passed into the pipeline;
//! there is no module-level mutable state. The default value carries the
//! fixed source URL table.

use crate::proxy::models::ProtocolClass;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Timeout for one source download in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Timeout for one TCP connect probe in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 3;

/// Timed connect attempts per reachable candidate.
pub const DEFAULT_PING_ATTEMPTS: u32 = 1;

/// Pause after each timed connect attempt in milliseconds.
pub const DEFAULT_ATTEMPT_DELAY_MS: u64 = 200;

/// Pause after processing each probe result in milliseconds.
pub const DEFAULT_RESULT_DELAY_MS: u64 = 100;

/// Concurrent probe workers per source pool.
pub const DEFAULT_CONCURRENCY: usize = 30;

/// Raw entries examined per source before probing.
pub const DEFAULT_MAX_CANDIDATES: usize = 50;

/// Configuration for one harvester run.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Source URLs per protocol class, in download order.
    pub sources: HashMap<ProtocolClass, Vec<String>>,
    /// Timeout for one source download.
    pub fetch_timeout: Duration,
    /// Timeout for one TCP connect probe.
    pub probe_timeout: Duration,
    /// Timed connect attempts per reachable candidate.
    pub ping_attempts: u32,
    /// Pause between timed connect attempts.
    pub attempt_delay: Duration,
    /// Pause after processing each probe result.
    pub result_delay: Duration,
    /// Concurrent probe workers per source pool.
    pub concurrency: usize,
    /// Raw entries examined per source.
    pub max_candidates: usize,
    /// Output directory override; the `PROXY_OUTPUT_DIR` environment
    /// variable and then the working directory apply when unset.
    pub output_dir: Option<PathBuf>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            ping_attempts: DEFAULT_PING_ATTEMPTS,
            attempt_delay: Duration::from_millis(DEFAULT_ATTEMPT_DELAY_MS),
            result_delay: Duration::from_millis(DEFAULT_RESULT_DELAY_MS),
            concurrency: DEFAULT_CONCURRENCY,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            output_dir: None,
        }
    }
}

impl HarvestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole source table.
    pub fn with_sources(mut self, sources: HashMap<ProtocolClass, Vec<String>>) -> Self {
        self.sources = sources;
        self
    }

    /// Replace the source list for one protocol class.
    pub fn with_class_sources(mut self, class: ProtocolClass, urls: Vec<String>) -> Self {
        self.sources.insert(class, urls);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_ping_attempts(mut self, attempts: u32) -> Self {
        self.ping_attempts = attempts;
        self
    }

    pub fn with_attempt_delay(mut self, delay: Duration) -> Self {
        self.attempt_delay = delay;
        self
    }

    pub fn with_result_delay(mut self, delay: Duration) -> Self {
        self.result_delay = delay;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Source URLs configured for one class, empty when none are.
    pub fn sources_for(&self, class: ProtocolClass) -> &[String] {
        self.sources.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// The fixed table of public proxy list sources.
fn default_sources() -> HashMap<ProtocolClass, Vec<String>> {
    let socks5 = vec![
        "https://raw.githubusercontent.com/roosterkid/openproxylist/main/SOCKS5_RAW.txt",
        "https://raw.githubusercontent.com/officialputuid/KangProxy/KangProxy/socks5/socks5.txt",
        "https://cdn.jsdelivr.net/gh/proxifly/free-proxy-list@main/proxies/protocols/socks5/data.txt",
        "https://raw.githubusercontent.com/hookzof/socks5_list/master/tg/socks.json",
        "https://raw.githubusercontent.com/TheSpeedX/SOCKS-List/master/socks5.txt",
        "https://raw.githubusercontent.com/jetkai/proxy-list/main/online-proxies/txt/proxies-socks5.txt",
        "https://api.proxyscrape.com/v3/free-proxy-list/get?request=displayproxies&proxytype=socks5",
    ];
    let socks4 = vec![
        "https://raw.githubusercontent.com/roosterkid/openproxylist/main/SOCKS4_RAW.txt",
        "https://raw.githubusercontent.com/officialputuid/KangProxy/KangProxy/socks4/socks4.txt",
        "https://cdn.jsdelivr.net/gh/proxifly/free-proxy-list@main/proxies/protocols/socks4/data.txt",
        "https://raw.githubusercontent.com/TheSpeedX/SOCKS-List/master/socks4.txt",
    ];
    let https = vec![
        "https://raw.githubusercontent.com/roosterkid/openproxylist/main/HTTPS_RAW.txt",
        "https://raw.githubusercontent.com/officialputuid/KangProxy/KangProxy/https/https.txt",
        "https://cdn.jsdelivr.net/gh/proxifly/free-proxy-list@main/proxies/protocols/http/data.txt",
    ];

    let mut sources = HashMap::new();
    sources.insert(
        ProtocolClass::Socks5,
        socks5.into_iter().map(String::from).collect(),
    );
    sources.insert(
        ProtocolClass::Socks4,
        socks4.into_iter().map(String::from).collect(),
    );
    sources.insert(
        ProtocolClass::Https,
        https.into_iter().map(String::from).collect(),
    );
    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HarvestConfig::default();
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.probe_timeout, Duration::from_secs(3));
        assert_eq!(config.ping_attempts, 1);
        assert_eq!(config.concurrency, 30);
        assert_eq!(config.max_candidates, 50);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_default_source_table() {
        let config = HarvestConfig::default();
        assert_eq!(config.sources_for(ProtocolClass::Socks5).len(), 7);
        assert_eq!(config.sources_for(ProtocolClass::Socks4).len(), 4);
        assert_eq!(config.sources_for(ProtocolClass::Https).len(), 3);
    }

    #[test]
    fn test_config_builder() {
        let config = HarvestConfig::new()
            .with_fetch_timeout(Duration::from_secs(5))
            .with_probe_timeout(Duration::from_secs(1))
            .with_ping_attempts(3)
            .with_concurrency(10)
            .with_max_candidates(20)
            .with_output_dir("/tmp/proxies");

        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.probe_timeout, Duration::from_secs(1));
        assert_eq!(config.ping_attempts, 3);
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.max_candidates, 20);
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/proxies")));
    }

    #[test]
    fn test_with_class_sources_replaces_list() {
        let config = HarvestConfig::new()
            .with_class_sources(ProtocolClass::Https, vec!["http://localhost:1/a".to_string()]);
        assert_eq!(config.sources_for(ProtocolClass::Https).len(), 1);
        // Other classes keep their defaults.
        assert_eq!(config.sources_for(ProtocolClass::Socks5).len(), 7);
    }

    #[test]
    fn test_sources_for_unconfigured_class() {
        let config = HarvestConfig::new().with_sources(HashMap::new());
        assert!(config.sources_for(ProtocolClass::Socks5).is_empty());
    }
}
