//! Proxy Prowler - Proxy List Harvester
//!
//! Downloads candidate proxy lists for SOCKS5, SOCKS4 and HTTPS from public
//! sources, probes each candidate with a raw TCP connect to classify it
//! online or offline and measure connect latency, deduplicates, and writes
//! one flat list per protocol class plus a status report.

pub mod config;
pub mod error;
pub mod output;
pub mod proxy;
pub mod report;

pub use config::HarvestConfig;
pub use error::ProwlerError;
pub use proxy::*;

/// Application result type
pub type Result<T> = anyhow::Result<T>;
