//! Proxy data models

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Protocol class a proxy list is tracked under.
///
/// This is a partition key for sources and output files, not a protocol
/// distinction enforced by the prober, which only does TCP connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ProtocolClass {
    Socks5,
    Socks4,
    Https,
}

impl ProtocolClass {
    pub const ALL: [ProtocolClass; 3] = [
        ProtocolClass::Socks5,
        ProtocolClass::Socks4,
        ProtocolClass::Https,
    ];

    /// Upper-case name, also the output file stem (`SOCKS5.txt` etc.).
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolClass::Socks5 => "SOCKS5",
            ProtocolClass::Socks4 => "SOCKS4",
            ProtocolClass::Https => "HTTPS",
        }
    }
}

impl fmt::Display for ProtocolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An `ip:port` token extracted from a source.
///
/// Only the parser constructs these, so the address is guaranteed to match
/// the literal IPv4:port pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub address: String,
    pub class: ProtocolClass,
}

impl Candidate {
    pub fn new(address: impl Into<String>, class: ProtocolClass) -> Self {
        Self {
            address: address.into(),
            class,
        }
    }

    pub fn host(&self) -> &str {
        self.address.split(':').next().unwrap_or(&self.address)
    }

    pub fn port(&self) -> &str {
        self.address.rsplit(':').next().unwrap_or("")
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// Outcome of probing one candidate.
///
/// `latency_ms` is present exactly when the candidate was reachable and at
/// least one timed connect attempt succeeded.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub candidate: Candidate,
    pub reachable: bool,
    pub latency_ms: Option<f64>,
}

impl ProbeResult {
    pub fn online(candidate: Candidate, latency_ms: f64) -> Self {
        Self {
            candidate,
            reachable: true,
            latency_ms: Some(latency_ms),
        }
    }

    /// Passed the status check but failed every timed connect attempt.
    pub fn without_ping(candidate: Candidate) -> Self {
        Self {
            candidate,
            reachable: true,
            latency_ms: None,
        }
    }

    pub fn offline(candidate: Candidate) -> Self {
        Self {
            candidate,
            reachable: false,
            latency_ms: None,
        }
    }

    /// Whether this result survives into the final proxy set.
    pub fn is_accepted(&self) -> bool {
        self.reachable && self.latency_ms.is_some()
    }
}

/// Accepted proxy entry with its measured connect latency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyRecord {
    pub address: String,
    pub latency_ms: f64,
}

impl ProxyRecord {
    pub fn new(address: impl Into<String>, latency_ms: f64) -> Self {
        Self {
            address: address.into(),
            latency_ms,
        }
    }
}

/// Per-class proxy sets produced by one run.
pub type ProtocolResultSet = HashMap<ProtocolClass, Vec<ProxyRecord>>;
