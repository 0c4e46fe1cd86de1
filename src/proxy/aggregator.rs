//! Result aggregation
//!
//! Merges probe results from every source of one protocol class into the
//! final proxy set: only reachable entries with a measured ping survive,
//! one record per unique address.

use crate::proxy::models::{ProbeResult, ProxyRecord};
use std::collections::HashSet;
use tracing::debug;

pub struct Aggregator;

impl Aggregator {
    /// Deduplicate by address, first occurrence wins, discovery order kept.
    /// Which duplicate wins carries no contract; the same address probed
    /// from two sources differs only in measurement noise.
    pub fn merge(results: Vec<ProbeResult>) -> Vec<ProxyRecord> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for result in results {
            if !result.reachable {
                continue;
            }
            let Some(latency_ms) = result.latency_ms else {
                continue;
            };
            if seen.insert(result.candidate.address.clone()) {
                records.push(ProxyRecord::new(result.candidate.address, latency_ms));
            } else {
                debug!("duplicate proxy {} dropped", result.candidate.address);
            }
        }
        records
    }
}
