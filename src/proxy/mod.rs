//! Proxy harvesting modules
//!
//! This module provides functionality for:
//! - Fetching raw proxy lists from text and JSON sources
//! - Parsing and validating `ip:port` candidates
//! - Probing candidates for liveness and connect latency over raw TCP
//! - Aggregating per-class results into deduplicated proxy sets

pub mod aggregator;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod prober;

pub use aggregator::Aggregator;
pub use fetcher::{SourceBody, SourceFetcher};
pub use models::{Candidate, ProbeResult, ProtocolClass, ProtocolResultSet, ProxyRecord};
pub use parser::CandidateParser;
pub use pipeline::HarvestPipeline;
pub use prober::{LivenessProber, ProberConfig};
