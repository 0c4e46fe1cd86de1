//! Error types for harvest operations
//!
//! Every failure here is contained at the smallest scope (one source, one
//! candidate, one file) by the pipeline and converted into a
//! degraded-but-complete result; none of these abort a run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProwlerError {
    /// Source download failed: non-2xx status, timeout, or DNS failure.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A source declared JSON but the body did not decode to an array.
    #[error("invalid JSON body from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// TCP connect to a candidate failed.
    #[error("probe error for {address}: {source}")]
    Probe {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be written.
    #[error("error writing to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
