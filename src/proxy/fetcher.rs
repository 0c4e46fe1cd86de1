//! Source fetching
//!
//! Downloads one raw candidate list per call and tags the body by its
//! declared content type, so the parser dispatches on the tag instead of
//! re-inspecting a header string.

use crate::error::ProwlerError;
use rand::seq::SliceRandom;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// User agents rotated across source requests.
const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4515.107 Safari/537.36",
];

fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Raw source body, tagged once by the declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceBody {
    Text(String),
    Json(String),
}

/// Downloads raw candidate lists over HTTP.
pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    /// Build a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// GET a source URL and return its tagged body.
    ///
    /// Non-2xx status, timeout, and DNS failure all surface as
    /// [`ProwlerError::Fetch`]; the caller skips the source and continues.
    pub async fn fetch(&self, url: &str) -> Result<SourceBody, ProwlerError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, random_user_agent())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| ProwlerError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);

        let body = response
            .text()
            .await
            .map_err(|source| ProwlerError::Fetch {
                url: url.to_string(),
                source,
            })?;

        debug!(url, json = is_json, bytes = body.len(), "fetched source");
        Ok(if is_json {
            SourceBody::Json(body)
        } else {
            SourceBody::Text(body)
        })
    }
}
