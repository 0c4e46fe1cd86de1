//! Liveness probing
//!
//! Classifies candidates as online/offline with a raw TCP connect and
//! measures connect latency for the online ones. Reachability and latency
//! are two independent connect phases with no shared state: a candidate can
//! pass the first and fail every attempt of the second, in which case it is
//! dropped from the result set. That inconsistency is deliberate, kept from
//! the observed behavior of the upstream sources' consumers.

use crate::error::ProwlerError;
use crate::proxy::models::{Candidate, ProbeResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Semaphore};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Configuration for the liveness prober.
#[derive(Debug, Clone)]
pub struct ProberConfig {
    /// Timeout for each TCP connect.
    pub connect_timeout: Duration,
    /// Timed connect attempts per reachable candidate.
    pub ping_attempts: u32,
    /// Pause after each timed connect attempt.
    pub attempt_delay: Duration,
    /// Pause after processing each collected result.
    pub result_delay: Duration,
    /// Concurrent probe workers.
    pub concurrency: usize,
}

impl Default for ProberConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(crate::config::DEFAULT_PROBE_TIMEOUT_SECS),
            ping_attempts: crate::config::DEFAULT_PING_ATTEMPTS,
            attempt_delay: Duration::from_millis(crate::config::DEFAULT_ATTEMPT_DELAY_MS),
            result_delay: Duration::from_millis(crate::config::DEFAULT_RESULT_DELAY_MS),
            concurrency: crate::config::DEFAULT_CONCURRENCY,
        }
    }
}

/// Probes candidate proxies for reachability and connect latency.
#[derive(Debug, Clone)]
pub struct LivenessProber {
    config: ProberConfig,
}

impl LivenessProber {
    pub fn new() -> Self {
        Self::with_config(ProberConfig::default())
    }

    pub fn with_config(config: ProberConfig) -> Self {
        Self { config }
    }

    /// One TCP connect under the timeout. The socket is dropped as soon as
    /// the outcome is known; nothing is sent or received.
    pub async fn check_status(&self, address: &str) -> bool {
        match timeout(self.config.connect_timeout, TcpStream::connect(address)).await {
            Ok(Ok(_stream)) => {
                info!("proxy {address} is online");
                true
            }
            Ok(Err(source)) => {
                debug!(
                    "{}",
                    ProwlerError::Probe {
                        address: address.to_string(),
                        source,
                    }
                );
                warn!("proxy {address} is offline or unreachable");
                false
            }
            Err(_) => {
                warn!("proxy {address} is offline or unreachable: connect timed out");
                false
            }
        }
    }

    /// Average connect latency in milliseconds over the configured attempts.
    ///
    /// Each attempt opens a fresh connection and times wall-clock duration
    /// from connect start to connect success. Failed attempts do not count;
    /// `None` when every attempt failed.
    pub async fn measure_ping(&self, address: &str) -> Option<f64> {
        let mut total_ms = 0.0;
        let mut successes = 0u32;

        for _ in 0..self.config.ping_attempts {
            let start = Instant::now();
            match timeout(self.config.connect_timeout, TcpStream::connect(address)).await {
                Ok(Ok(_stream)) => {
                    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
                    debug!("ping for {address}: {elapsed:.2}ms");
                    total_ms += elapsed;
                    successes += 1;
                }
                Ok(Err(e)) => debug!("ping error for {address}: {e}"),
                Err(_) => warn!("ping failed for {address}"),
            }
            tokio::time::sleep(self.config.attempt_delay).await;
        }

        if successes > 0 {
            let average = total_ms / f64::from(successes);
            info!("average ping for {address}: {average:.2}ms");
            Some(average)
        } else {
            None
        }
    }

    /// Status check, then latency measurement for candidates found online.
    pub async fn probe_one(&self, candidate: Candidate) -> ProbeResult {
        if !self.check_status(&candidate.address).await {
            return ProbeResult::offline(candidate);
        }
        match self.measure_ping(&candidate.address).await {
            Some(ping) => ProbeResult::online(candidate, ping),
            None => {
                warn!("skipping proxy {} due to ping failure", candidate.address);
                ProbeResult::without_ping(candidate)
            }
        }
    }

    /// Probe a whole candidate pool under the bounded worker budget.
    ///
    /// Every candidate is dispatched as its own task gated by a semaphore;
    /// each task publishes exactly one result to the collector channel, and
    /// this method returns only after all `candidates.len()` results have
    /// arrived. No streaming: callers see the complete pool or nothing.
    pub async fn probe_all(&self, candidates: Vec<Candidate>) -> Vec<ProbeResult> {
        let expected = candidates.len();
        if expected == 0 {
            return Vec::new();
        }

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let (tx, mut rx) = mpsc::channel::<ProbeResult>(expected);

        for candidate in candidates {
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();
            let prober = self.clone();
            tokio::spawn(async move {
                // Acquire only fails if the semaphore is closed, which cannot
                // happen while this task holds a clone of the Arc.
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                let result = prober.probe_one(candidate).await;
                let _ = tx.send(result).await;
            });
        }
        drop(tx);

        let mut results = Vec::with_capacity(expected);
        while let Some(result) = rx.recv().await {
            results.push(result);
            tokio::time::sleep(self.config.result_delay).await;
            if results.len() == expected {
                break;
            }
        }
        results
    }
}

impl Default for LivenessProber {
    fn default() -> Self {
        Self::new()
    }
}
