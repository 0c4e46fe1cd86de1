//! Harvest pipeline
//!
//! One run: for each protocol class, every configured source is fetched and
//! parsed, its candidate pool probed under the bounded worker budget, and
//! the merged result written out. Failures stay contained to their source,
//! candidate, or file; the run itself always completes.

use crate::config::HarvestConfig;
use crate::error::ProwlerError;
use crate::output::{resolve_output_dir, OutputSink};
use crate::proxy::aggregator::Aggregator;
use crate::proxy::fetcher::SourceFetcher;
use crate::proxy::models::{ProbeResult, ProtocolClass, ProtocolResultSet, ProxyRecord};
use crate::proxy::parser::CandidateParser;
use crate::proxy::prober::{LivenessProber, ProberConfig};
use crate::report;
use tracing::{error, info};

pub struct HarvestPipeline {
    config: HarvestConfig,
    fetcher: SourceFetcher,
    prober: LivenessProber,
}

impl HarvestPipeline {
    pub fn new(config: HarvestConfig) -> crate::Result<Self> {
        let fetcher = SourceFetcher::new(config.fetch_timeout)?;
        let prober = LivenessProber::with_config(ProberConfig {
            connect_timeout: config.probe_timeout,
            ping_attempts: config.ping_attempts,
            attempt_delay: config.attempt_delay,
            result_delay: config.result_delay,
            concurrency: config.concurrency,
        });
        Ok(Self {
            config,
            fetcher,
            prober,
        })
    }

    /// Fetch, parse and probe one source. Any failure means the source
    /// contributes zero results.
    async fn harvest_source(&self, url: &str, class: ProtocolClass) -> Vec<ProbeResult> {
        info!("fetching {class} proxies from {url}");
        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                error!("{e}");
                return Vec::new();
            }
        };

        let candidates = match CandidateParser::parse(&body, class, self.config.max_candidates) {
            Ok(candidates) => candidates,
            Err(source) => {
                error!(
                    "{}",
                    ProwlerError::Parse {
                        url: url.to_string(),
                        source,
                    }
                );
                return Vec::new();
            }
        };

        self.prober.probe_all(candidates).await
    }

    /// Harvest every source configured for one class and merge the pool.
    pub async fn run_class(&self, class: ProtocolClass) -> Vec<ProxyRecord> {
        let mut pool = Vec::new();
        for url in self.config.sources_for(class) {
            pool.extend(self.harvest_source(url, class).await);
        }
        let records = Aggregator::merge(pool);
        info!("{} active {class} proxies found", records.len());
        records
    }

    /// Full run over the selected class, or all classes when none is given.
    ///
    /// Writes the per-class files and the report; a class whose file cannot
    /// be written is recorded as empty, everything else proceeds.
    pub async fn run(&self, selected: Option<ProtocolClass>) -> ProtocolResultSet {
        let classes: Vec<ProtocolClass> = match selected {
            Some(class) => vec![class],
            None => ProtocolClass::ALL.to_vec(),
        };

        let mut harvested = Vec::new();
        for class in classes {
            let records = self.run_class(class).await;
            harvested.push((class, records));
        }

        // The output directory override is consulted once, when writing starts.
        let sink = OutputSink::new(resolve_output_dir(self.config.output_dir.as_deref()));

        let mut result_set = ProtocolResultSet::new();
        for (class, records) in harvested {
            match sink.save_class(class, &records) {
                Ok(_) => {
                    result_set.insert(class, records);
                }
                Err(e) => {
                    error!("{e}");
                    result_set.insert(class, Vec::new());
                }
            }
        }

        // Report rendering is best effort; a defect here must not fail the run.
        if let Err(e) = sink.save_report(&report::render(&result_set)) {
            error!("{e}");
        }

        result_set
    }
}
