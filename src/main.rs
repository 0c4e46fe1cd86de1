use anyhow::Result;
use clap::Parser;
use proxy_prowler::{HarvestConfig, HarvestPipeline, ProtocolClass};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// A proxy list harvester with concurrent TCP liveness probing
#[derive(Parser)]
#[command(name = "proxy-prowler")]
#[command(about = "Harvests SOCKS5/SOCKS4/HTTPS proxy lists and probes them over raw TCP")]
struct Cli {
    /// Protocol class to process; all classes when omitted
    class: Option<ProtocolClass>,

    /// Directory for the per-class lists and the report
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let mut config = HarvestConfig::default();
    if let Some(dir) = cli.output_dir {
        config = config.with_output_dir(dir);
    }

    let pipeline = HarvestPipeline::new(config)?;
    let result_set = pipeline.run(cli.class).await;

    for class in ProtocolClass::ALL {
        if let Some(records) = result_set.get(&class) {
            info!("{class}: {} active proxies", records.len());
        }
    }

    Ok(())
}
