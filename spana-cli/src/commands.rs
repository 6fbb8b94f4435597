use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use spana_accesslog::{AccessLine, LineSource};
use spana_config::SpanaConfig;
use spana_engine::replay;
use spana_metadata::JsonlStore;
use spana_telemetry::MetricsRecorder;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay access logs and estimate cache sizing per retention window
    Estimate(EstimateArgs),
    /// Count parseable content accesses per log file, without simulating
    Scan(ScanArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Access log files in chronological order (plain or .gz)
    #[arg(required = true)]
    pub logs: Vec<PathBuf>,

    /// Configuration file; defaults to config/spana.yaml plus SPANA_* env
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Object metadata dump (JSON Lines); overrides the configured path
    #[arg(short, long)]
    pub metadata: Option<PathBuf>,

    /// Window durations in seconds; replaces the configured list
    #[arg(short, long)]
    pub window: Vec<u64>,

    /// Print prometheus metrics after the report
    #[arg(long, default_value_t = false)]
    pub metrics: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Access log files (plain or .gz)
    #[arg(required = true)]
    pub logs: Vec<PathBuf>,
}

type CliResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub fn run_estimate(args: EstimateArgs) -> CliResult {
    let config = match &args.config {
        Some(path) => SpanaConfig::load_from_path(path)?,
        None => SpanaConfig::load()?,
    };
    let windows = if args.window.is_empty() {
        config.simulation.windows
    } else {
        args.window
    };

    let store_path = args
        .metadata
        .or(config.metadata.store)
        .ok_or("no metadata store configured; pass --metadata or set metadata.store")?;
    let resolver = JsonlStore::load(&store_path)?;
    info!(
        objects = resolver.len(),
        store = %store_path.display(),
        "metadata store loaded"
    );

    let metrics = MetricsRecorder::new();
    let report = replay(&windows, &args.logs, resolver, &metrics)?;

    print!("{report}");
    if args.metrics {
        print!("{}", metrics.gather_metrics()?);
    }
    Ok(())
}

pub fn run_scan(args: ScanArgs) -> CliResult {
    for path in &args.logs {
        let mut total = 0u64;
        let mut matched = 0u64;
        let mut cacheable = 0u64;
        for line in LineSource::open(path)? {
            let line = line?;
            total += 1;
            if let Some(access) = AccessLine::parse(&line) {
                matched += 1;
                if access.is_cacheable() {
                    cacheable += 1;
                }
            }
        }
        println!(
            "{}: {} lines, {} content accesses, {} cacheable",
            path.display(),
            total,
            matched,
            cacheable
        );
    }
    Ok(())
}
