//! spana entrypoint: estimate cache sizing from upload-serving access logs.

use clap::Parser;
use spana_telemetry::EventLogger;

mod commands;

use commands::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate(args) => commands::run_estimate(args),
        Commands::Scan(args) => commands::run_scan(args),
    }
}
