//! Sink simulation - Entry Point
//!
//! Builds sink facilities from a TOML configuration, runs them against
//! fixed-supply sources for a number of periods and prints a JSON summary.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use sink_sim::{build_simulation, RunSummary, SimConfig};
use sink_telemetry::Metrics;
use tracing::info;

/// Capacity-bounded sink facility simulation
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via SINK_SIM_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the number of periods from the configuration
    #[arg(short, long)]
    periods: Option<u32>,

    /// Print Prometheus metrics after the summary
    #[arg(long)]
    dump_metrics: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    sink_telemetry::init_logging()?;

    info!("Starting sink-sim v{}", env!("CARGO_PKG_VERSION"));

    // CLI arg > SINK_SIM_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("SINK_SIM_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = SimConfig::from_file(&config_path)?;
    let periods = args.periods.unwrap_or(config.periods);
    info!(
        periods,
        prototypes = config.prototypes.len(),
        suppliers = config.suppliers.len(),
        "Configuration loaded"
    );

    let started_at = Utc::now();
    let mut sim = build_simulation(&config)?;
    sim.run(periods)?;

    let summary = RunSummary::new(started_at, periods, sim.participants());
    info!(total_held = %summary.total_held(), "Run complete");
    println!("{}", summary.to_json()?);

    if args.dump_metrics {
        print!("{}", Metrics::gather_text()?);
    }

    Ok(())
}
