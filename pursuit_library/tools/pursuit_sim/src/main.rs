//! # pursuit_sim - Headless Pure Pursuit Simulator
//!
//! Usage:
//!   pursuit_sim --waypoint 400,550 --waypoint 400,200          # Default tuning
//!   pursuit_sim --config tuning.toml --waypoint ...             # Custom tuning
//!   pursuit_sim --waypoint ... --record run.csv --metrics m.json
//!
//! Log verbosity follows `RUST_LOG` (e.g. `RUST_LOG=pursuit_library=debug`).

use anyhow::Result;
use clap::Parser;
use pursuit_library::Point2;
use pursuit_sim::{parse_waypoint, SimConfig, SimRunner};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "pursuit_sim")]
#[command(about = "Headless Pure Pursuit simulator for an omnidirectional robot")]
struct Args {
    /// Simulator configuration file (TOML or YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path waypoint as X,Y (repeat in path order)
    #[arg(long = "waypoint", value_parser = parse_waypoint, required = true)]
    waypoints: Vec<Point2>,

    /// Override the tick budget from the config file
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Write the per-tick recording (.csv, otherwise YAML)
    #[arg(long)]
    record: Option<PathBuf>,

    /// Write run metrics as JSON
    #[arg(long)]
    metrics: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("loading config from {:?}", path);
            SimConfig::load(path)?
        }
        None => SimConfig::default(),
    };
    if let Some(max_ticks) = args.max_ticks {
        config.run.max_ticks = max_ticks;
    }

    let mut runner = SimRunner::new(config)?;
    runner.add_waypoints(args.waypoints)?;
    let outcome = runner.run()?;

    let metrics = runner.metrics();
    info!(
        "distance {:.1}, avg speed {:.3}, max cross-track {:.2}, final cursor {}",
        metrics.distance_travelled,
        metrics.avg_speed,
        metrics.max_cross_track_error,
        outcome.final_cursor
    );

    if let Some(path) = &args.record {
        runner.recording().export(path)?;
        info!("recording written to {:?}", path);
    }
    if let Some(path) = &args.metrics {
        metrics.export_to_json(path)?;
        info!("metrics written to {:?}", path);
    }

    if !outcome.arrived {
        anyhow::bail!("robot did not arrive within {} ticks", outcome.ticks);
    }

    Ok(())
}
