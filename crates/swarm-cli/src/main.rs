//! # Swarm CLI
//!
//! Command-line front end for the drone show planner. Loads a drone roster
//! and a show config (two separate YAML files, per §3/§6), runs the full
//! planning pipeline, and exports the resulting trajectories as CSV.
//!
//! ## Responsibilities
//!
//! The CLI is responsible for:
//!
//! *   Parsing the drone roster and show configuration files.
//! *   Driving `swarm_core::ShowSequencer` through every step.
//! *   Writing the planned trajectories out as CSV, combined or per-drone.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swarm_core::export::{write_combined_csv, write_per_drone_csv};
use swarm_core::sequencer::ShowSequencer;
use tracing::info;

mod config;

use config::{DroneRosterConfig, ShowConfig};

/// Plans and exports multi-drone choreography shows.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plan a show from a drone roster and a show config, and export it as CSV.
    Plan(PlanArgs),
}

/// Arguments for the `plan` command.
#[derive(Parser, Debug)]
struct PlanArgs {
    /// Path to the drone roster YAML file.
    #[arg(long, default_value = "drones.yaml")]
    drones_path: PathBuf,

    /// Path to the show configuration YAML file.
    #[arg(long, default_value = "show.yaml")]
    show_path: PathBuf,

    /// Directory to write CSV output into.
    #[arg(short, long, default_value = "out")]
    out_dir: PathBuf,

    /// Write one CSV per drone instead of a single combined file.
    #[arg(long)]
    per_drone: bool,

    /// Include the final sample at t = total_duration in the export grid.
    #[arg(long, default_value_t = true)]
    include_endpoint: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Plan(args) => run_plan(args),
    }
}

fn run_plan(args: PlanArgs) -> Result<()> {
    info!("Loading drone roster from: {:?}", args.drones_path);
    let roster = DroneRosterConfig::load(&args.drones_path)?;
    let drones = roster.build_drones()?;

    info!("Loading show configuration from: {:?}", args.show_path);
    let show_config = ShowConfig::load(&args.show_path)?;
    let (steps, params) = show_config.build_inputs()?;

    let drone_ids: Vec<u32> = drones.iter().map(|d| d.drone_id).collect();

    info!(n_drones = drones.len(), n_steps = steps.len(), "building show");
    let mut sequencer = ShowSequencer::new(drones, steps, params);
    let show = sequencer.build_show().context("failed to plan show")?;
    info!(total_duration = show.total_duration, "show planned");

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory: {:?}", args.out_dir))?;

    if args.per_drone {
        write_per_drone_csv(&args.out_dir, &show, &drone_ids, show_config.fps, args.include_endpoint)
            .context("failed to export per-drone CSV")?;
    } else {
        write_combined_csv(&args.out_dir, &show, &drone_ids, show_config.fps, args.include_endpoint)
            .context("failed to export combined CSV")?;
    }

    info!("export complete");
    Ok(())
}
