//! Charging station simulator entry point: CLI wiring and config-driven run.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use evcs_sim::config::ScenarioConfig;
use evcs_sim::io::export::{
    export_charge_points_csv, export_events_csv, export_profile_csv, export_result_json,
};
use evcs_sim::sim::engine::Engine;

/// Simulates one year of EV arrivals and charging at a charging station
#[derive(Parser, Debug)]
#[command(name = "evcs-sim", version, about, long_about = None)]
struct Cli {
    /// Load the station from a TOML scenario file
    #[arg(long, conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, single_point, quiet, rush_hour, fast_charging)
    #[arg(long)]
    preset: Option<String>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of charge points
    #[arg(long)]
    charge_points: Option<usize>,

    /// Override the arrival probability multiplier
    #[arg(long)]
    multiplier: Option<f64>,

    /// Write the exemplary day to CSV
    #[arg(long)]
    profile_out: Option<PathBuf>,

    /// Write per-charge-point utilization and average power to CSV
    #[arg(long)]
    charge_points_out: Option<PathBuf>,

    /// Write per-day session counts to CSV
    #[arg(long)]
    events_out: Option<PathBuf>,

    /// Write the full result to JSON
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Resolves the scenario: `--scenario` first, then `--preset`, then baseline.
fn load_scenario(cli: &Cli) -> anyhow::Result<ScenarioConfig> {
    let mut scenario = if let Some(path) = &cli.scenario {
        ScenarioConfig::from_toml_file(path)?
    } else if let Some(name) = &cli.preset {
        ScenarioConfig::from_preset(name)?
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(seed) = cli.seed {
        scenario.simulation.seed = Some(seed);
    }
    if let Some(n) = cli.charge_points {
        scenario.station.charge_point_count = n;
    }
    if let Some(m) = cli.multiplier {
        scenario.station.arrival_probability_multiplier = m;
    }
    Ok(scenario)
}

fn export(
    target: Option<&Path>,
    what: &str,
    write: impl FnOnce(&Path) -> std::io::Result<()>,
) -> anyhow::Result<()> {
    if let Some(path) = target {
        write(path).with_context(|| format!("failed to write {what} to {}", path.display()))?;
        info!(path = %path.display(), "{what} written");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "info" })
    });
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let scenario = load_scenario(&cli)?;

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        process::exit(1);
    }
    let station = scenario.station_config()?;

    let seed = scenario.simulation.seed.unwrap_or_else(|| {
        let seed = rand::random::<u64>();
        info!(seed, "no seed configured, drawn from OS entropy");
        seed
    });

    let result = Engine::new(station, seed).run();
    println!("{result}");

    export(cli.profile_out.as_deref(), "exemplary day", |p| {
        export_profile_csv(&result, p)
    })?;
    export(
        cli.charge_points_out.as_deref(),
        "charge point metrics",
        |p| export_charge_points_csv(&result, p),
    )?;
    export(cli.events_out.as_deref(), "daily events", |p| {
        export_events_csv(&result, p)
    })?;
    export(cli.json_out.as_deref(), "result", |p| {
        export_result_json(&result, p)
    })?;

    Ok(())
}
