use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use rocket_trajectory::dynamics::state::SimConfig;
use rocket_trajectory::io::csv;
use rocket_trajectory::io::json::{self, FlightSummary};
use rocket_trajectory::sim::{self, event, SimulationResult};
use rocket_trajectory::vehicle::{Rocket, RocketConfig};

/// Simulate a point-mass rocket flight from a YAML design file.
#[derive(Parser, Debug)]
#[command(author, version, about = "Point-mass rocket trajectory simulator")]
struct Cli {
    /// Rocket configuration file (YAML)
    config: PathBuf,

    /// Integration time step in seconds
    #[arg(long)]
    dt: Option<f64>,

    /// Maximum simulated time in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Write the trajectory samples to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the flight summary to this JSON file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Report crossings of this altitude in metres (repeatable)
    #[arg(long = "altitude-event", value_name = "METRES")]
    altitude_events: Vec<f64>,
}

fn main() -> Result<()> {
    default_log_level();
    pretty_env_logger::init();

    let cli = Cli::parse();

    let mut sim_config = SimConfig::default();
    if let Some(dt) = cli.dt {
        sim_config.dt = dt;
    }
    if let Some(duration) = cli.duration {
        sim_config.max_time = duration;
    }

    info!("Reading rocket configuration from '{}'", cli.config.display());
    let config = RocketConfig::load(&cli.config)
        .with_context(|| format!("loading '{}'", cli.config.display()))?;
    let checked = Rocket::prepare(&config, &sim_config).context("invalid rocket configuration")?;
    for advisory in &checked.advisories {
        warn!("{advisory}");
    }
    let rocket = checked.value;

    print_preflight(&rocket, &sim_config);

    let result = sim::simulate(&rocket, &sim_config);
    print_report(&rocket, &result, &cli.altitude_events);

    if let Some(path) = &cli.csv {
        csv::write_samples_file(path, &result.samples)
            .with_context(|| format!("writing '{}'", path.display()))?;
        info!("Trajectory written to '{}'", path.display());
    }

    if let Some(path) = &cli.json {
        if let Some(summary) = FlightSummary::from_result(&result) {
            json::write_summary_file(path, &rocket.name, &summary)
                .with_context(|| format!("writing '{}'", path.display()))?;
            info!("Summary written to '{}'", path.display());
        }
    }

    Ok(())
}

fn print_preflight(rocket: &Rocket, config: &SimConfig) {
    let engine = rocket.engine();
    let d = engine.direction;
    println!();
    println!("  Pre-flight Check: {}", rocket.name);
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Initial mass:  {:>8.2} kg    Dry mass:     {:>8.2} kg",
        rocket.initial_state.mass(),
        rocket.initial_state.dry_mass()
    );
    println!(
        "  Thrust:        {:>8.1} N     Burn time:    {:>8.2} s",
        engine.thrust, engine.burn_time
    );
    println!(
        "  Mass flow:     {:>8.3} kg/s  Direction:    [{:.3}, {:.3}, {:.3}]",
        engine.mass_flow_rate, d.x, d.y, d.z
    );
    println!(
        "  Weight:        {:>8.2} N     Vertical TWR: {:>8.3}{}",
        rocket.initial_weight,
        rocket.vertical_twr(),
        if rocket.vertical_twr() > 1.0 { "" } else { "  (must be > 1 for lift-off)" }
    );
    println!("  Time step:     {:>8.3} s     Duration:     {:>8.1} s", config.dt, config.max_time);
    println!();
}

fn print_report(rocket: &Rocket, result: &SimulationResult, altitude_marks: &[f64]) {
    let Some(summary) = FlightSummary::from_result(result) else {
        return;
    };

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in event::flight_events(result, rocket.engine().burn_time, altitude_marks) {
        println!(
            "  {:<26} t={:>7.2}s   alt={:>10.2}m   speed={:>8.2}m/s   mass={:>8.2}kg",
            e.kind.to_string(),
            e.time,
            e.sample.altitude,
            e.sample.speed,
            e.sample.mass
        );
    }
    println!();

    let p = summary.final_position_m;
    let v = summary.final_velocity_ms;
    println!("  Simulation Results ({:?})", summary.termination);
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Max altitude:  {:>10.2} m   ({:.2} km)",
        summary.max_altitude_m,
        summary.max_altitude_m / 1000.0
    );
    println!("  Time at max:   {:>10.2} s", summary.max_altitude_time_s);
    println!("  Max speed:     {:>10.2} m/s", summary.max_speed_ms);
    println!("  Flight time:   {:>10.2} s", summary.flight_time_s);
    println!("  Final position (X, Y, Z): ({:.2} m, {:.2} m, {:.2} m)", p[0], p[1], p[2]);
    println!("  Final velocity (Vx, Vy, Vz): ({:.2} m/s, {:.2} m/s, {:.2} m/s)", v[0], v[1], v[2]);
    println!();
    println!("  Samples: {}", result.samples.len());
    println!();
}

/// Default log level to "info" unless RUST_LOG is already set.
fn default_log_level() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
}
