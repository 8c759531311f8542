use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::sim::{SimulationResult, Termination};

/// Summary statistics computed from a flight.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    pub max_altitude_m: f64,
    pub max_altitude_time_s: f64,
    pub max_speed_ms: f64,
    pub max_vertical_speed_ms: f64,
    pub flight_time_s: f64,
    pub final_position_m: [f64; 3],
    pub final_velocity_ms: [f64; 3],
    pub final_mass_kg: f64,
    pub termination: Termination,
}

impl FlightSummary {
    /// Compute summary from a run. `None` for the configuration-failure
    /// sentinel, which has no samples.
    pub fn from_result(result: &SimulationResult) -> Option<Self> {
        let apogee = result.apogee()?;
        let last = result.last()?;

        let max_speed = result
            .samples
            .iter()
            .map(|s| s.speed)
            .fold(0.0_f64, f64::max);

        let max_vertical_speed = result
            .samples
            .iter()
            .map(|s| s.vel.z)
            .fold(f64::NEG_INFINITY, f64::max);

        Some(FlightSummary {
            max_altitude_m: apogee.altitude,
            max_altitude_time_s: apogee.time,
            max_speed_ms: max_speed,
            max_vertical_speed_ms: max_vertical_speed,
            flight_time_s: last.time,
            final_position_m: [last.pos.x, last.pos.y, last.pos.z],
            final_velocity_ms: [last.vel.x, last.vel.y, last.vel.z],
            final_mass_kg: last.mass,
            termination: result.termination,
        })
    }
}

#[derive(Serialize)]
struct Report<'a> {
    rocket: &'a str,
    performance: &'a FlightSummary,
}

/// Write flight summary as pretty JSON to a writer.
pub fn write_summary<W: Write>(
    writer: W,
    rocket_name: &str,
    summary: &FlightSummary,
) -> serde_json::Result<()> {
    let report = Report { rocket: rocket_name, performance: summary };
    serde_json::to_writer_pretty(writer, &report)
}

/// Write flight summary JSON to a file.
pub fn write_summary_file<P: AsRef<Path>>(
    path: P,
    rocket_name: &str,
    summary: &FlightSummary,
) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_summary(file, rocket_name, summary)?;
    Ok(())
}
