use nalgebra::Vector3;
use serde::Serialize;

use crate::dynamics::state::VehicleState;

/// One recorded point of the trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub time: f64,          // s
    pub pos: Vector3<f64>,  // m
    pub vel: Vector3<f64>,  // m/s
    pub mass: f64,          // kg
    pub altitude: f64,      // m, = pos.z
    pub speed: f64,         // m/s, = |vel|
}

impl Sample {
    pub fn capture(time: f64, state: &VehicleState) -> Self {
        Self {
            time,
            pos: *state.position(),
            vel: *state.velocity(),
            mass: state.mass(),
            altitude: state.altitude(),
            speed: state.speed(),
        }
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Simulated time reached the configured duration, or the vehicle sank
    /// below the ground tolerance without registering an impact.
    DurationExceeded,
    /// Descending at or below ground level.
    Impact,
    /// Configuration was unusable; nothing was simulated.
    ConfigurationFailure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub samples: Vec<Sample>,
    pub termination: Termination,
}

impl SimulationResult {
    /// Sentinel for a run that never started.
    pub fn configuration_failure() -> Self {
        Self { samples: Vec::new(), termination: Termination::ConfigurationFailure }
    }

    pub fn is_failure(&self) -> bool {
        self.termination == Termination::ConfigurationFailure
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Sample with the highest altitude (earliest one on ties).
    pub fn apogee(&self) -> Option<&Sample> {
        self.samples.iter().fold(None, |best: Option<&Sample>, s| match best {
            Some(b) if b.altitude >= s.altitude => Some(b),
            _ => Some(s),
        })
    }

    pub fn flight_time(&self) -> f64 {
        self.last().map_or(0.0, |s| s.time)
    }
}
