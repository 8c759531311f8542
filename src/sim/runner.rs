use std::path::Path;

use log::{error, info};

use crate::diagnostics::Checked;
use crate::dynamics::state::SimConfig;
use crate::error::ConfigError;
use crate::vehicle::{Rocket, RocketConfig};

use super::sample::{Sample, SimulationResult, Termination};

/// The loop keeps stepping while altitude stays at or above this (m).
pub const GROUND_TOLERANCE: f64 = -1.0;

/// Upper bound on preallocated samples.
const MAX_PREALLOC: usize = 200_000;

// ---------------------------------------------------------------------------
// Simulation loop
// ---------------------------------------------------------------------------

/// Fly `rocket` with a fixed time step until impact or `config.max_time`.
///
/// Sample 0 is the initial state at t = 0, followed by one sample per step.
/// The impact check runs after the step's sample is recorded, so the impact
/// sample is part of the output. `config` must have passed
/// [`SimConfig::validate`] (done by [`Rocket::prepare`]).
pub fn simulate(rocket: &Rocket, config: &SimConfig) -> SimulationResult {
    let forces = &rocket.force_model;
    let mut state = rocket.initial_state.clone();
    let mut t = 0.0;

    let capacity = sample_capacity(config);
    let mut samples = Vec::with_capacity(capacity);
    samples.push(Sample::capture(t, &state));

    let mut termination = Termination::DurationExceeded;

    while t < config.max_time && state.altitude() >= GROUND_TOLERANCE {
        let net_force = forces.net_force(&state, t);
        let mass_flow = forces.mass_flow_rate(&state, t);
        state.update(config.dt, &net_force, mass_flow);

        t += config.dt;
        samples.push(Sample::capture(t, &state));

        if state.altitude() <= 0.0 && state.velocity().z < 0.0 {
            termination = Termination::Impact;
            break;
        }
    }

    match termination {
        Termination::Impact => info!(
            "{}: impact at t={:.2}s, altitude {:.2} m",
            rocket.name,
            t,
            state.altitude()
        ),
        _ => info!(
            "{}: stopped at t={:.2}s, altitude {:.2} m",
            rocket.name,
            t,
            state.altitude()
        ),
    }

    SimulationResult { samples, termination }
}

/// Expected sample count (steps + initial + one spare), capped at
/// [`MAX_PREALLOC`]. The float-to-usize cast saturates for huge durations.
fn sample_capacity(config: &SimConfig) -> usize {
    ((config.max_time / config.dt) as usize)
        .saturating_add(2)
        .min(MAX_PREALLOC)
}

/// Validate, prepare and fly a configuration in one call.
pub fn run(config: &RocketConfig, sim: &SimConfig) -> Result<Checked<SimulationResult>, ConfigError> {
    let (rocket, advisories) = Rocket::prepare(config, sim)?.into_parts();
    info!(
        "{}: simulating {:.1} s at dt={} s",
        rocket.name, sim.max_time, sim.dt
    );
    Ok(Checked { value: simulate(&rocket, sim), advisories })
}

/// Load and fly a configuration file. Any configuration error is logged and
/// turned into the [`SimulationResult::configuration_failure`] sentinel.
pub fn run_file<P: AsRef<Path>>(path: P, sim: &SimConfig) -> Checked<SimulationResult> {
    let path = path.as_ref();
    match RocketConfig::load(path).and_then(|config| run(&config, sim)) {
        Ok(result) => result,
        Err(e) => {
            error!("failed to load rocket configuration '{}': {e}", path.display());
            Checked::clean(SimulationResult::configuration_failure())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
