use log::debug;

use crate::diagnostics::{Advisory, Checked};
use crate::dynamics::forces::{Engine, ForceModel};
use crate::dynamics::state::{SimConfig, VehicleState};
use crate::error::ConfigError;

use super::config::RocketConfig;

// ---------------------------------------------------------------------------
// Rocket: a validated configuration ready to fly
// ---------------------------------------------------------------------------

/// Everything the simulation loop needs, derived once from the configuration.
#[derive(Debug, Clone)]
pub struct Rocket {
    pub name: String,
    pub initial_state: VehicleState,
    pub force_model: ForceModel,
    pub initial_weight: f64, // N, configured initial mass * g0
}

impl Rocket {
    /// Validate `config` and `sim`, normalize the thrust direction and build
    /// the initial state.
    ///
    /// Advisories (degenerate direction, propellant clamp, insufficient
    /// thrust) are returned alongside the rocket and never stop the run.
    pub fn prepare(config: &RocketConfig, sim: &SimConfig) -> Result<Checked<Self>, ConfigError> {
        config.validate()?;
        sim.validate()?;

        let (initial_state, mut advisories) = VehicleState::new(
            config.mass.initial,
            config.mass.dry,
            config.aerodynamics.cross_sectional_area_m2,
            config.position()?,
            config.velocity()?,
        )
        .into_parts();

        let (engine, engine_advisories) = Engine::new(
            config.engine.thrust_n,
            config.engine.burn_time_s,
            &config.direction()?,
            initial_state.propellant_remaining(),
        )
        .into_parts();
        advisories.extend(engine_advisories);

        debug!(
            "thrust direction [{:.3}, {:.3}, {:.3}], mass flow {:.4} kg/s",
            engine.direction.x, engine.direction.y, engine.direction.z, engine.mass_flow_rate
        );

        let initial_weight = config.mass.initial * sim.g0;
        let vertical_thrust = engine.vertical_thrust();
        if vertical_thrust < initial_weight {
            advisories.push(Advisory::InsufficientThrust {
                weight: initial_weight,
                vertical_thrust,
                twr: vertical_thrust / initial_weight,
            });
        }

        let force_model = ForceModel::new(
            engine,
            config.aerodynamics.drag_coefficient,
            config.aerodynamics.cross_sectional_area_m2,
            sim,
        );

        Ok(Checked {
            value: Self {
                name: config.display_name().to_string(),
                initial_state,
                force_model,
                initial_weight,
            },
            advisories,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.force_model.engine
    }

    /// Thrust-to-weight ratio of the vertical thrust component at ignition.
    pub fn vertical_twr(&self) -> f64 {
        self.engine().vertical_thrust() / self.initial_weight
    }

    pub fn propellant_mass(&self) -> f64 {
        self.initial_state.propellant_remaining()
    }
}
