use nalgebra::Vector3;

use crate::diagnostics::{Advisory, Checked};
use crate::dynamics::state::{SimConfig, VehicleState};
use crate::physics::{aerodynamics, atmosphere, gravity};

/// Configured directions at or below this length are treated as degenerate.
pub const MIN_DIRECTION_NORM: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Engine: constant thrust along a fixed direction for a fixed burn time
// ---------------------------------------------------------------------------

/// Normalize a configured thrust direction, falling back to vertical when it
/// has no usable length.
pub fn thrust_direction(configured: &Vector3<f64>) -> Checked<Vector3<f64>> {
    let norm = configured.norm();
    if norm > MIN_DIRECTION_NORM {
        Checked::clean(*configured / norm)
    } else {
        Checked::with(
            Vector3::z(),
            Some(Advisory::DegenerateDirection { configured: *configured }),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub thrust: f64,              // N
    pub burn_time: f64,           // s
    pub direction: Vector3<f64>,  // unit vector, fixed for the run
    pub mass_flow_rate: f64,      // kg/s while burning
}

impl Engine {
    /// Propellant is spread evenly over the burn. A non-positive burn time
    /// gives zero mass flow.
    pub fn new(
        thrust: f64,
        burn_time: f64,
        configured_direction: &Vector3<f64>,
        propellant_mass: f64,
    ) -> Checked<Self> {
        let (direction, advisories) = thrust_direction(configured_direction).into_parts();
        let mass_flow_rate = if burn_time > 0.0 {
            propellant_mass / burn_time
        } else {
            0.0
        };
        Checked {
            value: Self { thrust, burn_time, direction, mass_flow_rate },
            advisories,
        }
    }

    pub fn is_burning(&self, t: f64) -> bool {
        t <= self.burn_time
    }

    pub fn thrust_force(&self, t: f64) -> Vector3<f64> {
        if self.is_burning(t) {
            self.direction * self.thrust
        } else {
            Vector3::zeros()
        }
    }

    /// Thrust component opposing gravity.
    pub fn vertical_thrust(&self) -> f64 {
        self.thrust * self.direction.z
    }
}

// ---------------------------------------------------------------------------
// Force model
// ---------------------------------------------------------------------------

/// Individual force contributions at one instant (N, inertial frame).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forces {
    pub thrust: Vector3<f64>,
    pub gravity: Vector3<f64>,
    pub drag: Vector3<f64>,
}

impl Forces {
    pub fn net(&self) -> Vector3<f64> {
        self.thrust + self.gravity + self.drag
    }
}

#[derive(Debug, Clone)]
pub struct ForceModel {
    pub engine: Engine,
    pub cd: f64,
    pub area: f64, // m^2
    g0: f64,
    sea_level_density: f64,
    scale_height: f64,
}

impl ForceModel {
    pub fn new(engine: Engine, cd: f64, area: f64, config: &SimConfig) -> Self {
        Self {
            engine,
            cd,
            area,
            g0: config.g0,
            sea_level_density: config.sea_level_density,
            scale_height: config.scale_height,
        }
    }

    /// Thrust, gravity and drag acting on `state` at elapsed time `t`.
    pub fn forces(&self, state: &VehicleState, t: f64) -> Forces {
        let rho = atmosphere::density(
            state.altitude(),
            self.sea_level_density,
            self.scale_height,
        );
        Forces {
            thrust: self.engine.thrust_force(t),
            gravity: gravity::gravity_force(state.mass(), self.g0),
            drag: aerodynamics::drag_force(state.velocity(), rho, self.cd, self.area),
        }
    }

    pub fn net_force(&self, state: &VehicleState, t: f64) -> Vector3<f64> {
        self.forces(state, t).net()
    }

    /// Propellant consumption rate at `t` (kg/s).
    pub fn mass_flow_rate(&self, state: &VehicleState, t: f64) -> f64 {
        if self.engine.is_burning(t) && state.has_propellant() {
            self.engine.mass_flow_rate
        } else {
            0.0
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
