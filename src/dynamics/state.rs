use nalgebra::Vector3;

use crate::diagnostics::{Advisory, Checked};
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Physical and simulation constants
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.80665; // standard gravity, m/s^2
pub const ATM_SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m^3
pub const ATM_SCALE_HEIGHT: f64 = 8500.0; // m
pub const TIME_STEP: f64 = 0.1; // s
pub const SIMULATION_DURATION: f64 = 600.0; // s

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

/// Environment and integration constants for one run. Immutable once the
/// loop starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub g0: f64,                // m/s^2
    pub sea_level_density: f64, // kg/m^3
    pub scale_height: f64,      // m
    pub dt: f64,                // s
    pub max_time: f64,          // s
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            g0: G0,
            sea_level_density: ATM_SEA_LEVEL_DENSITY,
            scale_height: ATM_SCALE_HEIGHT,
            dt: TIME_STEP,
            max_time: SIMULATION_DURATION,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("simulation.scale_height", self.scale_height)?;
        positive("simulation.dt", self.dt)?;
        positive("simulation.max_time", self.max_time)?;
        if !self.g0.is_finite() {
            return Err(ConfigError::NonFinite { field: "simulation.g0" });
        }
        if self.g0 < 0.0 {
            return Err(ConfigError::Negative { field: "simulation.g0", value: self.g0 });
        }
        if !self.sea_level_density.is_finite() {
            return Err(ConfigError::NonFinite { field: "simulation.sea_level_density" });
        }
        if self.sea_level_density < 0.0 {
            return Err(ConfigError::Negative {
                field: "simulation.sea_level_density",
                value: self.sea_level_density,
            });
        }
        Ok(())
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Vehicle state
// ---------------------------------------------------------------------------

/// Point-mass vehicle state. Frame: East-North-Up, Z is altitude.
///
/// Invariants held after construction and after every [`update`](Self::update):
/// `mass >= dry_mass`, `propellant == 0 => mass == dry_mass`, and propellant
/// never increases.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    mass: f64,                 // kg
    dry_mass: f64,             // kg
    cross_sectional_area: f64, // m^2
    pos: Vector3<f64>,         // m
    vel: Vector3<f64>,         // m/s
    accel: Vector3<f64>,       // m/s^2, from the last update
    propellant: f64,           // kg remaining
}

impl VehicleState {
    /// Build the initial state. An initial mass below dry mass is clamped to
    /// dry mass (no propellant) and reported as an advisory.
    pub fn new(
        initial_mass: f64,
        dry_mass: f64,
        cross_sectional_area: f64,
        pos: Vector3<f64>,
        vel: Vector3<f64>,
    ) -> Checked<Self> {
        let propellant = initial_mass - dry_mass;
        let (mass, propellant, advisory) = if propellant < 0.0 {
            (
                dry_mass,
                0.0,
                Some(Advisory::PropellantClamped { initial_mass, dry_mass }),
            )
        } else {
            (initial_mass, propellant, None)
        };

        let state = Self {
            mass,
            dry_mass,
            cross_sectional_area,
            pos,
            vel,
            accel: Vector3::zeros(),
            propellant,
        };
        Checked::with(state, advisory)
    }

    /// Advance one semi-implicit Euler step.
    ///
    /// Order is fixed: acceleration from the pre-step mass, then velocity,
    /// then position from the new velocity, then propellant consumption.
    /// `mass` must be positive on entry.
    pub fn update(&mut self, dt: f64, net_force: &Vector3<f64>, mass_flow_rate: f64) {
        self.accel = *net_force / self.mass;
        self.vel += self.accel * dt;
        self.pos += self.vel * dt;

        if mass_flow_rate > 0.0 && self.has_propellant() {
            let consumed = (mass_flow_rate * dt).min(self.propellant);
            self.propellant -= consumed;
            self.mass = (self.mass - consumed).max(self.dry_mass);
            if self.propellant <= 0.0 {
                // Exhausted: pin to dry mass so round-off can't leave a residue.
                self.propellant = 0.0;
                self.mass = self.dry_mass;
            }
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn dry_mass(&self) -> f64 {
        self.dry_mass
    }

    pub fn cross_sectional_area(&self) -> f64 {
        self.cross_sectional_area
    }

    pub fn position(&self) -> &Vector3<f64> {
        &self.pos
    }

    pub fn velocity(&self) -> &Vector3<f64> {
        &self.vel
    }

    pub fn acceleration(&self) -> &Vector3<f64> {
        &self.accel
    }

    pub fn propellant_remaining(&self) -> f64 {
        self.propellant
    }

    /// Altitude above the launch plane (Z component of position).
    pub fn altitude(&self) -> f64 {
        self.pos.z
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    pub fn has_propellant(&self) -> bool {
        self.propellant > 0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
