pub mod diagnostics;
pub mod dynamics;
pub mod error;
pub mod io;
pub mod physics;
pub mod sim;
pub mod vehicle;

pub use diagnostics::{Advisory, Checked};
pub use dynamics::{ForceModel, SimConfig, VehicleState};
pub use error::ConfigError;
pub use sim::{run, run_file, simulate, Sample, SimulationResult, Termination};
pub use vehicle::{Rocket, RocketConfig};
