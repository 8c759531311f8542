pub mod forces;
pub mod state;

pub use forces::{Engine, ForceModel, Forces};
pub use state::{SimConfig, VehicleState, G0};
