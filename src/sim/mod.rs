pub mod event;
pub mod runner;
pub mod sample;

pub use runner::{run, run_file, simulate};
pub use sample::{Sample, SimulationResult, Termination};
