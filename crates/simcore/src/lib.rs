//! Shared vocabulary for the free-fall simulation crates: run parameters,
//! kinematic state, recorded samples and the run lifecycle.

pub mod error;
pub mod params;
pub mod state;

pub use error::SimError;
pub use params::SimParams;
pub use state::{KinematicState, RunStatus, Sample};
