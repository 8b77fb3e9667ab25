pub mod simulation;

pub use simulation::SimulationRunner;
