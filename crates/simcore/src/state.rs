//! Kinematic state, recorded samples and the run lifecycle.

use serde::{Deserialize, Serialize};

use crate::SimParams;

/// Instantaneous kinematic state of the falling body.
///
/// Sign convention: velocity and acceleration are positive downward, height
/// is measured up from the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    /// Simulated time since release (s)
    pub time: f64,
    /// Height above the ground (m)
    pub height: f64,
    /// Downward speed (m/s)
    pub velocity: f64,
    /// Downward acceleration (m/s^2)
    pub acceleration: f64,
}

impl KinematicState {
    /// State of a body at the release height, the instant it is let go.
    /// At zero velocity there is no drag, so acceleration starts at the
    /// local gravity.
    pub fn at_rest(params: &SimParams) -> Self {
        KinematicState {
            time: 0.0,
            height: params.initial_height,
            velocity: 0.0,
            acceleration: params.gravity,
        }
    }
}

/// One committed point of a run's time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub velocity: f64,
    pub height: f64,
}

impl From<KinematicState> for Sample {
    fn from(state: KinematicState) -> Self {
        Sample {
            time: state.time,
            velocity: state.velocity,
            height: state.height,
        }
    }
}

/// Lifecycle of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunStatus {
    /// Configured but not started, or reset.
    #[default]
    Idle,
    /// Advancing on wall-clock ticks.
    Running,
    /// Suspended with state and series retained.
    Paused,
    /// The body reached the ground.
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_rest_matches_params() {
        let params = SimParams { initial_height: 250.0, gravity: 3.72, ..Default::default() };
        let state = KinematicState::at_rest(&params);

        assert!((state.time).abs() < 1e-12);
        assert!((state.height - 250.0).abs() < 1e-12);
        assert!((state.velocity).abs() < 1e-12);
        assert!((state.acceleration - 3.72).abs() < 1e-12);
    }

    #[test]
    fn test_sample_from_state_drops_acceleration() {
        let state = KinematicState { time: 1.5, height: 42.0, velocity: 12.0, acceleration: 9.0 };
        let sample = Sample::from(state);

        assert!((sample.time - 1.5).abs() < 1e-12);
        assert!((sample.velocity - 12.0).abs() < 1e-12);
        assert!((sample.height - 42.0).abs() < 1e-12);
    }
}
