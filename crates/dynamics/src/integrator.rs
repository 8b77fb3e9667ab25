use simcore::{KinematicState, SimError, SimParams};

use crate::forces::{drag_force, gravity_force};

/// A single-step integration strategy for the falling body.
///
/// Implementations are pure: the same state, parameters and timestep always
/// produce the same output, and the input state is never mutated. Ground
/// detection is the caller's job; a step may legitimately return a state
/// below ground.
pub trait Integrator {
    /// Advances the state by one timestep of `dt` seconds.
    fn step(
        &self,
        state: &KinematicState,
        params: &SimParams,
        dt: f64,
    ) -> Result<KinematicState, SimError>;
}

/// Semi-implicit Euler integrator (symplectic Euler).
/// First-order accurate, but feeding the freshly updated velocity into the
/// position update keeps the scheme stable at display-frame timesteps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(
        &self,
        state: &KinematicState,
        params: &SimParams,
        dt: f64,
    ) -> Result<KinematicState, SimError> {
        params.validate()?;
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::InvalidTimestep(dt));
        }

        let net_force = gravity_force(params.mass, params.gravity)
            - drag_force(state.velocity, params.drag_coefficient, params.cross_sectional_area);
        let acceleration = net_force / params.mass;

        // Semi-implicit: the NEW velocity drives the height update.
        let velocity = state.velocity + acceleration * dt;
        let height = state.height - velocity * dt;

        Ok(KinematicState {
            time: state.time + dt,
            height,
            velocity,
            acceleration,
        })
    }
}
