//! Force model for a body falling through still air.

use simcore::SimParams;

/// Air density at sea level (kg/m^3).
pub const AIR_DENSITY: f64 = 1.225;

/// Weight of the body (N, downward positive).
pub fn gravity_force(mass: f64, gravity: f64) -> f64 {
    mass * gravity
}

/// Quadratic drag magnitude 0.5 * rho * v^2 * Cd * A (N).
///
/// Always subtracted from the weight, so it only ever opposes a downward
/// velocity. This models a drop, not a throw; bodies moving upward are
/// outside its envelope.
pub fn drag_force(velocity: f64, drag_coefficient: f64, cross_sectional_area: f64) -> f64 {
    0.5 * AIR_DENSITY * velocity.powi(2) * drag_coefficient * cross_sectional_area
}

/// Speed at which drag balances weight (m/s).
///
/// Non-finite when the drag coefficient or area is zero; callers treat that
/// as "no terminal velocity", not as an error.
pub fn terminal_velocity(params: &SimParams) -> f64 {
    (2.0 * params.mass * params.gravity
        / (AIR_DENSITY * params.cross_sectional_area * params.drag_coefficient))
        .sqrt()
}
