//! Physical parameters of a free-fall run.

use serde::{Deserialize, Serialize};

use crate::SimError;

/// Parameters of a single drop.
///
/// Immutable while a run is in flight; swapping in new parameters resets the
/// run. Defaults to a skydiver released from 1000 m under Earth gravity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Body mass (kg)
    pub mass: f64,
    /// Release height above the ground (m)
    pub initial_height: f64,
    /// Dimensionless drag coefficient
    pub drag_coefficient: f64,
    /// Cross-sectional area facing the airstream (m^2)
    pub cross_sectional_area: f64,
    /// Gravitational acceleration (m/s^2)
    pub gravity: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        SimParams {
            mass: 75.0,
            initial_height: 1000.0,
            drag_coefficient: 1.0,
            cross_sectional_area: 0.7,
            gravity: 9.81,
        }
    }
}

impl SimParams {
    /// Checks every field against its physical range.
    ///
    /// Mass, height and area must be strictly positive; the drag coefficient
    /// and gravity may be zero but not negative. Non-finite values are
    /// rejected so they can never leak into the integrated state.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(SimError::InvalidParameter { name: "mass", value: self.mass });
        }
        if !self.initial_height.is_finite() || self.initial_height <= 0.0 {
            return Err(SimError::InvalidParameter {
                name: "initial_height",
                value: self.initial_height,
            });
        }
        if !self.drag_coefficient.is_finite() || self.drag_coefficient < 0.0 {
            return Err(SimError::InvalidParameter {
                name: "drag_coefficient",
                value: self.drag_coefficient,
            });
        }
        if !self.cross_sectional_area.is_finite() || self.cross_sectional_area <= 0.0 {
            return Err(SimError::InvalidParameter {
                name: "cross_sectional_area",
                value: self.cross_sectional_area,
            });
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(SimError::InvalidParameter { name: "gravity", value: self.gravity });
        }
        Ok(())
    }
}
