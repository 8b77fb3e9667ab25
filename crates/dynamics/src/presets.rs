use serde::{Deserialize, Serialize};
use simcore::SimParams;

/// Mass and aerodynamic profile of a droppable object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectPreset {
    pub mass: f64,
    pub drag_coefficient: f64,
    pub cross_sectional_area: f64,
}

impl ObjectPreset {
    pub fn soccer_ball() -> Self {
        ObjectPreset { mass: 0.43, drag_coefficient: 0.25, cross_sectional_area: 0.038 }
    }

    pub fn bowling_ball() -> Self {
        ObjectPreset { mass: 7.2, drag_coefficient: 0.4, cross_sectional_area: 0.036 }
    }

    pub fn ping_pong_ball() -> Self {
        ObjectPreset { mass: 0.0027, drag_coefficient: 0.5, cross_sectional_area: 0.00125 }
    }

    pub fn skydiver() -> Self {
        ObjectPreset { mass: 75.0, drag_coefficient: 1.0, cross_sectional_area: 0.7 }
    }

    /// Every named preset, paired with its display name.
    pub fn all() -> [(&'static str, ObjectPreset); 4] {
        [
            ("Soccer Ball", ObjectPreset::soccer_ball()),
            ("Bowling Ball", ObjectPreset::bowling_ball()),
            ("Ping Pong Ball", ObjectPreset::ping_pong_ball()),
            ("Skydiver", ObjectPreset::skydiver()),
        ]
    }

    /// Copies this object's properties into `params`, leaving the release
    /// height and gravity as they are.
    pub fn apply_to(&self, params: &mut SimParams) {
        params.mass = self.mass;
        params.drag_coefficient = self.drag_coefficient;
        params.cross_sectional_area = self.cross_sectional_area;
    }

    /// True when `params` carries exactly this object's properties. Used to
    /// map hand-edited parameters back to a preset name.
    pub fn matches(&self, params: &SimParams) -> bool {
        params.mass == self.mass
            && params.drag_coefficient == self.drag_coefficient
            && params.cross_sectional_area == self.cross_sectional_area
    }
}

/// Gravitational accelerations (m/s^2).
pub mod gravity {
    pub const EARTH: f64 = 9.81;
    pub const MOON: f64 = 1.62;
    pub const MARS: f64 = 3.72;
    pub const JUPITER: f64 = 24.79;
    pub const ZERO: f64 = 0.0;

    /// Every named gravity value, paired with its display name.
    pub fn all() -> [(&'static str, f64); 5] {
        [
            ("Earth", EARTH),
            ("Moon", MOON),
            ("Mars", MARS),
            ("Jupiter", JUPITER),
            ("No Gravity", ZERO),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_yields_valid_params() {
        for (name, preset) in ObjectPreset::all() {
            let mut params = SimParams::default();
            preset.apply_to(&mut params);
            assert!(params.validate().is_ok(), "preset {} produced invalid params", name);
        }
    }

    #[test]
    fn test_default_params_are_the_skydiver() {
        assert!(ObjectPreset::skydiver().matches(&SimParams::default()));
        assert!(!ObjectPreset::soccer_ball().matches(&SimParams::default()));
    }

    #[test]
    fn test_apply_leaves_height_and_gravity_alone() {
        let mut params = SimParams { initial_height: 50.0, gravity: gravity::MOON, ..Default::default() };
        ObjectPreset::ping_pong_ball().apply_to(&mut params);

        assert!((params.mass - 0.0027).abs() < 1e-12);
        assert!((params.initial_height - 50.0).abs() < 1e-12);
        assert!((params.gravity - gravity::MOON).abs() < 1e-12);
    }
}
