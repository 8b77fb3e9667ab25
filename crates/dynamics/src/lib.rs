pub mod forces;
pub mod integrator;
pub mod presets;

pub use forces::{AIR_DENSITY, drag_force, gravity_force, terminal_velocity};
pub use integrator::{Integrator, SemiImplicitEuler};
pub use presets::ObjectPreset;
