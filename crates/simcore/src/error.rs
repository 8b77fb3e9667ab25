use thiserror::Error;

/// Errors raised by parameter validation and the integration step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A physical parameter is outside its valid range.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    /// The timestep handed to the integrator was negative or non-finite.
    #[error("invalid timestep: {0} s")]
    InvalidTimestep(f64),
}
