use thiserror::Error;

/// Errors surfaced to the host at initialization or configuration time.
///
/// Numeric degeneracies inside the pipeline (empty neighborhoods, zero
/// densities) are handled locally and never reach this type.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("spawn positions/velocities length mismatch: {positions} vs {velocities}")]
    MismatchedSpawnArrays { positions: usize, velocities: usize },

    #[error("spawn must contain at least one particle")]
    EmptySpawn,

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be within [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },

    #[error("stepsPerFrame must be at least 1")]
    ZeroSubstepCount,

    #[error("malformed settings: {0}")]
    MalformedSettings(String),
}
