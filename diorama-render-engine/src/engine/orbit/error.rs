use thiserror::Error;

/// Rejected pointer updates. The controller state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OrbitInputError {
    #[error("viewport width must be positive and finite, got {0}")]
    InvalidViewportWidth(f64),
    #[error("pointer coordinate is not finite: {0}")]
    NonFiniteCoordinate(f64),
}

/// Invalid tuning or stage table data, usually from the diorama manifest.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitConfigError {
    #[error("orbit parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },
    #[error("damping factor must lie in [0, 1), got {0}")]
    DampingOutOfRange(f64),
    #[error("velocity epsilon must be positive, got {0}")]
    NonPositiveEpsilon(f64),
    #[error("stage {id} range [{start}, {end}] is not an ordered range within [0, 2π)")]
    InvalidStageRange { id: u32, start: f64, end: f64 },
    #[error("stage {0} is listed more than once")]
    DuplicateStage(u32),
}
