use std::f64::consts::PI;

/// Radians of rotation per full viewport width of horizontal drag.
pub const DRAG_SENSITIVITY: f64 = 0.01 * PI;

/// Radians applied per arrow key press (and per key auto-repeat).
pub const KEY_STEP: f64 = 0.005 * PI;

/// Velocity assigned by an `ArrowLeft` step.
pub const KEY_VELOCITY_LEFT: f64 = 0.007;

/// Velocity assigned by an `ArrowRight` step. Not the mirror of the left value.
pub const KEY_VELOCITY_RIGHT: f64 = -0.057;

/// Per-tick multiplier applied to residual velocity while idle.
pub const DAMPING_FACTOR: f64 = 0.95;

/// Residual velocity below this magnitude snaps to zero.
pub const VELOCITY_EPSILON: f64 = 0.001;

/// Baseline rotation added every idle tick.
pub const AUTO_ROTATION_RATE: f64 = 0.005 * PI;
