use super::error::OrbitConfigError;
use constants::orbit::{
    AUTO_ROTATION_RATE, DAMPING_FACTOR, DRAG_SENSITIVITY, KEY_STEP, KEY_VELOCITY_LEFT,
    KEY_VELOCITY_RIGHT, VELOCITY_EPSILON,
};
use serde::{Deserialize, Serialize};

/// Named tuning parameters for the orbit controller.
///
/// Every field may be overridden individually from the diorama manifest; the
/// remaining fields fall back to the shared constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    /// Radians per full viewport width of drag.
    pub drag_sensitivity: f64,
    /// Radians per arrow key step.
    pub key_step: f64,
    pub key_velocity_left: f64,
    pub key_velocity_right: f64,
    pub damping_factor: f64,
    pub velocity_epsilon: f64,
    /// Added to the angle every idle tick. Zero disables auto-rotation.
    pub auto_rotation_rate: f64,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            drag_sensitivity: DRAG_SENSITIVITY,
            key_step: KEY_STEP,
            key_velocity_left: KEY_VELOCITY_LEFT,
            key_velocity_right: KEY_VELOCITY_RIGHT,
            damping_factor: DAMPING_FACTOR,
            velocity_epsilon: VELOCITY_EPSILON,
            auto_rotation_rate: AUTO_ROTATION_RATE,
        }
    }
}

impl OrbitSettings {
    pub fn validate(&self) -> Result<(), OrbitConfigError> {
        let parameters = [
            ("drag_sensitivity", self.drag_sensitivity),
            ("key_step", self.key_step),
            ("key_velocity_left", self.key_velocity_left),
            ("key_velocity_right", self.key_velocity_right),
            ("damping_factor", self.damping_factor),
            ("velocity_epsilon", self.velocity_epsilon),
            ("auto_rotation_rate", self.auto_rotation_rate),
        ];
        if let Some((name, value)) = parameters.iter().find(|(_, value)| !value.is_finite()) {
            return Err(OrbitConfigError::NonFiniteParameter {
                name: *name,
                value: *value,
            });
        }
        if !(0.0..1.0).contains(&self.damping_factor) {
            return Err(OrbitConfigError::DampingOutOfRange(self.damping_factor));
        }
        if self.velocity_epsilon <= 0.0 {
            return Err(OrbitConfigError::NonPositiveEpsilon(self.velocity_epsilon));
        }
        Ok(())
    }
}
