/// Orientation of the orbit target about its vertical axis.
///
/// `angle` is stored unbounded so continuous rotation never jumps; it is only
/// reduced to `[0, 2π)` when a stage is looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    angle: f64,
    velocity: f64,
}

impl RotationState {
    pub fn new(angle: f64) -> Self {
        Self {
            angle,
            velocity: 0.0,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Signed angular velocity in radians per tick.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
    }

    pub fn advance(&mut self, delta: f64) {
        self.angle += delta;
    }

    /// Decay velocity by `factor`, zeroing it once it drops below `epsilon`.
    /// Returns the velocity left after damping.
    pub fn damp(&mut self, factor: f64, epsilon: f64) -> f64 {
        self.velocity *= factor;
        if self.velocity.abs() < epsilon {
            self.velocity = 0.0;
        }
        self.velocity
    }
}
