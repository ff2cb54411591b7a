use bevy::math::Vec3;

pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 6.0, 14.0);
pub const CAMERA_LOOK_AT: Vec3 = Vec3::new(0.0, 1.0, 0.0);

pub const AMBIENT_BRIGHTNESS: f32 = 400.0;
pub const SUN_ILLUMINANCE: f32 = 8_000.0;

/// CSS selector of the canvas the viewer mounts on in web builds.
pub const CANVAS_SELECTOR: &str = "#bevy";

pub const OVERLAY_FONT_SIZE: f32 = 16.0;
