//! Scene composition around the orbit target.
//!
//! Places the camera and lights, hands the diorama model to Bevy's glTF
//! loader under a single rotating node, and draws the native stage overlay.

/// Camera, lighting and the rotating diorama node.
pub mod diorama;

/// Native stage indicator updated from stage change events.
pub mod stage_overlay;
