//! Orbit interaction for the diorama model.
//!
//! Turns drag, touch, and arrow key input into a damped rotation of a single
//! transform about the vertical axis, auto-rotates while idle, and reports
//! which stage of the diorama currently faces the viewer.
//!
//! ## Frame Flow
//!
//! ```text
//! WindowEvent stream ──> PointerTracker ──> OrbitInput
//!                                              │
//!                                              ▼
//!                     OrbitController (RotationState, DragSession)
//!                                              │ tick()
//!                         ┌────────────────────┼──────────────────────┐
//!                         ▼                    ▼                      ▼
//!                 OrbitTarget rotation   StageChanged event   RPC notifications
//! ```
//!
//! The controller itself has no Bevy knowledge. `OrbitControllerState` wraps
//! it as a resource between attach (manifest resolved) and detach
//! (`DetachOrbit` event).

/// Single-pointer drag tracking.
pub mod drag_session;

/// Typed errors for rejected input and invalid configuration.
pub mod error;

/// Translation of Bevy window events into controller input.
pub mod input;

/// The framework-free orbit controller.
pub mod orbit_controller;

/// Unbounded angle and angular velocity storage.
pub mod rotation_state;

/// Named tuning parameters with manifest overrides.
pub mod settings;

/// Angle normalization and stage lookup table.
pub mod stage;

/// Bevy systems driving the controller once per frame.
pub mod systems;

use bevy::prelude::*;

pub use orbit_controller::OrbitController;
pub use settings::OrbitSettings;
pub use stage::{StageRange, StageTable, normalize_angle};
pub use systems::{DetachOrbit, OrbitControllerState, OrbitTarget, StageChanged};

use systems::{
    advance_orbit, apply_orbit_rotation, detach_orbit_controller, process_orbit_input,
    publish_orbit_changes,
};

/// Registers orbit events and the per-frame controller systems.
pub struct OrbitPlugin;

impl Plugin for OrbitPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<StageChanged>()
            .add_event::<DetachOrbit>()
            .add_systems(
                Update,
                (
                    process_orbit_input,
                    advance_orbit,
                    apply_orbit_rotation,
                    publish_orbit_changes,
                    detach_orbit_controller,
                )
                    .chain()
                    .run_if(resource_exists::<OrbitControllerState>),
            );
    }
}
