use super::input::PointerTracker;
use super::orbit_controller::{OrbitController, StageChange};
use super::stage::normalize_angle;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowEvent};

/// The attached controller. Present only between attach and detach.
#[derive(Resource, Deref, DerefMut)]
pub struct OrbitControllerState(pub OrbitController);

/// Marks the transform node rotated by the orbit controller.
#[derive(Component, Default)]
pub struct OrbitTarget;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StageChanged(pub StageChange);

/// Requests release of the attached controller.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct DetachOrbit;

/// Feed window input to the controller in delivery order.
pub fn process_orbit_input(
    mut window_events: EventReader<WindowEvent>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut orbit: ResMut<OrbitControllerState>,
    mut tracker: Local<PointerTracker>,
) {
    // A missing window yields width 0, which the controller rejects for drags.
    let viewport_width = windows
        .single()
        .map(|window| f64::from(window.width()))
        .unwrap_or(0.0);

    for event in window_events.read() {
        let Some(input) = tracker.translate(event) else {
            continue;
        };
        if let Err(error) = orbit.handle(input, viewport_width) {
            debug!("Skipped orbit input {:?}: {}", input, error);
        }
    }
}

pub fn advance_orbit(
    mut orbit: ResMut<OrbitControllerState>,
    mut stage_events: EventWriter<StageChanged>,
) {
    if let Some(change) = orbit.tick() {
        info!(
            "Orbit stage changed: {:?} -> {:?}",
            change.previous, change.current
        );
        stage_events.write(StageChanged(change));
    }
}

pub fn apply_orbit_rotation(
    orbit: Res<OrbitControllerState>,
    mut targets: Query<&mut Transform, With<OrbitTarget>>,
) {
    // The unbounded angle stays in f64; only the wrapped value is narrowed.
    let rotation = Quat::from_rotation_y(normalize_angle(orbit.angle()) as f32);
    for mut transform in &mut targets {
        transform.rotation = rotation;
    }
}

/// Forward stage and manual-rotation changes to the host page.
pub fn publish_orbit_changes(
    orbit: Res<OrbitControllerState>,
    mut stage_events: EventReader<StageChanged>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut was_manual: Local<bool>,
) {
    for StageChanged(change) in stage_events.read() {
        rpc_interface.send_notification(
            "stage_changed",
            serde_json::json!({
                "stage": change.current,
                "previous": change.previous,
            }),
        );
    }

    let manual = orbit.is_manual_rotation();
    if manual != *was_manual {
        *was_manual = manual;
        rpc_interface.send_notification(
            "manual_rotation_changed",
            serde_json::json!({ "active": manual }),
        );
    }
}

pub fn detach_orbit_controller(mut requests: EventReader<DetachOrbit>, mut commands: Commands) {
    if requests.read().count() == 0 {
        return;
    }

    commands.queue(|world: &mut World| {
        let Some(OrbitControllerState(controller)) =
            world.remove_resource::<OrbitControllerState>()
        else {
            return;
        };
        let rotation = controller.detach();
        info!("Orbit controller detached at angle {:.4}", rotation.angle());

        if let Some(mut rpc_interface) = world.get_resource_mut::<WebRpcInterface>() {
            rpc_interface.send_notification(
                "orbit_detached",
                serde_json::json!({ "angle": rotation.angle() }),
            );
        }
    });
}
