use crate::constants::render_settings::{
    AMBIENT_BRIGHTNESS, CAMERA_LOOK_AT, CAMERA_POSITION, SUN_ILLUMINANCE,
};
use crate::engine::orbit::OrbitTarget;
use bevy::prelude::*;

/// Spawn the rotating diorama node. The glTF scene is attached as a child so
/// the orbit controller only ever touches this node's transform.
pub fn spawn_diorama(commands: &mut Commands, asset_server: &AssetServer, model_path: &str) {
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(model_path.to_string()));

    commands
        .spawn((
            Name::new("Diorama"),
            OrbitTarget,
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn(SceneRoot(scene));
        });
}

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: SUN_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

pub fn spawn_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_POSITION).looking_at(CAMERA_LOOK_AT, Vec3::Y),
    ));
}
