use crate::constants::path::DIORAMA_MANIFEST_PATH;
use crate::engine::assets::diorama_manifest::DioramaManifest;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::orbit::{OrbitController, OrbitControllerState, OrbitSettings, StageTable};
use crate::engine::scene::diorama::spawn_diorama;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::asset::LoadState;
use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<DioramaManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    manifest_loader.handle = Some(asset_server.load(DIORAMA_MANIFEST_PATH));
}

/// Attach the orbit controller and spawn the diorama once the manifest has
/// resolved. A manifest that fails to load or validate falls back to the
/// built-in defaults so the viewer always becomes interactive.
pub fn attach_orbit_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<DioramaManifest>>,
    asset_server: Res<AssetServer>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut commands: Commands,
) {
    if loading_progress.controller_attached {
        return;
    }
    let Some(handle) = manifest_loader.handle.as_ref() else {
        return;
    };

    let manifest = if let Some(manifest) = manifests.get(handle) {
        info!("✓ Diorama manifest loaded");
        manifest.clone()
    } else if matches!(
        asset_server.get_load_state(handle),
        Some(LoadState::Failed(_))
    ) {
        warn!(
            "Diorama manifest {} failed to load; using built-in defaults",
            DIORAMA_MANIFEST_PATH
        );
        DioramaManifest::default()
    } else {
        return;
    };
    loading_progress.manifest_resolved = true;

    let controller = manifest.build_controller().unwrap_or_else(|error| {
        warn!("Invalid diorama manifest: {}; using built-in orbit tuning", error);
        OrbitController::attach(OrbitSettings::default(), StageTable::default(), 0.0)
    });

    rpc_interface.send_notification(
        "orbit_ready",
        serde_json::json!({
            "angle": controller.angle(),
            "stages": controller.stages(),
        }),
    );
    info!(
        "Orbit controller attached with {} stages",
        controller.stages().ranges().len()
    );

    spawn_diorama(&mut commands, &asset_server, &manifest.model);
    commands.insert_resource(OrbitControllerState(controller));
    loading_progress.controller_attached = true;
}
