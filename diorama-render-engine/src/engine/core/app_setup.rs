use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::diorama_manifest::DioramaManifest;
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{
    ManifestLoader, attach_orbit_when_ready, start_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::orbit::OrbitPlugin;
use crate::engine::scene::diorama::{spawn_camera, spawn_lighting};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::scene::stage_overlay::{spawn_stage_overlay, stage_text_update_system};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers DioramaManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<DioramaManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(OrbitPlugin);

    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (attach_orbit_when_ready, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    // The host page renders the stage indicator in web builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, stage_text_update_system);
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    spawn_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        spawn_stage_overlay(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
