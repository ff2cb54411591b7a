#[cfg(target_arch = "wasm32")]
use crate::constants::render_settings::CANVAS_SELECTOR;
use bevy::prelude::*;
use bevy::window::PresentMode;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some(CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            // Arrow keys and touch drags must not scroll the host page.
            prevent_default_event_handling: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Island Diorama".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
