/// Asset paths relative to the Bevy asset root.
pub mod path;

/// Camera, lighting and canvas placement for the diorama view.
pub mod render_settings;
