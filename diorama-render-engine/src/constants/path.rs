/// Diorama manifest with model path, orbit tuning and stage table overrides.
pub const DIORAMA_MANIFEST_PATH: &str = "diorama/manifest.json";

/// glTF model used when the manifest is missing or names no model.
pub const DEFAULT_MODEL_PATH: &str = "diorama/island.glb";
