use crate::constants::path::DEFAULT_MODEL_PATH;
use crate::engine::orbit::error::OrbitConfigError;
use crate::engine::orbit::{OrbitController, OrbitSettings, StageRange, StageTable};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Diorama description loaded from JSON. Mirrors the file structure exactly;
/// every field except `model` is optional.
///
/// ```json
/// {
///   "model": "diorama/island.glb",
///   "initial_angle": 0.0,
///   "orbit": { "auto_rotation_rate": 0.0157 },
///   "stages": [{ "id": 1, "start": 0.85, "end": 1.3 }]
/// }
/// ```
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DioramaManifest {
    pub model: String,
    #[serde(default)]
    pub initial_angle: f64,
    #[serde(default)]
    pub orbit: OrbitSettings,
    /// Stage rows in lookup priority order. Absent means the built-in table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<StageRange>>,
}

impl Default for DioramaManifest {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL_PATH.to_string(),
            initial_angle: 0.0,
            orbit: OrbitSettings::default(),
            stages: None,
        }
    }
}

impl DioramaManifest {
    pub fn stage_table(&self) -> Result<StageTable, OrbitConfigError> {
        match &self.stages {
            Some(ranges) => StageTable::new(ranges.clone()),
            None => Ok(StageTable::default()),
        }
    }

    /// Validate the manifest and attach a controller configured from it.
    pub fn build_controller(&self) -> Result<OrbitController, OrbitConfigError> {
        if !self.initial_angle.is_finite() {
            return Err(OrbitConfigError::NonFiniteParameter {
                name: "initial_angle",
                value: self.initial_angle,
            });
        }
        self.orbit.validate()?;
        let stages = self.stage_table()?;
        Ok(OrbitController::attach(self.orbit, stages, self.initial_angle))
    }
}
