//! Scene JSON output.

use crate::error::{BakeError, Result};
use crate::types::LevelModel;

/// Serialize a level to the scene JSON read by the game's level loader.
pub fn scene_json(level: &LevelModel) -> Result<String> {
    serde_json::to_string_pretty(level).map_err(|e| BakeError::Build {
        message: format!("Failed to serialize scene: {}", e),
        help: None,
    })
}
