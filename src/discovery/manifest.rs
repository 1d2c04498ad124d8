//! Project manifest (`levelbake.yaml`) parsing.
//!
//! The manifest names where level files live, where outputs go, and the
//! lighting parameters to bake with.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bake::OutputLayout;
use crate::error::{BakeError, Result};
use crate::lighting::LightingParams;

/// Project manifest loaded from `levelbake.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Source directories to scan for levels. Defaults to the project root.
    pub sources: Vec<String>,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,

    /// Level file extension, without the dot.
    pub extension: String,

    /// Base output directory. Unset writes next to each level.
    pub output: Option<PathBuf>,

    /// Subdirectory for scene JSON files.
    pub scene_dir: PathBuf,

    /// Subdirectory for brick and shadow maps.
    pub shadow_dir: PathBuf,

    pub lighting: LightingParams,
}

impl Default for Manifest {
    fn default() -> Self {
        let layout = OutputLayout::default();
        Self {
            sources: vec![],
            excludes: vec![],
            extension: "txt".to_string(),
            output: None,
            scene_dir: layout.scene_dir,
            shadow_dir: layout.shadow_dir,
            lighting: LightingParams::default(),
        }
    }
}

impl Manifest {
    /// Load manifest from a `levelbake.yaml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BakeError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_str(content).map_err(|e| BakeError::Manifest {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check levelbake.yaml syntax".to_string()),
        })?;

        manifest.lighting.validate().map_err(|e| BakeError::Manifest {
            message: format!("Invalid lighting settings: {}", e),
            help: Some("Check the `lighting` block of levelbake.yaml".to_string()),
        })?;

        Ok(manifest)
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }

    /// Whether a file has the configured level extension.
    pub fn is_level_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }

    /// Get effective source paths, defaulting to the project root.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }

    /// Output layout described by this manifest, resolved against `root`.
    pub fn layout(&self, root: &Path) -> OutputLayout {
        OutputLayout {
            base: self.output.as_ref().map(|out| {
                if out.is_absolute() {
                    out.clone()
                } else {
                    root.join(out)
                }
            }),
            scene_dir: self.scene_dir.clone(),
            shadow_dir: self.shadow_dir.clone(),
        }
    }
}

/// Minimal glob matching: `**/dir/*`, `*suffix`, `dir/*`, or substring.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(rest) = pattern.strip_prefix("**/") {
        if let Some(dir) = rest.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
        }
        return path.contains(rest);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !suffix.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(dir) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
    }

    path.contains(pattern)
}
