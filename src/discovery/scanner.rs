//! File system scanner for level files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;

/// Recursively collect level files under `root`, sorted by path.
///
/// A missing root yields nothing.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let mut levels: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| manifest.is_level_file(p) && !manifest.is_excluded(p))
        .collect();

    levels.sort();
    levels
}

/// Scan every source path, resolving relative ones against `base_path`.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    let mut levels = Vec::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        for level in scan_directory(&source_path, manifest) {
            if !levels.contains(&level) {
                levels.push(level);
            }
        }
    }

    levels
}
