//! Level file discovery.
//!
//! Finds level files either from a `levelbake.yaml` manifest in the project
//! root or, when none exists, by scanning the whole directory.
//!
//! # Example
//!
//! ```ignore
//! use levelbake::discovery::discover;
//!
//! let result = discover("./game")?;
//! println!("Found {} levels", result.levels.len());
//! ```

mod manifest;
mod scanner;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use manifest::Manifest;
pub use scanner::{scan_directory, scan_sources};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "levelbake.yaml";

/// Result of discovering levels in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if no `levelbake.yaml` found).
    pub manifest: Manifest,

    /// Whether a manifest was found.
    pub has_manifest: bool,

    /// Discovered level files.
    pub levels: Vec<PathBuf>,
}

/// Load the manifest in `root`, if there is one.
pub fn load_manifest(root: &Path) -> Result<Option<Manifest>> {
    let manifest_path = root.join(MANIFEST_FILENAME);
    if manifest_path.exists() {
        Ok(Some(Manifest::load(&manifest_path)?))
    } else {
        Ok(None)
    }
}

/// Discover levels in a project directory.
///
/// Uses the manifest's source paths when a `levelbake.yaml` exists,
/// otherwise scans `root` itself.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let (manifest, has_manifest) = match load_manifest(&root)? {
        Some(manifest) => (manifest, true),
        None => (Manifest::default(), false),
    };

    let levels = scan_sources(&manifest.effective_sources(), &root, &manifest);
    log::debug!(
        "discovered {} level(s) under {} (manifest: {})",
        levels.len(),
        root.display(),
        has_manifest
    );

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        levels,
    })
}

/// Collect levels from explicit paths.
///
/// Files are taken as given regardless of extension; directories are
/// scanned using the manifest's extension and excludes.
pub fn discover_paths(paths: &[PathBuf], manifest: &Manifest) -> Vec<PathBuf> {
    let mut levels = Vec::new();

    for path in paths {
        if path.is_dir() {
            levels.extend(scan_directory(path, manifest));
        } else {
            levels.push(path.clone());
        }
    }

    let mut seen = HashSet::new();
    levels.retain(|level| seen.insert(level.clone()));
    levels
}
