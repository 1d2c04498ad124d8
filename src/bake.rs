//! Single-level bake pipeline.
//!
//! Parse → mask → visibility → refine, then encode and write the scene file,
//! brick map and shadow map. Outputs are staged in temporary files next to
//! their destinations and only persisted once all three encoded cleanly, so a
//! failed level never leaves a partial set behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tempfile::NamedTempFile;

use crate::error::{BakeError, Result};
use crate::lighting::{build_mask, refine, LightingBuffer, LightingParams, OpacityMask, VisibilityEngine};
use crate::parser::{parse_layout, ParsedLayout};
use crate::render::{encode_png, lighting_image, mask_image, scene_json};

/// Where a level's outputs go, relative to a base directory.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLayout {
    /// Base directory. `None` uses each level file's own directory.
    pub base: Option<PathBuf>,
    /// Subdirectory for scene JSON files.
    pub scene_dir: PathBuf,
    /// Subdirectory for brick and shadow maps.
    pub shadow_dir: PathBuf,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            base: None,
            scene_dir: PathBuf::from("json"),
            shadow_dir: PathBuf::from("shadow"),
        }
    }
}

/// Output file paths for one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub scene: PathBuf,
    pub brickmap: PathBuf,
    pub shadowmap: PathBuf,
}

impl OutputPaths {
    /// Resolve output paths for a level file.
    ///
    /// `levels/cave.txt` maps to `levels/json/cave.json`,
    /// `levels/shadow/cave_brickmap.png` and `levels/shadow/cave_shadowmap.png`
    /// under the default layout.
    pub fn for_level(level_path: &Path, layout: &OutputLayout) -> Result<Self> {
        let name = level_path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| BakeError::Io {
                path: level_path.to_path_buf(),
                message: "Level path has no file name".to_string(),
            })?;

        let base = match &layout.base {
            Some(base) => base.clone(),
            None => level_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        };

        let scene_dir = base.join(&layout.scene_dir);
        let shadow_dir = base.join(&layout.shadow_dir);

        Ok(Self {
            scene: scene_dir.join(format!("{}.json", name)),
            brickmap: shadow_dir.join(format!("{}_brickmap.png", name)),
            shadowmap: shadow_dir.join(format!("{}_shadowmap.png", name)),
        })
    }

    /// In persist order: maps first, scene last.
    fn all(&self) -> [&Path; 3] {
        [&self.brickmap, &self.shadowmap, &self.scene]
    }
}

/// Every intermediate product of baking one level.
#[derive(Debug, Clone)]
pub struct BakedLevel {
    pub parsed: ParsedLayout,
    pub mask: OpacityMask,
    /// Binary visibility before softening.
    pub raw: LightingBuffer,
    /// Final lighting map.
    pub lighting: LightingBuffer,
}

/// Run the lighting pipeline on level source text.
pub fn bake_source(source: &str, params: &LightingParams) -> Result<BakedLevel> {
    let engine = VisibilityEngine::new(params)?;

    let started = Instant::now();
    let parsed = parse_layout(source)?;
    let mask = build_mask(&parsed.level, params.cell_pixels)?;
    log::debug!(
        "parsed {}x{} grid with {} brick(s), mask {}x{}",
        parsed.level.size.width,
        parsed.level.size.height,
        parsed.level.bricks.len(),
        mask.width(),
        mask.height()
    );

    let raw = engine.compute(&mask, &parsed.level.torches);
    log::debug!(
        "visibility: {} lit pixel(s) after {:?}",
        raw.lit_count(),
        started.elapsed()
    );

    let lighting = refine(&raw, params.blur_radius);
    log::debug!("refined lighting after {:?}", started.elapsed());

    Ok(BakedLevel {
        parsed,
        mask,
        raw,
        lighting,
    })
}

/// Encoded file contents for one level.
#[derive(Debug, Clone)]
pub struct EncodedLevel {
    pub scene: String,
    pub brickmap: Vec<u8>,
    pub shadowmap: Vec<u8>,
}

/// Encode a baked level into its three output files.
pub fn encode_level(baked: &BakedLevel) -> Result<EncodedLevel> {
    Ok(EncodedLevel {
        scene: scene_json(&baked.parsed.level)?,
        brickmap: encode_png(&mask_image(&baked.mask))?,
        shadowmap: encode_png(&lighting_image(&baked.lighting)?)?,
    })
}

/// Write all outputs, or none of them.
///
/// The maps are persisted before the scene file, so a scene never lands
/// without its maps. If a later persist fails, the files this call already
/// persisted are removed; outputs left by an earlier bake are not restored.
pub fn write_outputs(encoded: &EncodedLevel, paths: &OutputPaths) -> Result<()> {
    let contents: [&[u8]; 3] = [
        &encoded.brickmap,
        &encoded.shadowmap,
        encoded.scene.as_bytes(),
    ];

    let mut staged = Vec::with_capacity(3);
    for (path, bytes) in paths.all().into_iter().zip(contents) {
        staged.push((stage(path, bytes)?, path));
    }

    let mut persisted: Vec<&Path> = Vec::with_capacity(3);
    for (file, path) in staged {
        if let Err(e) = file.persist(path) {
            for done in &persisted {
                let _ = fs::remove_file(done);
            }
            return Err(BakeError::Io {
                path: path.to_path_buf(),
                message: format!("Failed to write output: {}", e.error),
            });
        }
        persisted.push(path);
    }

    Ok(())
}

/// Write bytes to a temporary file in the destination's directory.
fn stage(path: &Path, bytes: &[u8]) -> Result<NamedTempFile> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(dir).map_err(|e| BakeError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| BakeError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to create temporary file: {}", e),
    })?;
    file.write_all(bytes).map_err(|e| BakeError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to stage output: {}", e),
    })?;

    Ok(file)
}

/// Outcome of baking one level file.
#[derive(Debug, Clone)]
pub struct BakeReport {
    pub paths: OutputPaths,
    pub parsed: ParsedLayout,
    /// Output map size in pixels.
    pub pixel_size: (u32, u32),
}

/// Read, bake and write one level file.
pub fn bake_file(path: &Path, layout: &OutputLayout, params: &LightingParams) -> Result<BakeReport> {
    let source = fs::read_to_string(path).map_err(|e| BakeError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;

    let paths = OutputPaths::for_level(path, layout)?;
    let baked = bake_source(&source, params)?;
    let encoded = encode_level(&baked)?;
    write_outputs(&encoded, &paths)?;

    Ok(BakeReport {
        paths,
        pixel_size: (baked.lighting.width(), baked.lighting.height()),
        parsed: baked.parsed,
    })
}
