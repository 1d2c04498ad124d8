pub mod build;
pub mod check;
pub mod completions;
pub mod watch;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::bake::OutputLayout;
use crate::discovery::{discover, discover_paths, load_manifest, Manifest};
use crate::error::Result;
use crate::lighting::LightingParams;

/// levelbake - bake text level layouts into scene files and shadow maps
#[derive(Parser, Debug)]
#[command(name = "levelbake")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bake level files into scene JSON, brick maps and shadow maps
    Build(build::BuildArgs),

    /// Parse and validate level files without writing anything
    Check(check::CheckArgs),

    /// Bake, then re-bake level files as they change
    Watch(watch::WatchArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Lighting overrides shared by `build` and `watch`.
#[derive(Args, Debug, Clone, Default)]
pub struct LightingArgs {
    /// Pixels per grid cell
    #[arg(long)]
    pub cell_pixels: Option<u32>,

    /// How far a torch reaches, in pixels
    #[arg(long)]
    pub search_radius: Option<u32>,

    /// Shadow softening radius, in pixels (0 disables)
    #[arg(long)]
    pub blur_radius: Option<u32>,

    /// Distance between raymarch samples, in pixels
    #[arg(long)]
    pub ray_stride: Option<f64>,
}

impl LightingArgs {
    /// Apply flags on top of manifest values.
    pub fn apply(&self, base: LightingParams) -> LightingParams {
        LightingParams {
            cell_pixels: self.cell_pixels.unwrap_or(base.cell_pixels),
            search_radius: self.search_radius.unwrap_or(base.search_radius),
            blur_radius: self.blur_radius.unwrap_or(base.blur_radius),
            ray_stride: self.ray_stride.unwrap_or(base.ray_stride),
        }
    }
}

/// Everything a bake run needs, resolved from manifest and flags.
#[derive(Debug, Clone)]
pub struct Plan {
    pub root: PathBuf,
    pub manifest: Manifest,
    pub levels: Vec<PathBuf>,
    pub layout: OutputLayout,
    pub params: LightingParams,
}

impl Plan {
    /// Resolve a plan for the project at `root`.
    ///
    /// With no explicit paths the manifest (or a full scan) picks the
    /// levels; otherwise the given files and directories are used, still
    /// honouring the manifest's output and lighting settings.
    pub fn resolve(
        root: &Path,
        paths: &[PathBuf],
        output: Option<&PathBuf>,
        lighting: &LightingArgs,
    ) -> Result<Self> {
        let (manifest, levels) = if paths.is_empty() {
            let found = discover(root)?;
            (found.manifest, found.levels)
        } else {
            let manifest = load_manifest(root)?.unwrap_or_default();
            let levels = discover_paths(paths, &manifest);
            (manifest, levels)
        };

        let mut layout = manifest.layout(root);
        if let Some(output) = output {
            layout.base = Some(output.clone());
        }

        let params = lighting.apply(manifest.lighting);
        params.validate()?;

        Ok(Self {
            root: root.to_path_buf(),
            manifest,
            levels,
            layout,
            params,
        })
    }
}
