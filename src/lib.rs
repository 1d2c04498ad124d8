//! levelbake - offline level baker
//!
//! Turns plain-text level layouts into a scene description (JSON) plus two
//! grayscale maps: a brick map marking opaque cells and a shadow map holding
//! precomputed torch lighting.

pub mod bake;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod lighting;
pub mod output;
pub mod parser;
pub mod render;
pub mod types;
pub mod validation;

pub use bake::{bake_file, bake_source, BakeReport, BakedLevel, OutputLayout, OutputPaths};
pub use discovery::{discover, discover_paths, DiscoveryResult, Manifest};
pub use error::{BakeError, Result};
pub use lighting::{LightingBuffer, LightingParams, OpacityMask, VisibilityEngine};
pub use parser::{parse_layout, parse_level, ParsedLayout};
pub use render::scene_json;
pub use types::{Brick, BrickColour, Door, EntityKind, LevelModel, Position, Sign, Size};
pub use validation::{validate_level, Diagnostic, Severity, ValidationResult};
