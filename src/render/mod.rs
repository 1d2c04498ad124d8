//! Output encoders for levelbake.
//!
//! Scene files are JSON; brick and lighting maps are grayscale PNGs.

mod png;
mod scene;

pub use png::{encode_png, lighting_image, mask_image};
pub use scene::scene_json;
