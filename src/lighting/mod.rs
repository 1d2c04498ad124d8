//! Lighting map generation.
//!
//! The pipeline is a linear chain of pure transforms:
//!
//! 1. [`build_mask`]: rasterize bricks into a pixel-resolution [`OpacityMask`]
//! 2. [`VisibilityEngine::compute`]: mark every pixel some torch can see
//! 3. [`refine`]: soften the binary map with a Gaussian blur and brighten it
//!
//! Torches are static, so everything here runs once per level at bake time.

mod buffer;
mod mask;
mod postprocess;
mod visibility;

use serde::{Deserialize, Serialize};

use crate::error::{BakeError, Result};

pub use buffer::{LightingBuffer, LIT};
pub use mask::{build_mask, OpacityMask};
pub use postprocess::{blur, gaussian_kernel, refine, remap};
pub use visibility::{light_pixel, ray_step, VisibilityEngine};

/// Pixels per grid cell along each axis.
pub const DEFAULT_CELL_PIXELS: u32 = 64;

/// Half-width of the square a torch can light, in pixels (six cells).
pub const DEFAULT_SEARCH_RADIUS: u32 = 384;

/// Gaussian standard deviation used to soften shadow edges, in pixels.
pub const DEFAULT_BLUR_RADIUS: u32 = 16;

/// Distance between raymarch samples along the dominant axis, in pixels.
///
/// Occluders thinner than this along a ray can be stepped over.
pub const DEFAULT_RAY_STRIDE: f64 = 10.0;

/// Tunable lighting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingParams {
    pub cell_pixels: u32,
    pub search_radius: u32,
    pub blur_radius: u32,
    pub ray_stride: f64,
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            cell_pixels: DEFAULT_CELL_PIXELS,
            search_radius: DEFAULT_SEARCH_RADIUS,
            blur_radius: DEFAULT_BLUR_RADIUS,
            ray_stride: DEFAULT_RAY_STRIDE,
        }
    }
}

impl LightingParams {
    /// Reject parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cell_pixels == 0 {
            return Err(BakeError::invalid(
                "cell_pixels must be at least 1",
                "The default is 64 pixels per grid cell",
            ));
        }
        if !self.ray_stride.is_finite() || self.ray_stride <= 0.0 {
            return Err(BakeError::invalid(
                format!("ray_stride must be a positive number, got {}", self.ray_stride),
                "The default is 10.0 pixels between samples",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = LightingParams::default();
        assert_eq!(params.cell_pixels, 64);
        assert_eq!(params.search_radius, 384);
        assert_eq!(params.blur_radius, 16);
        assert_eq!(params.ray_stride, 10.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_cell() {
        let params = LightingParams {
            cell_pixels: 0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(BakeError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_stride() {
        for stride in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let params = LightingParams {
                ray_stride: stride,
                ..Default::default()
            };
            assert!(params.validate().is_err(), "stride {stride} accepted");
        }
    }

    #[test]
    fn test_params_deserialize_partial() {
        let params: LightingParams = serde_yaml::from_str("blur_radius: 4").unwrap();
        assert_eq!(params.blur_radius, 4);
        assert_eq!(params.cell_pixels, DEFAULT_CELL_PIXELS);
    }
}
