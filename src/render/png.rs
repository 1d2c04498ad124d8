//! PNG output for lighting data.
//!
//! Both maps are written as 8-bit grayscale images at pixel resolution.

use std::io::Cursor;

use image::{GrayImage, ImageBuffer, ImageFormat, Luma};

use crate::error::{BakeError, Result};
use crate::lighting::{LightingBuffer, OpacityMask};

/// Brick map image: black where a brick blocks light, white elsewhere.
pub fn mask_image(mask: &OpacityMask) -> GrayImage {
    ImageBuffer::from_fn(mask.width(), mask.height(), |x, y| {
        if mask.is_opaque(x as i64, y as i64) {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// Lighting map image: one grayscale intensity per pixel.
pub fn lighting_image(buffer: &LightingBuffer) -> Result<GrayImage> {
    GrayImage::from_raw(buffer.width(), buffer.height(), buffer.as_raw().to_vec()).ok_or_else(
        || BakeError::Build {
            message: format!(
                "lighting buffer does not fit a {}x{} image",
                buffer.width(),
                buffer.height()
            ),
            help: None,
        },
    )
}

/// Encode a grayscale image as PNG bytes.
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| BakeError::Build {
            message: format!("Failed to encode PNG: {}", e),
            help: None,
        })?;
    Ok(bytes)
}
