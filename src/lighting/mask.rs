//! Opacity mask rasterization.

use crate::error::{BakeError, Result};
use crate::types::LevelModel;

/// Pixel-resolution occlusion grid. `true` blocks light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpacityMask {
    width: u32,
    height: u32,
    opaque: Vec<bool>,
}

impl OpacityMask {
    /// A fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            opaque: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel blocks light. Pixels outside the mask never do.
    pub fn is_opaque(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.opaque[y as usize * self.width as usize + x as usize]
    }

    /// Mark a rectangle opaque, clipped to the mask.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        let stride = self.width as usize;
        for py in y..y_end {
            let row = py as usize * stride;
            self.opaque[row + x as usize..row + x_end as usize].fill(true);
        }
    }

    /// Number of opaque pixels.
    pub fn opaque_count(&self) -> usize {
        self.opaque.iter().filter(|&&o| o).count()
    }
}

/// Rasterize a level's bricks into an opacity mask.
///
/// The mask is `width * cell_pixels` by `height * cell_pixels`; each brick
/// covers its whole cell.
pub fn build_mask(level: &LevelModel, cell_pixels: u32) -> Result<OpacityMask> {
    if cell_pixels == 0 {
        return Err(BakeError::invalid(
            "cell_pixels must be at least 1",
            "The default is 64 pixels per grid cell",
        ));
    }

    let (width, height) = canvas_size(level, cell_pixels)?;
    let mut mask = OpacityMask::new(width, height);

    for brick in &level.bricks {
        mask.fill_rect(
            brick.pos.x as u32 * cell_pixels,
            brick.pos.y as u32 * cell_pixels,
            cell_pixels,
            cell_pixels,
        );
    }

    Ok(mask)
}

fn canvas_size(level: &LevelModel, cell_pixels: u32) -> Result<(u32, u32)> {
    let scale = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|c| c.checked_mul(cell_pixels))
    };
    match (scale(level.size.width), scale(level.size.height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(BakeError::invalid(
            format!(
                "a {}x{} grid at {} pixels per cell is too large",
                level.size.width, level.size.height, cell_pixels
            ),
            "Use a smaller cell size",
        )),
    }
}
