//! Torch line-of-sight.
//!
//! Visibility is an approximate raymarch: from the tested pixel towards the
//! torch, sample the mask every `ray_stride` pixels along the dominant axis
//! and fail on the first opaque sample. Two consequences are part of the
//! output format and pinned by tests:
//!
//! - occluders thinner than the stride can be stepped over;
//! - marching stops once the travelled distance reaches the total distance,
//!   so the torch pixel itself is never sampled.
//!
//! Samples read the mask pixel nearest the sample position, rounding halves
//! away from zero.

use rayon::prelude::*;

use crate::error::Result;
use crate::types::Position;

use super::{LightingBuffer, LightingParams, OpacityMask, LIT};

/// The pixel a torch shines from: the top-left pixel of its cell.
pub fn light_pixel(torch: Position, cell_pixels: u32) -> (u32, u32) {
    (torch.x as u32 * cell_pixels, torch.y as u32 * cell_pixels)
}

/// Per-sample direction for a ray with deltas `(dx, dy)`.
///
/// The dominant axis moves exactly one unit, the other moves by the slope. A
/// zero dominant delta forces a unit step along that axis.
pub fn ray_step(dx: f64, dy: f64) -> (f64, f64) {
    if dy.abs() > dx.abs() {
        (dx / dy.abs(), dy.signum())
    } else if dx == 0.0 {
        (1.0, 0.0)
    } else {
        (dx.signum(), dy / dx.abs())
    }
}

/// Computes binary torch visibility over an opacity mask.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityEngine {
    cell_pixels: u32,
    search_radius: u32,
    ray_stride: f64,
}

impl VisibilityEngine {
    /// Create an engine from validated lighting parameters.
    pub fn new(params: &LightingParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            cell_pixels: params.cell_pixels,
            search_radius: params.search_radius,
            ray_stride: params.ray_stride,
        })
    }

    /// Whether `to` can be seen from `from` through the mask.
    pub fn is_visible(&self, mask: &OpacityMask, from: (u32, u32), to: (u32, u32)) -> bool {
        if from == to {
            return true;
        }

        let (ax, ay) = (from.0 as f64, from.1 as f64);
        let dx = to.0 as f64 - ax;
        let dy = to.1 as f64 - ay;
        let total = dx.hypot(dy);

        let (step_x, step_y) = ray_step(dx, dy);
        let (step_x, step_y) = (step_x * self.ray_stride, step_y * self.ray_stride);

        let mut k = 0.0;
        loop {
            let x = ax + k * step_x;
            let y = ay + k * step_y;
            if (x - ax).hypot(y - ay) >= total {
                return true;
            }
            if mask.is_opaque(x.round() as i64, y.round() as i64) {
                return false;
            }
            k += 1.0;
        }
    }

    /// Mark every pixel at least one torch can see.
    ///
    /// Each torch only reaches pixels in the half-open square
    /// `[t - search_radius, t + search_radius)` around its light pixel,
    /// clipped to the mask. Values are exactly `0` or [`LIT`].
    pub fn compute(&self, mask: &OpacityMask, torches: &[Position]) -> LightingBuffer {
        let (width, height) = (mask.width(), mask.height());
        let mut buffer = LightingBuffer::new(width, height);
        if buffer.is_empty() {
            return buffer;
        }

        let lights: Vec<(u32, u32)> = torches
            .iter()
            .map(|&t| light_pixel(t, self.cell_pixels))
            .collect();
        log::debug!(
            "tracing {} torch(es) over {}x{} pixels",
            lights.len(),
            width,
            height
        );

        buffer
            .data_mut()
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                let y = y as u32;
                let active: Vec<(u32, u32)> = lights
                    .iter()
                    .copied()
                    .filter(|&(_, ly)| self.reaches(ly, y, height))
                    .collect();
                if active.is_empty() {
                    return;
                }

                for (x, pixel) in row.iter_mut().enumerate() {
                    let x = x as u32;
                    let lit = active.iter().any(|&(lx, ly)| {
                        self.reaches(lx, x, width) && self.is_visible(mask, (x, y), (lx, ly))
                    });
                    if lit {
                        *pixel = LIT;
                    }
                }
            });

        buffer
    }

    /// Whether coordinate `p` lies in the torch's search span along one axis.
    fn reaches(&self, center: u32, p: u32, limit: u32) -> bool {
        let start = center.saturating_sub(self.search_radius);
        let end = center.saturating_add(self.search_radius).min(limit);
        (start..end).contains(&p)
    }
}
