//! Shadow softening.
//!
//! The raw visibility buffer is binary. A separable Gaussian blur turns hard
//! shadow edges into penumbrae, then a 2x brightness remap restores full
//! intensity in the core of lit areas while keeping the gradient at edges.

use rayon::prelude::*;

use super::LightingBuffer;

/// Normalized 1D Gaussian kernel with standard deviation `radius`.
///
/// The kernel spans `3 * radius` taps on each side. A radius of zero yields
/// the identity kernel `[1.0]`.
pub fn gaussian_kernel(radius: u32) -> Vec<f32> {
    if radius == 0 {
        return vec![1.0];
    }

    let sigma = radius as f32;
    let half = 3 * radius as i64;
    let mut kernel: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();

    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Blur a buffer with a separable Gaussian. Edge pixels are extended.
pub fn blur(buffer: &LightingBuffer, radius: u32) -> LightingBuffer {
    if radius == 0 || buffer.is_empty() {
        return buffer.clone();
    }

    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let kernel = gaussian_kernel(radius);
    let half = (kernel.len() / 2) as i64;
    let src = buffer.as_raw();

    let mut horizontal = vec![0.0f32; width * height];
    horizontal
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let line = &src[y * width..(y + 1) * width];
            for (x, out) in row.iter_mut().enumerate() {
                *out = kernel
                    .iter()
                    .enumerate()
                    .map(|(k, w)| {
                        let sx = clamp_index(x as i64 + k as i64 - half, width);
                        w * line[sx] as f32
                    })
                    .sum();
            }
        });

    let mut out = LightingBuffer::new(buffer.width(), buffer.height());
    out.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                let v: f32 = kernel
                    .iter()
                    .enumerate()
                    .map(|(k, w)| {
                        let sy = clamp_index(y as i64 + k as i64 - half, height);
                        w * horizontal[sy * width + x]
                    })
                    .sum();
                *pixel = v.round().clamp(0.0, 255.0) as u8;
            }
        });

    out
}

/// Double every intensity, saturating at 255.
pub fn remap(buffer: &LightingBuffer) -> LightingBuffer {
    let mut out = buffer.clone();
    out.data_mut()
        .par_iter_mut()
        .for_each(|v| *v = v.saturating_mul(2));
    out
}

/// Blur then remap a raw visibility buffer into the final lighting map.
pub fn refine(raw: &LightingBuffer, blur_radius: u32) -> LightingBuffer {
    remap(&blur(raw, blur_radius))
}

fn clamp_index(i: i64, len: usize) -> usize {
    i.clamp(0, len as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighting::LIT;

    fn buffer(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> LightingBuffer {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        LightingBuffer::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        let kernel = gaussian_kernel(4);
        assert_eq!(kernel.len(), 25);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..kernel.len() / 2 {
            assert_eq!(kernel[i], kernel[kernel.len() - 1 - i]);
        }
        assert!(kernel[12] > kernel[11]);
    }

    #[test]
    fn test_zero_radius_kernel_is_identity() {
        assert_eq!(gaussian_kernel(0), vec![1.0]);
    }

    #[test]
    fn test_zero_radius_refine_is_pure_remap() {
        let raw = buffer(5, 3, |x, y| [0, 100, 127, 128, LIT][((x + y) % 5) as usize]);
        let refined = refine(&raw, 0);
        for (r, f) in raw.as_raw().iter().zip(refined.as_raw()) {
            assert_eq!(*f as u16, (*r as u16 * 2).min(255));
        }
    }

    #[test]
    fn test_uniform_buffers_are_stable() {
        let lit = buffer(20, 12, |_, _| LIT);
        assert_eq!(blur(&lit, 3), lit);

        let dark = buffer(20, 12, |_, _| 0);
        assert_eq!(refine(&dark, 3), dark);
    }

    #[test]
    fn test_blur_spreads_symmetrically() {
        let raw = buffer(21, 21, |x, y| if x == 10 && y == 10 { LIT } else { 0 });
        let blurred = blur(&raw, 2);

        let center = blurred.get(10, 10).unwrap();
        assert!(center < LIT);
        for d in 1..=4 {
            assert_eq!(blurred.get(10 - d, 10), blurred.get(10 + d, 10));
            assert_eq!(blurred.get(10, 10 - d), blurred.get(10, 10 + d));
            assert!(blurred.get(10 + d, 10).unwrap() <= center);
        }
        assert_eq!(blurred.get(0, 0), Some(0));
    }

    #[test]
    fn test_refine_softens_shadow_edge() {
        // Left half lit, right half dark.
        let raw = buffer(64, 4, |x, _| if x < 32 { LIT } else { 0 });
        let refined = refine(&raw, 4);

        assert_eq!(refined.get(0, 2), Some(LIT));
        assert_eq!(refined.get(63, 2), Some(0));
        // Just inside the shadow the blur leaks light in.
        let penumbra = refined.get(34, 2).unwrap();
        assert!(penumbra > 0 && penumbra < LIT);
        // Brightness never increases moving into the shadow.
        for x in 1..64 {
            assert!(refined.get(x, 2).unwrap() <= refined.get(x - 1, 2).unwrap());
        }
    }

    #[test]
    fn test_remap_saturates() {
        let raw = LightingBuffer::from_raw(4, 1, vec![0, 1, 128, 200]).unwrap();
        assert_eq!(remap(&raw).as_raw(), &[0, 2, 255, 255]);
    }
}
