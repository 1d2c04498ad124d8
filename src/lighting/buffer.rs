use crate::error::{BakeError, Result};

/// Intensity written for a pixel a torch can see.
pub const LIT: u8 = 255;

/// Row-major grayscale intensity buffer at pixel resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightingBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl LightingBuffer {
    /// A fully dark buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap existing row-major data.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if data.len() != width as usize * height as usize {
            return Err(BakeError::invalid(
                format!(
                    "lighting buffer of {}x{} needs {} values, got {}",
                    width,
                    height,
                    width as usize * height as usize,
                    data.len()
                ),
                "Pass exactly width * height intensities",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Intensity at a pixel, or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Number of pixels at full intensity.
    pub fn lit_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == LIT).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_dark() {
        let buffer = LightingBuffer::new(3, 2);
        assert_eq!(buffer.as_raw(), &[0; 6]);
        assert_eq!(buffer.lit_count(), 0);
    }

    #[test]
    fn test_get_row_major() {
        let buffer = LightingBuffer::from_raw(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(buffer.get(1, 0), Some(2));
        assert_eq!(buffer.get(0, 1), Some(3));
        assert_eq!(buffer.get(2, 0), None);
    }

    #[test]
    fn test_from_raw_length_mismatch() {
        assert!(LightingBuffer::from_raw(2, 2, vec![0; 3]).is_err());
    }
}
