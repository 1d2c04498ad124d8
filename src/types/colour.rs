//! Brick colour type.
//!
//! Brick colours are sRGB float triples. They never influence opacity or
//! lighting; they are passed through to the scene file untouched.

use palette::Srgb;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// An RGB brick colour with components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickColour(Srgb<f32>);

impl BrickColour {
    /// Create a colour from float components.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self(Srgb::new(r, g, b))
    }

    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn red() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn green() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    pub fn blue() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    pub fn yellow() -> Self {
        Self::new(1.0, 1.0, 0.0)
    }

    pub fn magenta() -> Self {
        Self::new(1.0, 0.0, 1.0)
    }

    pub fn cyan() -> Self {
        Self::new(0.0, 1.0, 1.0)
    }
}

impl Serialize for BrickColour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Colour", 3)?;
        s.serialize_field("r", &self.0.red)?;
        s.serialize_field("g", &self.0.green)?;
        s.serialize_field("b", &self.0.blue)?;
        s.end()
    }
}
