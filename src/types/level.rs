//! Parsed level model.
//!
//! A `LevelModel` is the typed form of a level layout file: the ambient light
//! level, grid size, and every entity placed on the grid. It serializes
//! directly to the scene JSON consumed by the game's level loader.
//!
//! # Example
//!
//! ```text
//! 0.5
//! level2
//! enddoors
//! endsigns
//! RD
//! TB
//! ```

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::BrickColour;

/// Zero-based grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Grid size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

/// A door leading to another level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Door {
    pub pos: Position,
    pub next_level: String,
}

/// A readable sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sign {
    pub pos: Position,
    pub text: String,
}

/// An opaque wall cell. Colour is cosmetic only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Brick {
    pub pos: Position,
    pub colour: BrickColour,
}

/// A fully parsed level layout.
///
/// Entity lists are in row-major scan order (top to bottom, left to right).
#[derive(Debug, Clone, PartialEq)]
pub struct LevelModel {
    pub ambient_light: f64,
    pub size: Size,
    /// Spawn point; `None` when the grid has no `R` tile.
    pub spawn: Option<Position>,
    pub doors: Vec<Door>,
    pub signs: Vec<Sign>,
    pub ghosts: Vec<Position>,
    pub bricks: Vec<Brick>,
    /// Light sources.
    pub torches: Vec<Position>,
}

/// `{"pos": {...}}` wrapper used for entities that carry nothing but a position.
#[derive(Serialize)]
struct Marker<'a> {
    pos: &'a Position,
}

struct Markers<'a>(&'a [Position]);

impl Serialize for Markers<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|pos| Marker { pos }))
    }
}

impl Serialize for LevelModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.spawn.is_some() { 8 } else { 7 };
        let mut s = serializer.serialize_struct("LevelModel", fields)?;
        s.serialize_field("ambient_light", &self.ambient_light)?;
        s.serialize_field("size", &self.size)?;
        match &self.spawn {
            Some(pos) => s.serialize_field("spawn", &Marker { pos })?,
            None => s.skip_field("spawn")?,
        }
        s.serialize_field("doors", &self.doors)?;
        s.serialize_field("signs", &self.signs)?;
        s.serialize_field("ghosts", &Markers(&self.ghosts))?;
        s.serialize_field("bricks", &self.bricks)?;
        s.serialize_field("torches", &Markers(&self.torches))?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LevelModel {
        LevelModel {
            ambient_light: 0.5,
            size: Size {
                width: 2,
                height: 2,
            },
            spawn: Some(Position::new(0, 0)),
            doors: vec![Door {
                pos: Position::new(1, 0),
                next_level: "level2".to_string(),
            }],
            signs: vec![],
            ghosts: vec![],
            bricks: vec![Brick {
                pos: Position::new(1, 1),
                colour: BrickColour::white(),
            }],
            torches: vec![Position::new(0, 1)],
        }
    }

    #[test]
    fn test_serialize_markers() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["spawn"]["pos"]["x"], 0);
        assert_eq!(value["torches"][0]["pos"]["y"], 1);
        assert_eq!(value["doors"][0]["next_level"], "level2");
        assert_eq!(value["bricks"][0]["colour"]["r"], 1.0);
    }

    #[test]
    fn test_serialize_without_spawn_omits_key() {
        let mut level = sample();
        level.spawn = None;
        let value = serde_json::to_value(level).unwrap();
        assert!(value.get("spawn").is_none());
        assert!(value.get("ghosts").unwrap().as_array().unwrap().is_empty());
    }
}
