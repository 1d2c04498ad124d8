//! Core types for levelbake.

mod colour;
mod entity;
mod level;

pub use colour::BrickColour;
pub use entity::EntityKind;
pub use level::{Brick, Door, LevelModel, Position, Sign, Size};
