//! Level layout parser.
//!
//! Turns the line-based level text format into a typed [`LevelModel`].
//!
//! # Format
//!
//! ```text
//! <ambient light>
//! <door target>        zero or more
//! enddoors
//! <sign text>          zero or more
//! endsigns
//! <grid row>           remaining lines
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use levelbake::parser::parse_level;
//!
//! let source = std::fs::read_to_string("levels/level1.txt")?;
//! let level = parse_level(&source)?;
//! println!("{} torches", level.torches.len());
//! ```

mod grid;
mod header;

pub use grid::{scan_grid, ParsedLayout};
pub use header::{split_layout, RawLayout};

use crate::error::Result;
use crate::types::LevelModel;

/// Parse a level source, keeping the bookkeeping used by validation.
pub fn parse_layout(source: &str) -> Result<ParsedLayout> {
    let raw = split_layout(source)?;
    scan_grid(&raw)
}

/// Parse a level source into a level model.
pub fn parse_level(source: &str) -> Result<LevelModel> {
    parse_layout(source).map(|parsed| parsed.level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BakeError;
    use crate::types::{BrickColour, Position, Size};

    #[test]
    fn test_parse_reference_level() {
        let level = parse_level("0.5\nlevel2\nenddoors\nendsigns\nRD\nTB").unwrap();

        assert_eq!(level.ambient_light, 0.5);
        assert_eq!(level.spawn, Some(Position::new(0, 0)));
        assert_eq!(level.doors.len(), 1);
        assert_eq!(level.doors[0].pos, Position::new(1, 0));
        assert_eq!(level.doors[0].next_level, "level2");
        assert_eq!(level.torches, vec![Position::new(0, 1)]);
        assert_eq!(level.bricks.len(), 1);
        assert_eq!(level.bricks[0].pos, Position::new(1, 1));
        assert_eq!(level.bricks[0].colour, BrickColour::white());
        assert_eq!(
            level.size,
            Size {
                width: 2,
                height: 2
            }
        );
    }

    #[test]
    fn test_parse_is_replayable() {
        let source = "0.1\na\nenddoors\nhello\nendsigns\nDS\nGR";
        assert_eq!(parse_level(source).unwrap(), parse_level(source).unwrap());
    }

    #[test]
    fn test_parse_door_without_targets_fails() {
        let err = parse_level("0.5\nenddoors\nendsigns\nRB T\n    B D").unwrap_err();
        assert!(matches!(err, BakeError::QueueUnderflow { x: 6, y: 1, .. }));
    }
}
