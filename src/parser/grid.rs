//! Grid scan.
//!
//! Walks grid rows top-to-bottom, left-to-right, dispatching each glyph
//! through [`EntityKind`]. Door and sign tiles draw from FIFO queues filled by
//! the header.

use crate::error::{BakeError, Result, Section};
use crate::types::{Brick, Door, EntityKind, LevelModel, Position, Sign, Size};

use super::header::RawLayout;

/// Result of parsing a layout, including bookkeeping that validation reports on.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLayout {
    pub level: LevelModel,
    /// Number of `R` tiles seen. The last one wins.
    pub spawn_tiles: usize,
    /// Declared door targets no door tile consumed.
    pub unused_door_targets: Vec<String>,
    /// Declared sign texts no sign tile consumed.
    pub unused_sign_texts: Vec<String>,
}

/// Read cursor over a header section. Entries are never removed.
struct Queue<'a> {
    section: Section,
    entries: &'a [&'a str],
    cursor: usize,
}

impl<'a> Queue<'a> {
    fn new(section: Section, entries: &'a [&'a str]) -> Self {
        Self {
            section,
            entries,
            cursor: 0,
        }
    }

    fn take(&mut self, x: usize, y: usize) -> Result<String> {
        let entry = self
            .entries
            .get(self.cursor)
            .ok_or(BakeError::QueueUnderflow {
                section: self.section,
                glyph: self.section.glyph(),
                x,
                y,
            })?;
        self.cursor += 1;
        Ok(entry.to_string())
    }

    fn remaining(&self) -> Vec<String> {
        self.entries[self.cursor..]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Scan the grid rows of a split layout into a level model.
pub fn scan_grid(raw: &RawLayout<'_>) -> Result<ParsedLayout> {
    let mut doors_queue = Queue::new(Section::Doors, &raw.door_targets);
    let mut signs_queue = Queue::new(Section::Signs, &raw.sign_texts);

    let mut spawn = None;
    let mut spawn_tiles = 0;
    let mut doors = Vec::new();
    let mut signs = Vec::new();
    let mut ghosts = Vec::new();
    let mut bricks = Vec::new();
    let mut torches = Vec::new();

    let mut max_x = 0;
    let mut max_y = 0;

    for (y, row) in raw.rows.iter().enumerate() {
        max_y = max_y.max(y);
        for (x, glyph) in row.chars().enumerate() {
            max_x = max_x.max(x);
            let pos = Position::new(x, y);

            match EntityKind::from_glyph(glyph) {
                EntityKind::Door => doors.push(Door {
                    pos,
                    next_level: doors_queue.take(x, y)?,
                }),
                EntityKind::Sign => signs.push(Sign {
                    pos,
                    text: signs_queue.take(x, y)?,
                }),
                EntityKind::Ghost => ghosts.push(pos),
                EntityKind::Spawn => {
                    spawn = Some(pos);
                    spawn_tiles += 1;
                }
                EntityKind::Brick(colour) => bricks.push(Brick { pos, colour }),
                EntityKind::Torch => torches.push(pos),
                EntityKind::Empty => {}
            }
        }
    }

    let level = LevelModel {
        ambient_light: raw.ambient_light,
        size: Size {
            width: max_x + 1,
            height: max_y + 1,
        },
        spawn,
        doors,
        signs,
        ghosts,
        bricks,
        torches,
    };

    Ok(ParsedLayout {
        level,
        spawn_tiles,
        unused_door_targets: doors_queue.remaining(),
        unused_sign_texts: signs_queue.remaining(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::header::split_layout;
    use crate::types::BrickColour;
    use pretty_assertions::assert_eq;

    fn scan(source: &str) -> Result<ParsedLayout> {
        scan_grid(&split_layout(source)?)
    }

    #[test]
    fn test_doors_consume_targets_in_scan_order() {
        let parsed = scan("0\nfirst\nsecond\nthird\nenddoors\nendsigns\n D\nD  D").unwrap();
        let doors = &parsed.level.doors;
        assert_eq!(doors.len(), 3);
        assert_eq!(doors[0].pos, Position::new(1, 0));
        assert_eq!(doors[0].next_level, "first");
        assert_eq!(doors[1].pos, Position::new(0, 1));
        assert_eq!(doors[1].next_level, "second");
        assert_eq!(doors[2].pos, Position::new(3, 1));
        assert_eq!(doors[2].next_level, "third");
        assert!(parsed.unused_door_targets.is_empty());
    }

    #[test]
    fn test_signs_consume_texts_in_scan_order() {
        let parsed = scan("0\nenddoors\nWelcome\nBeware\nendsigns\nS.S").unwrap();
        let texts: Vec<_> = parsed.level.signs.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Welcome", "Beware"]);
        assert_eq!(parsed.level.signs[1].pos, Position::new(2, 0));
    }

    #[test]
    fn test_door_queue_underflow() {
        let err = scan("0\nonly\nenddoors\nendsigns\nDD").unwrap_err();
        assert!(matches!(
            err,
            BakeError::QueueUnderflow {
                section: Section::Doors,
                glyph: 'D',
                x: 1,
                y: 0,
            }
        ));
    }

    #[test]
    fn test_sign_queue_underflow() {
        let err = scan("0\nenddoors\nendsigns\n\n  S").unwrap_err();
        assert!(matches!(
            err,
            BakeError::QueueUnderflow {
                section: Section::Signs,
                x: 2,
                y: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_leftover_entries_reported() {
        let parsed = scan("0\na\nb\nenddoors\nhi\nendsigns\nD").unwrap();
        assert_eq!(parsed.unused_door_targets, vec!["b".to_string()]);
        assert_eq!(parsed.unused_sign_texts, vec!["hi".to_string()]);
    }

    #[test]
    fn test_irregular_rows_size() {
        let parsed = scan("0\nenddoors\nendsigns\nB\nBBBBB\nBB").unwrap();
        assert_eq!(
            parsed.level.size,
            Size {
                width: 5,
                height: 3
            }
        );
    }

    #[test]
    fn test_blank_rows_count_towards_height() {
        let parsed = scan("0\nenddoors\nendsigns\nBB\n\n\nT").unwrap();
        assert_eq!(parsed.level.size.height, 4);
        assert_eq!(parsed.level.torches, vec![Position::new(0, 3)]);
    }

    #[test]
    fn test_empty_grid_is_one_cell() {
        let parsed = scan("0\nenddoors\nendsigns").unwrap();
        assert_eq!(
            parsed.level.size,
            Size {
                width: 1,
                height: 1
            }
        );
        assert!(parsed.level.bricks.is_empty());
    }

    #[test]
    fn test_last_spawn_wins() {
        let parsed = scan("0\nenddoors\nendsigns\nR  \n  R").unwrap();
        assert_eq!(parsed.level.spawn, Some(Position::new(2, 1)));
        assert_eq!(parsed.spawn_tiles, 2);
    }

    #[test]
    fn test_missing_spawn() {
        let parsed = scan("0\nenddoors\nendsigns\nBB").unwrap();
        assert_eq!(parsed.level.spawn, None);
        assert_eq!(parsed.spawn_tiles, 0);
    }

    #[test]
    fn test_brick_colours_and_entities() {
        let parsed = scan("0\nenddoors\nendsigns\nCMN\nYZL\nG T").unwrap();
        let level = &parsed.level;
        let colours: Vec<_> = level.bricks.iter().map(|b| b.colour).collect();
        assert_eq!(
            colours,
            vec![
                BrickColour::red(),
                BrickColour::green(),
                BrickColour::blue(),
                BrickColour::yellow(),
                BrickColour::magenta(),
                BrickColour::cyan(),
            ]
        );
        assert_eq!(level.ghosts, vec![Position::new(0, 2)]);
        assert_eq!(level.torches, vec![Position::new(2, 2)]);
    }
}
