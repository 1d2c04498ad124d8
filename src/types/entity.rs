//! Grid glyph dispatch table.

use super::BrickColour;

/// What a single grid glyph places in its cell.
///
/// The mapping is total: every character resolves to exactly one kind,
/// with unknown glyphs treated as empty cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// `D`: a door, consuming the next door target.
    Door,
    /// `S`: a sign, consuming the next sign text.
    Sign,
    /// `G`
    Ghost,
    /// `R`: the player spawn point.
    Spawn,
    /// `B`, `C`, `M`, `N`, `Y`, `Z`, `L`: an opaque brick.
    Brick(BrickColour),
    /// `T`: a light source.
    Torch,
    Empty,
}

impl EntityKind {
    /// Resolve a grid glyph.
    pub fn from_glyph(glyph: char) -> Self {
        match glyph {
            'D' => EntityKind::Door,
            'S' => EntityKind::Sign,
            'G' => EntityKind::Ghost,
            'R' => EntityKind::Spawn,
            'B' => EntityKind::Brick(BrickColour::white()),
            'C' => EntityKind::Brick(BrickColour::red()),
            'M' => EntityKind::Brick(BrickColour::green()),
            'N' => EntityKind::Brick(BrickColour::blue()),
            'Y' => EntityKind::Brick(BrickColour::yellow()),
            'Z' => EntityKind::Brick(BrickColour::magenta()),
            'L' => EntityKind::Brick(BrickColour::cyan()),
            'T' => EntityKind::Torch,
            _ => EntityKind::Empty,
        }
    }

    /// Whether cells of this kind block light.
    pub fn is_opaque(self) -> bool {
        matches!(self, EntityKind::Brick(_))
    }
}
