//! Stone colors and the `(x, y, color)` intersection tuple.

use std::fmt;

/// The state of a single intersection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StoneColor {
    #[default]
    Empty,
    Black,
    White,
}

impl StoneColor {
    /// Every intersection state, in fingerprint table order.
    pub const ALL: [StoneColor; 3] = [StoneColor::Empty, StoneColor::Black, StoneColor::White];

    /// The other player's color. `Empty` maps to itself.
    pub fn opponent(self) -> StoneColor {
        match self {
            StoneColor::Black => StoneColor::White,
            StoneColor::White => StoneColor::Black,
            StoneColor::Empty => StoneColor::Empty,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            StoneColor::Empty => 0,
            StoneColor::Black => 1,
            StoneColor::White => 2,
        }
    }

    #[inline]
    pub fn is_stone(self) -> bool {
        self != StoneColor::Empty
    }
}

impl fmt::Display for StoneColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoneColor::Empty => "Empty",
            StoneColor::Black => "Black",
            StoneColor::White => "White",
        };
        f.write_str(name)
    }
}

/// A tuple that describes the state of one intersection.
///
/// Equality and hashing cover all three fields, so a black and a white stone
/// on the same point are different values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Stone {
    pub x: usize,
    pub y: usize,
    pub color: StoneColor,
}

impl Stone {
    pub fn new(x: usize, y: usize, color: StoneColor) -> Self {
        Self { x, y, color }
    }

    /// Index of this stone in a flat board array of the given width.
    #[inline]
    pub fn index(&self, board_width: usize) -> usize {
        self.x + self.y * board_width
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}): {}", self.x, self.y, self.color)
    }
}
