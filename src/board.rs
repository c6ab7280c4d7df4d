//! Flat board storage and group/liberty flood fills.
//!
//! Intersections are stored row-major in a single `Vec`, indexed by
//! `x + y * width`. Coordinates are zero-based with `(0, 0)` in the top-left
//! corner; the vertex helpers translate to the usual `D4` notation where row 1
//! is the bottom edge.

use std::fmt;

use crate::constants::DELTA;
use crate::stone::{Stone, StoneColor};

/// A board position: the color of every intersection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GamePosition {
    width: usize,
    height: usize,
    intersections: Vec<StoneColor>,
}

impl GamePosition {
    /// An empty board of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            intersections: vec![StoneColor::Empty; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Color at `(x, y)`, or `None` off the board.
    pub fn get(&self, x: usize, y: usize) -> Option<StoneColor> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.intersections[self.idx(x, y)])
    }

    /// Overwrite one intersection. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, color: StoneColor) {
        if self.in_bounds(x, y) {
            let i = self.idx(x, y);
            self.intersections[i] = color;
        }
    }

    pub fn intersections(&self) -> &[StoneColor] {
        &self.intersections
    }

    /// Every non-empty intersection as a [`Stone`].
    pub fn stones(&self) -> impl Iterator<Item = Stone> + '_ {
        self.intersections
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_stone())
            .map(|(i, &c)| Stone::new(i % self.width, i / self.width, c))
    }

    pub fn is_empty_board(&self) -> bool {
        self.intersections.iter().all(|c| !c.is_stone())
    }

    /// On-board orthogonal neighbors of `(x, y)`.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        DELTA.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            self.in_bounds(nx, ny).then_some((nx, ny))
        })
    }

    /// Collect the group containing `(x, y)`.
    ///
    /// Uses flood-fill to find all connected stones of the same color.
    /// Returns an empty vector if the point is empty or off the board.
    pub fn collect_group(&self, x: usize, y: usize) -> Vec<Stone> {
        let color = match self.get(x, y) {
            Some(c) if c.is_stone() => c,
            _ => return Vec::new(),
        };
        let mut stack = vec![(x, y)];
        let mut visited = vec![false; self.intersections.len()];
        let mut group = Vec::new();

        while let Some((cx, cy)) = stack.pop() {
            let i = self.idx(cx, cy);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            group.push(Stone::new(cx, cy, color));
            for (nx, ny) in self.neighbors(cx, cy) {
                if !visited[self.idx(nx, ny)] && self.get(nx, ny) == Some(color) {
                    stack.push((nx, ny));
                }
            }
        }
        group
    }

    /// Count the distinct liberties of the group containing `(x, y)`.
    pub fn group_liberties(&self, x: usize, y: usize) -> usize {
        let color = match self.get(x, y) {
            Some(c) if c.is_stone() => c,
            _ => return 0,
        };
        let mut stack = vec![(x, y)];
        let mut visited = vec![false; self.intersections.len()];
        let mut liberty_visited = vec![false; self.intersections.len()];
        let mut liberties = 0;

        while let Some((cx, cy)) = stack.pop() {
            let i = self.idx(cx, cy);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            for (nx, ny) in self.neighbors(cx, cy) {
                let ni = self.idx(nx, ny);
                match self.intersections[ni] {
                    StoneColor::Empty => {
                        if !liberty_visited[ni] {
                            liberty_visited[ni] = true;
                            liberties += 1;
                        }
                    }
                    c if c == color && !visited[ni] => stack.push((nx, ny)),
                    _ => {}
                }
            }
        }
        liberties
    }
}

impl fmt::Display for GamePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            write!(f, "{:>2} ", self.height - y)?;
            for x in 0..self.width {
                let ch = match self.intersections[self.idx(x, y)] {
                    StoneColor::Black => 'X',
                    StoneColor::White => 'O',
                    StoneColor::Empty => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for x in 0..self.width {
            write!(f, "{} ", column_letter(x))?;
        }
        writeln!(f)
    }
}

/// Column letter for a zero-based column, skipping 'I'.
fn column_letter(x: usize) -> char {
    let c = b'A' + x as u8;
    if c >= b'I' { (c + 1) as char } else { c as char }
}

/// Parse a vertex such as `"D4"` into zero-based `(x, y)`.
///
/// Columns use letters A-Z skipping I; rows count up from the bottom edge,
/// so the board height is needed to flip them. Returns `None` for malformed
/// input or a row outside `1..=height`. A column past the board edge is still
/// returned so the rules can report it as out of bounds.
pub fn parse_vertex(s: &str, height: usize) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 {
        return None;
    }

    let col_char = bytes[0].to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == b'I' {
        return None;
    }
    let mut x = (col_char - b'A') as usize;
    // Skip 'I' column (Go convention to avoid confusion with 'J')
    if col_char > b'I' {
        x -= 1;
    }

    // `usize::from_str` accepts a leading '+'.
    if !s[1..].bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row: usize = s[1..].parse().ok()?;
    if row == 0 || row > height {
        return None;
    }
    Some((x, height - row))
}

/// Convert zero-based `(x, y)` to a vertex string such as `"D4"`.
pub fn format_vertex(x: usize, y: usize, height: usize) -> String {
    format!("{}{}", column_letter(x), height - y)
}
