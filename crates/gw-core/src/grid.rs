//! Integer grid coordinates and world bounds.
//!
//! Distances between cells are **Euclidean** and compared with `<=`
//! (inclusive boundary).  This is a behavioral contract the rest of the
//! engine depends on: a range-1 query from `(0, 0)` includes the four
//! orthogonal neighbours but not the diagonals (distance ≈ 1.41), which only
//! enter at range ≥ √2.

use std::fmt;

// ── Coord ─────────────────────────────────────────────────────────────────────

/// A cell position on the grid.  Signed so that off-grid candidate targets
/// (e.g. a move off the west edge) are representable before bounds checks.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell at `(x + dx, y + dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Coord) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// The four orthogonal neighbours (east, west, south, north).
    ///
    /// Used by the drop action's breadth-first search for a free cell.
    #[inline]
    pub fn neighbours4(self) -> [Coord; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── GridShape ─────────────────────────────────────────────────────────────────

/// Width and height of the world grid, in cells.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridShape {
    pub width: u32,
    pub height: u32,
}

impl GridShape {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `true` if `c` lies within `[0, width) × [0, height)`.
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as u32) < self.width && (c.y as u32) < self.height
    }

    /// Row-major index of `c` into a flat occupancy `Vec`.
    ///
    /// # Panics
    /// Debug-asserts that `c` is in bounds; callers check `contains` first.
    #[inline]
    pub fn cell_index(self, c: Coord) -> usize {
        debug_assert!(self.contains(c));
        c.y as usize * self.width as usize + c.x as usize
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
