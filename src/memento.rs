//! Sparse records of live cells, used to save and restore a grid.
//!
//! A `Memento` holds only the positions of live cells; every position not in
//! the record is dead. Positions are absolute, relative to whatever anchor
//! point the caller handed to `CellTrait::transfer()`.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Add;

/// Position of a cell, with row increasing downward and column increasing
/// rightward.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    /// Row (Y coordinate, increasing downward).
    pub row: i64,
    /// Column (X coordinate, increasing rightward).
    pub column: i64,
}
impl Pos {
    /// The upper-left corner of a grid.
    pub const ORIGIN: Self = Self { row: 0, column: 0 };

    /// Constructs a position from a row and column.
    #[inline]
    pub const fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }

    /// Returns the position offset by some number of rows and columns.
    #[inline]
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub const fn translated(self, rows: i64, columns: i64) -> Self {
        Self {
            row: self.row + rows,
            column: self.column + columns,
        }
    }
}
impl Pos {
    /// Returns the sum of two positions, or `None` if either coordinate
    /// overflows.
    #[inline]
    pub fn checked_add(self, rhs: Pos) -> Option<Pos> {
        Some(Self {
            row: self.row.checked_add(rhs.row)?,
            column: self.column.checked_add(rhs.column)?,
        })
    }
}
impl Add for Pos {
    type Output = Pos;

    #[inline]
    fn add(self, rhs: Pos) -> Pos {
        self.translated(rhs.row, rhs.column)
    }
}
impl From<(i64, i64)> for Pos {
    #[inline]
    fn from((row, column): (i64, i64)) -> Self {
        Self { row, column }
    }
}
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Inclusive rectangle of positions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rect {
    /// Upper-left corner.
    pub min: Pos,
    /// Lower-right corner.
    pub max: Pos,
}
impl Rect {
    /// Returns the number of rows covered by the rectangle.
    pub fn height(self) -> u64 {
        (self.max.row - self.min.row + 1) as u64
    }
    /// Returns the number of columns covered by the rectangle.
    pub fn width(self) -> u64 {
        (self.max.column - self.min.column + 1) as u64
    }
    /// Returns `true` if the position lies inside the rectangle.
    pub fn contains(self, pos: Pos) -> bool {
        (self.min.row..=self.max.row).contains(&pos.row)
            && (self.min.column..=self.max.column).contains(&pos.column)
    }
}

/// Sparse set of live cell positions.
///
/// Only composite blocks and persistence code construct mementos; a single
/// unit cell has no coordinate space of its own to anchor one in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Memento {
    live_cells: BTreeSet<Pos>,
}
impl Memento {
    /// Constructs an empty memento, representing an entirely dead grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the cell at `pos` was recorded as alive.
    #[inline]
    pub fn is_alive(&self, pos: Pos) -> bool {
        self.live_cells.contains(&pos)
    }
    /// Records the cell at `pos` as alive.
    #[inline]
    pub fn mark_as_alive(&mut self, pos: Pos) {
        self.live_cells.insert(pos);
    }

    /// Returns the number of live cells recorded.
    pub fn len(&self) -> usize {
        self.live_cells.len()
    }
    /// Returns `true` if no live cells are recorded.
    pub fn is_empty(&self) -> bool {
        self.live_cells.is_empty()
    }
    /// Returns an iterator over the live cells in row-major order.
    pub fn iter(&self) -> btree_set::Iter<'_, Pos> {
        self.live_cells.iter()
    }

    /// Returns the smallest rectangle containing every live cell, or `None`
    /// if there are none.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let first = *self.live_cells.iter().next()?;
        let last = *self.live_cells.iter().next_back()?;
        let (min_column, max_column) = self
            .live_cells
            .iter()
            .fold((i64::MAX, i64::MIN), |(lo, hi), pos| {
                (lo.min(pos.column), hi.max(pos.column))
            });
        Some(Rect {
            min: Pos::new(first.row, min_column),
            max: Pos::new(last.row, max_column),
        })
    }

    /// Returns a copy of the memento with every position offset by `delta`.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn translated(&self, delta: Pos) -> Self {
        self.live_cells.iter().map(|&pos| pos + delta).collect()
    }
    /// Returns a copy of the memento with every position offset by `delta`,
    /// or `None` if any position would overflow.
    pub fn checked_translated(&self, delta: Pos) -> Option<Self> {
        self.live_cells
            .iter()
            .map(|&pos| pos.checked_add(delta))
            .collect::<Option<BTreeSet<_>>>()
            .map(|live_cells| Self { live_cells })
    }
}
impl FromIterator<Pos> for Memento {
    fn from_iter<I: IntoIterator<Item = Pos>>(iter: I) -> Self {
        Self {
            live_cells: iter.into_iter().collect(),
        }
    }
}
impl Extend<Pos> for Memento {
    fn extend<I: IntoIterator<Item = Pos>>(&mut self, iter: I) {
        self.live_cells.extend(iter)
    }
}
impl<'a> IntoIterator for &'a Memento {
    type Item = &'a Pos;
    type IntoIter = btree_set::Iter<'a, Pos>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
