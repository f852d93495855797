//! Sets of block edges.
//!
//! A `Direction` says which edges of a block are affected by a change inside
//! it. A neighboring block only needs to recompute its boundary cells if the
//! block next to it reports a change on the edge they share.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Unordered set of compass edges of a block, plus its interior.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Direction(u16);

impl Direction {
    /// No edges.
    pub const NONE: Self = Self(0);
    /// Top edge.
    pub const NORTH: Self = Self(1 << 0);
    /// Bottom edge.
    pub const SOUTH: Self = Self(1 << 1);
    /// Right edge.
    pub const EAST: Self = Self(1 << 2);
    /// Left edge.
    pub const WEST: Self = Self(1 << 3);
    /// Top-right corner.
    pub const NORTHEAST: Self = Self(1 << 4);
    /// Top-left corner.
    pub const NORTHWEST: Self = Self(1 << 5);
    /// Bottom-right corner.
    pub const SOUTHEAST: Self = Self(1 << 6);
    /// Bottom-left corner.
    pub const SOUTHWEST: Self = Self(1 << 7);
    /// Interior of the block, touching no edge.
    pub const CENTER: Self = Self(1 << 8);
    /// Every edge and the interior.
    pub const ALL: Self = Self((1 << 9) - 1);

    /// Returns the raw bits of the set.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns `true` if the set is empty.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the set has any edge in common with `other`.
    ///
    /// This is the question a block asks a neighbor: "did you change along
    /// the edge that touches me?"
    #[inline]
    pub const fn the(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `true` if every edge in `other` is also in this set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Adds edges to the set.
    #[inline]
    pub fn add(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Removes edges from the set.
    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Returns the edge of a neighbor that touches each edge in this set.
    /// For example, the block north of this one touches it along its
    /// `SOUTH` edge. `CENTER` maps to itself.
    pub fn opposite(self) -> Self {
        let mut ret = self & Self::CENTER;
        for edge in self.compass() {
            ret.add(match edge {
                Self::NORTH => Self::SOUTH,
                Self::SOUTH => Self::NORTH,
                Self::EAST => Self::WEST,
                Self::WEST => Self::EAST,
                Self::NORTHEAST => Self::SOUTHWEST,
                Self::NORTHWEST => Self::SOUTHEAST,
                Self::SOUTHEAST => Self::NORTHWEST,
                Self::SOUTHWEST => Self::NORTHEAST,
                _ => unreachable!("non-compass edge in compass iterator"),
            });
        }
        ret
    }

    /// Returns an iterator over the single compass edges in this set,
    /// skipping `CENTER`.
    pub fn compass(self) -> impl Iterator<Item = Direction> {
        // The compass edges occupy the low eight bits.
        (0..8)
            .map(|bit| Direction(1 << bit))
            .filter(move |&edge| self.the(edge))
    }

    /// Returns the edges of an `n`x`n` grid that the position
    /// (`row`, `column`) lies on. Every position also lies on `CENTER`.
    pub fn at_grid_position(row: usize, column: usize, n: usize) -> Self {
        debug_assert!(row < n && column < n, "position outside grid");
        let last = n - 1;
        let mut ret = Self::CENTER;
        if row == 0 {
            ret.add(Self::NORTH);
        }
        if row == last {
            ret.add(Self::SOUTH);
        }
        if column == 0 {
            ret.add(Self::WEST);
        }
        if column == last {
            ret.add(Self::EAST);
        }
        if row == 0 && column == 0 {
            ret.add(Self::NORTHWEST);
        }
        if row == 0 && column == last {
            ret.add(Self::NORTHEAST);
        }
        if row == last && column == 0 {
            ret.add(Self::SOUTHWEST);
        }
        if row == last && column == last {
            ret.add(Self::SOUTHEAST);
        }
        ret
    }

    fn name(self) -> &'static str {
        match self {
            Self::NORTH => "N",
            Self::SOUTH => "S",
            Self::EAST => "E",
            Self::WEST => "W",
            Self::NORTHEAST => "NE",
            Self::NORTHWEST => "NW",
            Self::SOUTHEAST => "SE",
            Self::SOUTHWEST => "SW",
            Self::CENTER => "C",
            _ => "?",
        }
    }
}

impl BitOr for Direction {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
impl BitOrAssign for Direction {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.add(rhs);
    }
}
impl BitAnd for Direction {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => write!(f, "Direction::NONE"),
            Self::ALL => write!(f, "Direction::ALL"),
            _ => {
                let mut names = self.compass().map(Self::name).collect::<Vec<_>>();
                if self.the(Self::CENTER) {
                    names.push(Self::CENTER.name());
                }
                write!(f, "Direction({})", names.join("|"))
            }
        }
    }
}
