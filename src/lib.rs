//! Conway's Game of Life on a grid of nested blocks.
//!
//! The grid is a `Universe`, which holds a tree of `Neighborhood`s with
//! `Resident`s (single cells) at the leaves. Each neighborhood tracks which
//! of its edges changed last generation, so that quiet regions of the grid
//! can be skipped entirely. Patterns can be saved and restored using a
//! `Memento` and imported or exported as RLE.

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

pub mod cell;
pub mod config;
pub mod direction;
pub mod io;
pub mod memento;
pub mod universe;
pub mod visitor;

pub mod traits {
    //! Traits that must be in scope to use most of this crate.
    pub use crate::cell::CellTrait;
    pub use crate::visitor::CellVisitor;
}

pub mod prelude {
    //! Everything needed to build, run, and save a universe.
    pub use crate::traits::*;

    pub use crate::cell::{Cell, CellError, CellResult, Neighborhood, Neighbors, Resident, Transfer};
    pub use crate::config::{ConfigError, UniverseConfig};
    pub use crate::direction::Direction;
    pub use crate::io::{Rle, RleError, RleResult};
    pub use crate::memento::{Memento, Pos, Rect};
    pub use crate::universe::Universe;
}
