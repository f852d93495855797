//! Cells of the grid.
//!
//! Every element of the grid is a `Cell`: either a single `Resident`, or a
//! `Neighborhood` containing a square grid of smaller cells. Both implement
//! `CellTrait`, so a neighborhood can treat its children the same way
//! whether they are residents or neighborhoods themselves. A third variant,
//! `Dummy`, stands in for neighbors that don't exist beyond the edge of the
//! grid; it is always dead and never changes.
//!
//! Advancing one generation happens in two phases over the whole grid:
//!
//! 1. `figure_next_state()` computes each cell's next state from its
//!    neighbors' current states. This takes `&self`; the next state is kept
//!    in a `std::cell::Cell` so that a cell can be updated while its siblings
//!    are borrowed as neighbors.
//! 2. `transition()` commits the next state. This takes `&mut self` and is
//!    the only part of the generation protocol that changes whether a cell
//!    is alive.
//!
//! Because nothing alive changes during phase 1, the result does not depend
//! on the order in which cells are visited.

use enum_dispatch::enum_dispatch;
use thiserror::Error;

mod neighborhood;
mod resident;

use crate::direction::Direction;
use crate::memento::{Memento, Pos};
use crate::visitor::CellVisitor;
pub use neighborhood::Neighborhood;
pub use resident::Resident;

/// Result type returned by fallible cell routines.
pub type CellResult<T> = Result<T, CellError>;

/// Error produced by a cell operation that is not supported by that kind of
/// cell.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum CellError {
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

/// Direction of a state transfer between a cell and a `Memento`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transfer {
    /// Set cell states from the memento.
    Load,
    /// Record live cells into the memento.
    Store,
}

/// Operations shared by every kind of cell.
#[enum_dispatch]
pub trait CellTrait {
    /// Computes the next state of the cell from its eight neighbors and
    /// returns `true` if the cell is unstable (i.e., it will change on the
    /// next `transition()`).
    ///
    /// Each neighbor must be a cell of the same kind and width, or the
    /// dummy.
    fn figure_next_state(&self, neighbors: &Neighbors<'_>) -> bool;
    /// Commits the state computed by `figure_next_state()` and returns
    /// `true` if anything changed.
    fn transition(&mut self) -> bool;

    /// Returns `true` if the next state computed by `figure_next_state()` is
    /// the same as the current state.
    fn is_stable(&self) -> bool;
    /// Returns the edges of this cell along which its next state differs
    /// from its current state, or `Direction::NONE` if it is stable.
    fn is_disruptive_to(&self) -> Direction;
    /// Returns the edges along which this cell changed during the most
    /// recent `transition()` or edit. Neighbors use this to decide whether
    /// they need to recompute their boundary cells.
    fn edges_changed(&self) -> Direction;

    /// Sets the cell states from the live positions recorded in `memento`,
    /// with this cell's upper-left corner at `upper_left`. Returns `true` if
    /// anything is alive afterward.
    fn load(&mut self, memento: &Memento, upper_left: Pos) -> bool;
    /// Records the positions of live cells into `memento`, with this cell's
    /// upper-left corner at `upper_left`. Dead cells are not recorded.
    /// Returns `true` if anything is alive.
    fn store(&self, memento: &mut Memento, upper_left: Pos) -> bool;
    /// Transfers state between this cell and `memento` in either direction.
    /// See `load()` and `store()`.
    fn transfer(&mut self, memento: &mut Memento, upper_left: Pos, mode: Transfer) -> bool {
        match mode {
            Transfer::Load => self.load(memento, upper_left),
            Transfer::Store => self.store(memento, upper_left),
        }
    }
    /// Returns a memento of the live cells in this cell, anchored at its
    /// upper-left corner.
    fn create_memento(&self) -> CellResult<Memento>;

    /// Calls the method of `visitor` for this kind of cell.
    fn accept(&self, visitor: &mut dyn CellVisitor);

    /// Makes every cell dead and forgets its history.
    fn clear(&mut self);
    /// Returns `true` if the cell (or any cell inside it) is alive.
    fn is_alive(&self) -> bool;
    /// Returns a new dead cell of the same kind and shape.
    fn create(&self) -> Cell;
    /// Returns the width of the cell, measured in residents.
    fn width_in_cells(&self) -> usize;
}

/// Any cell: a resident, a neighborhood, or the dummy.
#[enum_dispatch(CellTrait)]
#[derive(Debug, Clone)]
pub enum Cell {
    /// Single cell.
    Resident(Resident),
    /// Square grid of smaller cells.
    Neighborhood(Neighborhood),
    /// Always-dead placeholder beyond the edge of the grid.
    Dummy(Dummy),
}

impl Cell {
    /// Constructs a new dead resident.
    pub fn resident() -> Self {
        Cell::Resident(Resident::default())
    }
    /// Constructs a new dead neighborhood of `grid_size`x`grid_size` copies
    /// of `prototype`.
    pub fn neighborhood(grid_size: usize, prototype: &Cell) -> Self {
        Cell::Neighborhood(Neighborhood::new(grid_size, prototype))
    }
    /// Constructs the dummy cell.
    pub fn dummy() -> Self {
        Cell::Dummy(Dummy)
    }

    /// Returns `true` if this is the dummy cell.
    pub fn is_dummy(&self) -> bool {
        matches!(self, Cell::Dummy(_))
    }

    /// Returns the cell at (`row`, `column`) within this cell's own grid.
    ///
    /// For a neighborhood, the position is measured in children, and the
    /// returned cell is one of its children. A resident is its own only
    /// position, so it accepts only `(0, 0)` and returns itself. The dummy
    /// returns itself for any position, so edges beyond the grid are dead
    /// at every granularity.
    ///
    /// # Panics
    ///
    /// This method panics if the position is outside the cell.
    pub fn edge(&self, row: usize, column: usize) -> &Cell {
        match self {
            Cell::Resident(_) => {
                assert!(
                    row == 0 && column == 0,
                    "Resident edge requested at ({}, {})",
                    row,
                    column,
                );
                self
            }
            Cell::Neighborhood(neighborhood) => neighborhood.child(row, column),
            Cell::Dummy(_) => self,
        }
    }

    /// Returns the resident at (`row`, `column`), measured in residents
    /// from the upper-left corner of this cell.
    ///
    /// # Panics
    ///
    /// This method panics if the position is outside the cell or if this is
    /// the dummy.
    pub fn resident_at(&self, row: usize, column: usize) -> &Resident {
        match self {
            Cell::Resident(resident) => {
                assert!(
                    row == 0 && column == 0,
                    "Resident position requested at ({}, {})",
                    row,
                    column,
                );
                resident
            }
            Cell::Neighborhood(neighborhood) => neighborhood.resident_at(row, column),
            Cell::Dummy(_) => panic!("Dummy cell contains no residents"),
        }
    }

    /// Makes the resident at (`row`, `column`) alive or dead, measured in
    /// residents from the upper-left corner of this cell. Returns `true` if
    /// its state changed.
    ///
    /// # Panics
    ///
    /// This method panics if the position is outside the cell or if this is
    /// the dummy.
    pub fn set_alive_at(&mut self, row: usize, column: usize, alive: bool) -> bool {
        match self {
            Cell::Resident(resident) => {
                assert!(
                    row == 0 && column == 0,
                    "Resident position requested at ({}, {})",
                    row,
                    column,
                );
                resident.set_alive(alive)
            }
            Cell::Neighborhood(neighborhood) => neighborhood.set_alive_at(row, column, alive),
            Cell::Dummy(_) => panic!("Cannot modify dummy cell"),
        }
    }

    /// Toggles the resident at (`row`, `column`) between alive and dead.
    pub fn reverse_at(&mut self, row: usize, column: usize) {
        let alive = self.resident_at(row, column).is_alive();
        self.set_alive_at(row, column, !alive);
    }
}

/// Always-dead cell used for neighbors beyond the edge of the grid.
///
/// The dummy has no width, so it may stand in for a neighbor of any
/// granularity.
#[derive(Debug, Default, Copy, Clone)]
pub struct Dummy;
impl CellTrait for Dummy {
    fn figure_next_state(&self, _neighbors: &Neighbors<'_>) -> bool {
        false
    }
    fn transition(&mut self) -> bool {
        false
    }

    fn is_stable(&self) -> bool {
        true
    }
    fn is_disruptive_to(&self) -> Direction {
        Direction::NONE
    }
    fn edges_changed(&self) -> Direction {
        Direction::NONE
    }

    fn load(&mut self, _memento: &Memento, _upper_left: Pos) -> bool {
        false
    }
    fn store(&self, _memento: &mut Memento, _upper_left: Pos) -> bool {
        false
    }
    fn create_memento(&self) -> CellResult<Memento> {
        Err(CellError::UnsupportedOperation(
            "may not create memento of the dummy cell",
        ))
    }

    fn accept(&self, _visitor: &mut dyn CellVisitor) {}

    fn clear(&mut self) {}
    fn is_alive(&self) -> bool {
        false
    }
    fn create(&self) -> Cell {
        Cell::Dummy(Dummy)
    }
    fn width_in_cells(&self) -> usize {
        0
    }
}

/// The eight cells adjacent to a cell, all at the same granularity.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone)]
pub struct Neighbors<'a> {
    pub north: &'a Cell,
    pub south: &'a Cell,
    pub east: &'a Cell,
    pub west: &'a Cell,
    pub northeast: &'a Cell,
    pub northwest: &'a Cell,
    pub southeast: &'a Cell,
    pub southwest: &'a Cell,
}
impl<'a> Neighbors<'a> {
    /// Returns a neighborhood where every neighbor is the same cell. This is
    /// mostly useful for surrounding the outermost cell with the dummy.
    pub fn uniform(cell: &'a Cell) -> Self {
        Self {
            north: cell,
            south: cell,
            east: cell,
            west: cell,
            northeast: cell,
            northwest: cell,
            southeast: cell,
            southwest: cell,
        }
    }

    /// Returns the neighbor `rows` rows down and `columns` columns right,
    /// where each offset is -1, 0, or 1 and not both are 0.
    ///
    /// # Panics
    ///
    /// This method panics if the offset is not one of the eight neighbors.
    pub fn at_offset(&self, rows: isize, columns: isize) -> &'a Cell {
        match (rows, columns) {
            (-1, 0) => self.north,
            (1, 0) => self.south,
            (0, 1) => self.east,
            (0, -1) => self.west,
            (-1, 1) => self.northeast,
            (-1, -1) => self.northwest,
            (1, 1) => self.southeast,
            (1, -1) => self.southwest,
            _ => panic!("({}, {}) is not a neighbor offset", rows, columns),
        }
    }

    /// Returns the neighbor in a single compass direction.
    ///
    /// # Panics
    ///
    /// This method panics if `direction` is not a single compass edge.
    pub fn toward(&self, direction: Direction) -> &'a Cell {
        match direction {
            Direction::NORTH => self.north,
            Direction::SOUTH => self.south,
            Direction::EAST => self.east,
            Direction::WEST => self.west,
            Direction::NORTHEAST => self.northeast,
            Direction::NORTHWEST => self.northwest,
            Direction::SOUTHEAST => self.southeast,
            Direction::SOUTHWEST => self.southwest,
            _ => panic!("{:?} is not a single compass direction", direction),
        }
    }

    /// Returns an iterator over all eight neighbors.
    pub fn iter(&self) -> impl Iterator<Item = &'a Cell> {
        std::iter::once(self.north)
            .chain(std::iter::once(self.south))
            .chain(std::iter::once(self.east))
            .chain(std::iter::once(self.west))
            .chain(std::iter::once(self.northeast))
            .chain(std::iter::once(self.northwest))
            .chain(std::iter::once(self.southeast))
            .chain(std::iter::once(self.southwest))
    }

    /// Returns the number of live neighbors.
    pub fn live_count(&self) -> usize {
        self.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Returns the directions of neighbors that changed, during their most
    /// recent transition, along the edge that touches the cell they
    /// surround.
    pub fn disrupted_from(&self) -> Direction {
        let mut ret = Direction::NONE;
        for direction in Direction::ALL.compass() {
            if self
                .toward(direction)
                .edges_changed()
                .the(direction.opposite())
            {
                ret.add(direction);
            }
        }
        ret
    }

    /// Returns `true` if every neighbor is the dummy or a cell of the given
    /// kind and width.
    pub(crate) fn have_granularity(&self, width_in_cells: usize, composite: bool) -> bool {
        self.iter().all(|cell| match cell {
            Cell::Dummy(_) => true,
            Cell::Resident(_) => !composite && width_in_cells == 1,
            Cell::Neighborhood(n) => composite && n.width_in_cells() == width_in_cells,
        })
    }
}

#[cfg(test)]
mod tests;
