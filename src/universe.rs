//! The outermost grid.

use log::{debug, trace, warn};
use std::convert::TryFrom;

use crate::cell::{Cell, CellTrait, Neighborhood, Neighbors, Resident};
use crate::config::{ConfigError, UniverseConfig};
use crate::memento::{Memento, Pos};
use crate::visitor::CellVisitor;

/// A complete Game of Life grid: nested neighborhoods of residents,
/// surrounded on all sides by dead cells.
#[derive(Debug, Clone)]
pub struct Universe {
    root: Cell,
    /// Stand-in for the neighbors of `root`, which don't exist.
    dummy: Cell,
    generation: u64,
}

impl Default for Universe {
    fn default() -> Self {
        Self::with_root(Neighborhood::with_depth(
            crate::config::DEFAULT_GRID_SIZE,
            crate::config::DEFAULT_DEPTH,
        ))
    }
}

impl Universe {
    /// Constructs a new empty universe with the given shape.
    pub fn new(config: &UniverseConfig) -> Result<Self, ConfigError> {
        let width = config.validate()?;
        debug!(
            "Building {}x{} universe ({} layers of {}x{} neighborhoods)",
            width, width, config.depth, config.grid_size, config.grid_size,
        );
        Ok(Self::with_root(Neighborhood::with_depth(
            config.grid_size,
            config.depth,
        )))
    }
    /// Constructs a new universe around an existing neighborhood.
    pub fn with_root(root: Neighborhood) -> Self {
        Self {
            root: Cell::Neighborhood(root),
            dummy: Cell::dummy(),
            generation: 0,
        }
    }

    /// Returns the outermost cell.
    pub fn root(&self) -> &Cell {
        &self.root
    }
    /// Returns the number of generations simulated so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
    /// Returns the width (and height) of the universe, measured in residents.
    pub fn width_in_cells(&self) -> usize {
        self.root.width_in_cells()
    }

    /// Simulates one generation and returns `true` if any cell changed.
    pub fn step(&mut self) -> bool {
        let neighbors = Neighbors::uniform(&self.dummy);
        // Phase 1 must finish everywhere before phase 2 starts anywhere.
        self.root.figure_next_state(&neighbors);
        let changed = self.root.transition();
        self.generation += 1;
        trace!(
            "Generation {}: {}",
            self.generation,
            if changed { "changed" } else { "stable" },
        );
        changed
    }
    /// Simulates up to `generations` generations, stopping early if the
    /// universe stops changing. Returns the number of generations simulated.
    pub fn run(&mut self, generations: u64) -> u64 {
        for i in 0..generations {
            if !self.step() {
                debug!("Universe stable after {} generations", i + 1);
                return i + 1;
            }
        }
        generations
    }

    /// Returns the resident at (`row`, `column`).
    ///
    /// # Panics
    ///
    /// This method panics if the position is outside the universe.
    pub fn resident(&self, row: usize, column: usize) -> &Resident {
        self.root.resident_at(row, column)
    }
    /// Returns `true` if the resident at (`row`, `column`) is alive.
    pub fn is_alive(&self, row: usize, column: usize) -> bool {
        self.resident(row, column).is_alive()
    }
    /// Returns `true` if the resident at (`row`, `column`) has ever been
    /// alive before a transition.
    pub fn has_passed(&self, row: usize, column: usize) -> bool {
        self.resident(row, column).has_passed()
    }
    /// Makes the resident at (`row`, `column`) alive or dead. Returns `true`
    /// if its state changed.
    pub fn set_alive(&mut self, row: usize, column: usize, alive: bool) -> bool {
        self.root.set_alive_at(row, column, alive)
    }
    /// Toggles the resident at (`row`, `column`) between alive and dead.
    pub fn reverse(&mut self, row: usize, column: usize) {
        self.root.reverse_at(row, column)
    }

    /// Kills every cell, forgets history, and resets the generation count.
    pub fn clear(&mut self) {
        self.root.clear();
        self.generation = 0;
    }
    /// Returns a memento of every live cell, relative to the upper-left
    /// corner.
    pub fn store(&self) -> Memento {
        let mut memento = Memento::new();
        self.root.store(&mut memento, Pos::ORIGIN);
        memento
    }
    /// Replaces the contents of the universe with the live cells in
    /// `memento`, relative to the upper-left corner. Positions outside the
    /// universe are ignored.
    pub fn load(&mut self, memento: &Memento) {
        self.root.clear();
        self.root.load(memento, Pos::ORIGIN);
        let width = i64::try_from(self.width_in_cells()).unwrap_or(i64::MAX);
        let dropped = memento
            .iter()
            .filter(|pos| !(0..width).contains(&pos.row) || !(0..width).contains(&pos.column))
            .count();
        if dropped > 0 {
            warn!(
                "Dropped {} live cells outside {}x{} universe",
                dropped, width, width,
            );
        }
    }

    /// Walks the whole universe with `visitor`.
    pub fn accept(&self, visitor: &mut dyn CellVisitor) {
        self.root.accept(visitor)
    }
    /// Returns the number of live cells.
    pub fn population(&self) -> usize {
        let mut population = Population(0);
        self.accept(&mut population);
        population.0
    }
    /// Returns the state of every resident, indexed by row and then column.
    pub fn to_grid(&self) -> Vec<Vec<bool>> {
        let width = self.width_in_cells();
        let mut grid = vec![vec![false; width]; width];
        for pos in &self.store() {
            grid[pos.row as usize][pos.column as usize] = true;
        }
        grid
    }
}

/// Counts live residents, skipping neighborhoods with nothing alive.
struct Population(usize);
impl CellVisitor for Population {
    fn visit_resident(&mut self, resident: &Resident) {
        if resident.is_alive() {
            self.0 += 1;
        }
    }
    fn visit_neighborhood(&mut self, neighborhood: &Neighborhood) -> bool {
        neighborhood.is_alive()
    }
}

#[cfg(test)]
mod tests;
