//! Single cells.

use super::*;

/// Single cell, the smallest element of the grid.
///
/// A resident remembers whether it has ever been alive, so that a renderer
/// can show where live cells have been.
#[derive(Debug, Default, Clone)]
pub struct Resident {
    alive: bool,
    will_be_alive: std::cell::Cell<bool>,
    has_passed: bool,
}

impl Resident {
    /// Returns the state computed by the most recent `figure_next_state()`.
    pub fn will_be_alive(&self) -> bool {
        self.will_be_alive.get()
    }
    /// Returns `true` if the resident was alive before any transition.
    pub fn has_passed(&self) -> bool {
        self.has_passed
    }

    /// Toggles the resident between alive and dead.
    pub fn reverse(&mut self) {
        self.alive = !self.alive;
    }
    /// Makes the resident alive or dead and returns `true` if that changed
    /// its state.
    pub fn set_alive(&mut self, alive: bool) -> bool {
        let changed = self.alive != alive;
        self.alive = alive;
        changed
    }
}

impl CellTrait for Resident {
    fn figure_next_state(&self, neighbors: &Neighbors<'_>) -> bool {
        debug_assert!(
            neighbors.have_granularity(1, false),
            "Resident given neighbors of the wrong kind: {:?}",
            neighbors,
        );
        let live_neighbors = neighbors.live_count();
        self.will_be_alive
            .set(live_neighbors == 3 || (self.alive && live_neighbors == 2));
        !self.is_stable()
    }
    fn transition(&mut self) -> bool {
        let changed = !self.is_stable();
        self.has_passed |= self.alive;
        self.alive = self.will_be_alive.get();
        changed
    }

    fn is_stable(&self) -> bool {
        self.alive == self.will_be_alive.get()
    }
    fn is_disruptive_to(&self) -> Direction {
        if self.is_stable() {
            Direction::NONE
        } else {
            Direction::ALL
        }
    }
    /// A resident touches every edge of itself, and does not remember
    /// whether it changed, so it always reports every edge.
    fn edges_changed(&self) -> Direction {
        Direction::ALL
    }

    fn load(&mut self, memento: &Memento, upper_left: Pos) -> bool {
        self.alive = memento.is_alive(upper_left);
        self.will_be_alive.set(self.alive);
        self.alive
    }
    fn store(&self, memento: &mut Memento, upper_left: Pos) -> bool {
        if self.alive {
            memento.mark_as_alive(upper_left);
        }
        self.alive
    }
    /// Mementos must be created by neighborhoods, because a lone resident
    /// has no coordinate space to anchor one in.
    fn create_memento(&self) -> CellResult<Memento> {
        Err(CellError::UnsupportedOperation(
            "may not create memento of a unitary cell",
        ))
    }

    fn accept(&self, visitor: &mut dyn CellVisitor) {
        visitor.visit_resident(self);
    }

    fn clear(&mut self) {
        self.alive = false;
        self.will_be_alive.set(false);
        self.has_passed = false;
    }
    fn is_alive(&self) -> bool {
        self.alive
    }
    fn create(&self) -> Cell {
        Cell::resident()
    }
    fn width_in_cells(&self) -> usize {
        1
    }
}
