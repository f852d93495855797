//! Square grids of cells.

use itertools::iproduct;

use super::*;

/// Square grid of identical smaller cells, which may be residents or other
/// neighborhoods.
///
/// A neighborhood only recomputes its children when something nearby might
/// have changed: either one of its own children was unstable last
/// generation, or a neighbor changed along the edge that touches it. A
/// neighborhood that is quiet and surrounded by quiet neighborhoods is
/// skipped entirely.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    /// Number of children along each side.
    grid_size: usize,
    /// Width of each child, measured in residents.
    child_width: usize,
    /// Children in row-major order.
    cells: Box<[Cell]>,
    /// Whether the children must be recomputed during the next
    /// `figure_next_state()`. After `figure_next_state()` this is `true` iff
    /// some child is unstable.
    active: std::cell::Cell<bool>,
    /// Edges along which some child changed since the last `transition()`.
    /// This is only written during phase 2 (and by edits between
    /// generations), so neighbors can read it safely during phase 1.
    edges_changed: Direction,
}

impl Neighborhood {
    /// Constructs a neighborhood containing `grid_size`x`grid_size` new dead
    /// copies of `prototype`.
    ///
    /// # Panics
    ///
    /// This method panics if `grid_size` is zero or `prototype` is the
    /// dummy.
    pub fn new(grid_size: usize, prototype: &Cell) -> Self {
        assert!(grid_size > 0, "Neighborhood must contain at least one cell");
        assert!(
            !prototype.is_dummy(),
            "Neighborhood cannot be made of dummy cells",
        );
        let cells = (0..grid_size * grid_size)
            .map(|_| prototype.create())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            grid_size,
            child_width: prototype.width_in_cells(),
            cells,
            active: std::cell::Cell::new(false),
            edges_changed: Direction::NONE,
        }
    }
    /// Constructs a neighborhood nested `depth` layers deep, where every
    /// layer is `grid_size`x`grid_size` and the innermost layer contains
    /// residents. The result is `grid_size.pow(depth)` residents wide.
    ///
    /// # Panics
    ///
    /// This method panics if `grid_size` or `depth` is zero.
    pub fn with_depth(grid_size: usize, depth: usize) -> Self {
        assert!(depth > 0, "Neighborhood must be at least one layer deep");
        let mut prototype = Cell::resident();
        for _ in 1..depth {
            prototype = Cell::neighborhood(grid_size, &prototype);
        }
        Self::new(grid_size, &prototype)
    }

    /// Returns the number of children along each side.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }
    /// Returns the width of each child, measured in residents.
    pub fn child_width(&self) -> usize {
        self.child_width
    }
    /// Returns `true` if the children will be recomputed during the next
    /// `figure_next_state()` even if no neighbor changed.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Returns the child at (`row`, `column`), measured in children.
    ///
    /// # Panics
    ///
    /// This method panics if the position is outside the grid.
    pub fn child(&self, row: usize, column: usize) -> &Cell {
        &self.cells[self.index(row, column)]
    }
    fn child_mut(&mut self, row: usize, column: usize) -> &mut Cell {
        let index = self.index(row, column);
        &mut self.cells[index]
    }
    /// Returns an iterator over the children in row-major order.
    pub fn children(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    /// Returns an iterator over the children in row-major order, each with
    /// its row and column.
    pub fn children_enumerated(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        iproduct!(0..self.grid_size, 0..self.grid_size).zip(self.cells.iter())
    }

    /// Returns the resident at (`row`, `column`), measured in residents.
    ///
    /// # Panics
    ///
    /// This method panics if the position is outside the neighborhood.
    pub fn resident_at(&self, row: usize, column: usize) -> &Resident {
        let (child_row, child_column) = self.locate(row, column);
        self.child(child_row, child_column)
            .resident_at(row % self.child_width, column % self.child_width)
    }
    /// Makes the resident at (`row`, `column`), measured in residents, alive
    /// or dead. Returns `true` if its state changed, in which case this
    /// neighborhood and its neighbors will recompute next generation.
    ///
    /// # Panics
    ///
    /// This method panics if the position is outside the neighborhood.
    pub fn set_alive_at(&mut self, row: usize, column: usize, alive: bool) -> bool {
        let (child_row, child_column) = self.locate(row, column);
        let (child_width, grid_size) = (self.child_width, self.grid_size);
        let child = self.child_mut(child_row, child_column);
        if !child.set_alive_at(row % child_width, column % child_width, alive) {
            return false;
        }
        let edges =
            child.edges_changed() & Direction::at_grid_position(child_row, child_column, grid_size);
        self.edges_changed |= edges;
        self.active.set(true);
        true
    }

    /// Returns the child that contains the resident at (`row`, `column`).
    fn locate(&self, row: usize, column: usize) -> (usize, usize) {
        let width = self.width_in_cells();
        assert!(
            row < width && column < width,
            "Position ({}, {}) is outside {}x{} neighborhood",
            row,
            column,
            width,
            width,
        );
        (row / self.child_width, column / self.child_width)
    }
    fn index(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.grid_size && column < self.grid_size,
            "Child ({}, {}) is outside {}x{} grid",
            row,
            column,
            self.grid_size,
            self.grid_size,
        );
        row * self.grid_size + column
    }

    /// Returns the eight neighbors of the child at (`row`, `column`), given
    /// the neighbors of this neighborhood. Neighbors inside the grid are
    /// siblings; neighbors outside it are children along the edge of the
    /// corresponding outer neighbor.
    fn child_neighbors<'a>(
        &'a self,
        outer: &Neighbors<'a>,
        row: usize,
        column: usize,
    ) -> Neighbors<'a> {
        let at = |rows: isize, columns: isize| self.neighbor_of(outer, row, column, rows, columns);
        Neighbors {
            north: at(-1, 0),
            south: at(1, 0),
            east: at(0, 1),
            west: at(0, -1),
            northeast: at(-1, 1),
            northwest: at(-1, -1),
            southeast: at(1, 1),
            southwest: at(1, -1),
        }
    }
    fn neighbor_of<'a>(
        &'a self,
        outer: &Neighbors<'a>,
        row: usize,
        column: usize,
        rows: isize,
        columns: isize,
    ) -> &'a Cell {
        let n = self.grid_size as isize;
        let r = row as isize + rows;
        let c = column as isize + columns;
        // Which neighbor (if any) the position falls into.
        let outer_row = if r < 0 { -1 } else if r >= n { 1 } else { 0 };
        let outer_column = if c < 0 { -1 } else if c >= n { 1 } else { 0 };
        // Position within that neighbor.
        let r = r.rem_euclid(n) as usize;
        let c = c.rem_euclid(n) as usize;
        match (outer_row, outer_column) {
            (0, 0) => self.child(r, c),
            _ => outer.at_offset(outer_row, outer_column).edge(r, c),
        }
    }
}

impl CellTrait for Neighborhood {
    fn figure_next_state(&self, neighbors: &Neighbors<'_>) -> bool {
        debug_assert!(
            neighbors.have_granularity(self.width_in_cells(), true),
            "Neighborhood given neighbors of the wrong kind or size",
        );
        // If nothing inside changed and nothing next door changed along an
        // edge touching this neighborhood, then every child is still stable.
        if !self.active.get() && neighbors.disrupted_from().is_none() {
            return false;
        }

        let mut unstable = false;
        for (row, column) in iproduct!(0..self.grid_size, 0..self.grid_size) {
            let child_neighbors = self.child_neighbors(neighbors, row, column);
            if self
                .child(row, column)
                .figure_next_state(&child_neighbors)
            {
                unstable = true;
            }
        }
        self.active.set(unstable);
        unstable
    }
    fn transition(&mut self) -> bool {
        let previous_edges = std::mem::take(&mut self.edges_changed);
        // Children may still be holding change records from the last
        // transition, so visit them if anything changed then.
        if !self.active.get() && previous_edges.is_none() {
            return false;
        }

        let n = self.grid_size;
        let mut changed = false;
        let mut edges = Direction::NONE;
        for ((row, column), child) in iproduct!(0..n, 0..n).zip(self.cells.iter_mut()) {
            if child.transition() {
                changed = true;
                edges |= child.edges_changed() & Direction::at_grid_position(row, column, n);
            }
        }
        self.edges_changed = edges;
        changed
    }

    fn is_stable(&self) -> bool {
        !self.active.get() || self.cells.iter().all(Cell::is_stable)
    }
    fn is_disruptive_to(&self) -> Direction {
        if !self.active.get() {
            return Direction::NONE;
        }
        self.children_enumerated()
            .map(|((row, column), child)| {
                child.is_disruptive_to()
                    & Direction::at_grid_position(row, column, self.grid_size)
            })
            .fold(Direction::NONE, |a, b| a | b)
    }
    fn edges_changed(&self) -> Direction {
        self.edges_changed
    }

    fn load(&mut self, memento: &Memento, upper_left: Pos) -> bool {
        let n = self.grid_size;
        let child_width = self.child_width as i64;
        let mut any_alive = false;
        for ((row, column), child) in iproduct!(0..n, 0..n).zip(self.cells.iter_mut()) {
            let corner = upper_left.translated(row as i64 * child_width, column as i64 * child_width);
            any_alive |= child.load(memento, corner);
        }
        // The whole neighborhood may have changed.
        self.active.set(true);
        self.edges_changed = Direction::ALL;
        any_alive
    }
    fn store(&self, memento: &mut Memento, upper_left: Pos) -> bool {
        let child_width = self.child_width as i64;
        let mut any_alive = false;
        for ((row, column), child) in self.children_enumerated() {
            let corner = upper_left.translated(row as i64 * child_width, column as i64 * child_width);
            any_alive |= child.store(memento, corner);
        }
        any_alive
    }
    fn create_memento(&self) -> CellResult<Memento> {
        let mut memento = Memento::new();
        self.store(&mut memento, Pos::ORIGIN);
        Ok(memento)
    }

    fn accept(&self, visitor: &mut dyn CellVisitor) {
        if visitor.visit_neighborhood(self) {
            for child in self.children() {
                child.accept(visitor);
            }
        }
    }

    fn clear(&mut self) {
        for child in self.cells.iter_mut() {
            child.clear();
        }
        // Cells next to live neighbors may be born, and live neighbors next
        // to the cleared cells may die.
        self.active.set(true);
        self.edges_changed = Direction::ALL;
    }
    fn is_alive(&self) -> bool {
        self.cells.iter().any(Cell::is_alive)
    }
    fn create(&self) -> Cell {
        Cell::neighborhood(self.grid_size, &self.cells[0].create())
    }
    fn width_in_cells(&self) -> usize {
        self.grid_size * self.child_width
    }
}
