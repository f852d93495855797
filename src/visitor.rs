//! Traversal of the cell hierarchy by external code.

use crate::cell::{Neighborhood, Resident};

/// Callbacks for each kind of cell, invoked by `CellTrait::accept()`.
///
/// Renderers, counters, and exporters implement this to walk the grid
/// without matching on `Cell` themselves. The dummy cell is never visited.
pub trait CellVisitor {
    /// Visits a single resident.
    fn visit_resident(&mut self, resident: &Resident);

    /// Visits a neighborhood and returns whether to continue into its
    /// children, which are visited in row-major order.
    fn visit_neighborhood(&mut self, _neighborhood: &Neighborhood) -> bool {
        true
    }
}

impl<F: FnMut(&Resident)> CellVisitor for F {
    fn visit_resident(&mut self, resident: &Resident) {
        self(resident)
    }
}
