//! Formats for exporting/importing patterns.

pub mod rle;

use crate::memento::Memento;
pub use rle::{Rle, RleError, RleResult};

/// Exports the live cells of a memento to an RLE string.
pub fn export_memento_to_string(memento: &Memento) -> String {
    Rle::from_memento(memento).to_string()
}

/// Imports the live cells of an RLE string into a memento, with each cell at
/// its absolute position (including any offset from a CXRLE header).
pub fn import_memento_from_string(s: &str) -> RleResult<Memento> {
    s.parse::<Rle>()?.to_memento()
}
