//! Universe configuration.

use std::convert::TryFrom;
use thiserror::Error;

/// Default number of cells along each side of every neighborhood.
pub const DEFAULT_GRID_SIZE: usize = 8;
/// Default number of layers of neighborhoods.
pub const DEFAULT_DEPTH: usize = 2;

/// Error produced by an invalid configuration.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    ZeroGridSize,
    #[error("depth must be at least 1")]
    ZeroDepth,
    #[error("{grid_size}^{depth} cells per side is too big")]
    TooBig { grid_size: usize, depth: usize },
}

/// Shape of a universe.
///
/// A universe is `depth` layers of neighborhoods, each `grid_size` cells
/// wide, so it is `grid_size.pow(depth)` residents wide.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniverseConfig {
    /// Number of cells along each side of every neighborhood.
    pub grid_size: usize,
    /// Number of layers of neighborhoods, where 1 means a single
    /// neighborhood of residents.
    pub depth: usize,
}
impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            depth: DEFAULT_DEPTH,
        }
    }
}
impl UniverseConfig {
    /// Returns the width of the universe, measured in residents, or an error
    /// if the configuration is invalid.
    pub fn validate(&self) -> Result<usize, ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        u32::try_from(self.depth)
            .ok()
            .and_then(|depth| self.grid_size.checked_pow(depth))
            // Positions must also fit in a memento.
            .filter(|&width| i64::try_from(width).is_ok())
            .ok_or(ConfigError::TooBig {
                grid_size: self.grid_size,
                depth: self.depth,
            })
    }
}
