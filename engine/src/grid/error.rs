//! Grid errors.
//!
//! Only caller bugs end up here. A missing cell is `None`, never an error.

use crate::cell::CellCoord;

/// Errors raised at the grid's API boundary.
#[derive(Debug)]
pub enum GridError {
    /// Generation size below zero.
    InvalidSize(i32),
    /// Cell size that is zero, negative or not finite.
    InvalidCellSize(f32),
    /// Layer height that is zero, negative or not finite.
    InvalidLayerHeight(f32),
    /// Tile scale that is zero, negative or not finite.
    InvalidTileScale(f32),
    /// Bulk data listed the same coordinate twice.
    DuplicateCell(CellCoord),
    /// Snapshot could not be encoded or decoded.
    Json(serde_json::Error),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidSize(size) => write!(f, "grid size must be >= 0, got {size}"),
            GridError::InvalidCellSize(size) => {
                write!(f, "cell size must be positive and finite, got {size}")
            }
            GridError::InvalidLayerHeight(height) => {
                write!(f, "layer height must be positive and finite, got {height}")
            }
            GridError::InvalidTileScale(scale) => {
                write!(f, "tile scale must be positive and finite, got {scale}")
            }
            GridError::DuplicateCell(coord) => write!(f, "duplicate cell at {coord}"),
            GridError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GridError {
    fn from(e: serde_json::Error) -> Self {
        GridError::Json(e)
    }
}
