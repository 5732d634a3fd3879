//! Grid Module
//!
//! The board: an owning collection of cells with generation, pixel/cell
//! conversion, topology queries and a serializable snapshot.
//!
//! - [`config`] - Generation parameters and extrusion settings
//! - [`board`] - The [`Grid`] itself
//! - [`snapshot`] - JSON persistence
//! - [`error`] - Boundary validation errors
//!
//! A grid has a single writer. Queries made while [`Grid::generate`] is
//! running are not supported (the borrow checker rules them out within one
//! thread).

pub mod board;
pub mod config;
pub mod error;
pub mod snapshot;

pub use board::Grid;
pub use config::{ExtrudeSettings, GridConfig};
pub use error::GridError;
pub use snapshot::{CellRecord, GridSnapshot};
