//! Tilegrid Library
//!
//! A render-agnostic spatial engine for hex and square tile boards: cube
//! coordinates, grid generation and persistence, A* pathfinding and
//! pointer picking.
//!
//! # Modules
//!
//! - [`cell`] - Coordinates, cell shapes and tiles
//! - [`grid`] - The board, its configuration and snapshots
//! - [`pathfinding`] - A* search over a grid's adjacency
//! - [`input`] - Platform-agnostic pointer input (plus a winit adapter)
//! - [`picking`] - Screen-to-structure resolution and pointer events
//!
//! # Example
//!
//! ```
//! use tilegrid::{CellCoord, Grid, GridConfig, PathRequest, find_path};
//!
//! let grid: Grid = Grid::generated(GridConfig::hex(15.0, 2)).unwrap();
//! assert_eq!(grid.len(), 19);
//!
//! let path = find_path(&grid, CellCoord::flat(-2, 0), CellCoord::flat(2, 0), &PathRequest::new());
//! assert_eq!(path.into_path().unwrap().steps(), 4);
//! ```

pub mod cell;
pub mod grid;
pub mod input;
pub mod pathfinding;
pub mod picking;

// Re-export the types most callers need at crate level
pub use cell::{Cell, CellCoord, CellShape, Tile};
pub use grid::{ExtrudeSettings, Grid, GridConfig, GridError, GridSnapshot};
pub use input::{Modifiers, MouseButton, PointerInput, ScreenPosition};
pub use pathfinding::{Path, PathOptions, PathRequest, PathResult, Pathfinder, find_path};
pub use picking::{PickCamera, PickGroup, PickScene, Picker, PickerEvent, PickerEventKind, StructureRef};
