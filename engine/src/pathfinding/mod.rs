//! Pathfinding Module
//!
//! Shortest paths over a [`Grid`](crate::grid::Grid)'s adjacency. The search
//! only looks at cell topology and the caller's rules; it knows nothing
//! about rendering or picking.
//!
//! Searches are synchronous. Interactive callers that must stay within a
//! frame should set [`PathOptions::max_expansions`].
//!
//! # Example
//!
//! ```
//! use tilegrid::cell::CellCoord;
//! use tilegrid::grid::{Grid, GridConfig};
//! use tilegrid::pathfinding::{find_path, PathRequest};
//!
//! let mut grid: Grid = Grid::generated(GridConfig::square(1.0, 3)).unwrap();
//! for r in -3..=2 {
//!     grid.set_walkable(CellCoord::flat(0, r), false);
//! }
//!
//! let result = find_path(&grid, CellCoord::flat(-2, 0), CellCoord::flat(2, 0), &PathRequest::new());
//! let path = result.into_path().unwrap();
//! assert!(path.cells.contains(&CellCoord::flat(0, 3)));
//! ```

pub mod astar;
pub mod request;

pub use astar::{Path, PathResult, Pathfinder, find_path};
pub use request::{PathOptions, PathRequest};
