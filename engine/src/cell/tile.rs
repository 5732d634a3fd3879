//! Tile payload placed on a cell.

use super::coord::CellCoord;

/// Per-cell payload owned by its [`Cell`](super::Cell).
///
/// Renderers build the visual for a tile; the engine only keeps the
/// coordinate back-reference and whatever state the application puts in
/// `data`. A tile is dropped together with its cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<T> {
    coord: CellCoord,
    /// Selection toggle driven by the application (for example on click).
    pub toggled: bool,
    pub data: T,
}

impl<T> Tile<T> {
    pub(crate) fn new(coord: CellCoord, data: T) -> Self {
        Self {
            coord,
            toggled: false,
            data,
        }
    }

    /// The cell this tile sits on.
    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Flips `toggled` and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.toggled = !self.toggled;
        self.toggled
    }
}
