//! Cell Module
//!
//! Logical grid positions and everything that depends on cell shape.
//!
//! - [`coord`] - Cube coordinates with the `q + r + s == 0` invariant
//! - [`shape`] - Per-shape direction tables, metrics, pixel basis and outlines
//! - [`tile`] - Payload a cell may carry

pub mod coord;
pub mod shape;
pub mod tile;

pub use coord::CellCoord;
pub use shape::{CellGeometry, CellShape, OutlineVertex, SQRT_3};
pub use tile::Tile;

/// A cell of a grid.
///
/// Owned by exactly one [`Grid`](crate::grid::Grid). It keeps no pointer
/// back to the grid; callers always go through the grid.
///
/// Two cells are equal when their coordinates (including `h`) are equal.
#[derive(Debug, Clone)]
pub struct Cell<T = ()> {
    coord: CellCoord,
    shape: CellShape,
    radius: f32,
    /// Default passability used by the pathfinder.
    pub walkable: bool,
    tile: Option<Tile<T>>,
}

impl<T> Cell<T> {
    pub fn new(coord: CellCoord, shape: CellShape, radius: f32) -> Self {
        Self {
            coord,
            shape,
            radius,
            walkable: true,
            tile: None,
        }
    }

    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    pub fn shape(&self) -> CellShape {
        self.shape
    }

    /// Circumradius for hex cells, side length for square cells.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn width(&self) -> f32 {
        self.shape.width(self.radius)
    }

    pub fn length(&self) -> f32 {
        self.shape.length(self.radius)
    }

    pub fn perimeter(&self) -> f32 {
        self.shape.perimeter(self.radius)
    }

    pub fn directions(&self) -> &'static [CellCoord] {
        self.shape.directions()
    }

    pub fn diagonals(&self) -> &'static [CellCoord] {
        self.shape.diagonals()
    }

    /// Coordinate one step in `direction_index`, or `None` when the index is
    /// outside `0..direction_count`. The result may not exist in the grid.
    pub fn neighbor(&self, direction_index: usize) -> Option<CellCoord> {
        self.directions()
            .get(direction_index)
            .map(|offset| self.coord.add(*offset))
    }

    /// Coordinate across the vertex in `diagonal_index`.
    pub fn diagonal(&self, diagonal_index: usize) -> Option<CellCoord> {
        self.diagonals()
            .get(diagonal_index)
            .map(|offset| self.coord.add(*offset))
    }

    /// Step distance under this cell's shape metric.
    pub fn distance_to(&self, other: CellCoord) -> u32 {
        self.shape.distance(self.coord, other)
    }

    /// Tile outline around the cell center.
    pub fn build_tile_outline(&self, scale: f32) -> Vec<glam::Vec2> {
        self.shape.outline(self.radius, scale)
    }

    pub fn tile(&self) -> Option<&Tile<T>> {
        self.tile.as_ref()
    }

    pub fn tile_mut(&mut self) -> Option<&mut Tile<T>> {
        self.tile.as_mut()
    }

    /// Places a tile on this cell, returning the one it replaced.
    pub fn set_tile(&mut self, data: T) -> Option<Tile<T>> {
        self.tile.replace(Tile::new(self.coord, data))
    }

    pub fn take_tile(&mut self) -> Option<Tile<T>> {
        self.tile.take()
    }
}

impl<T> PartialEq for Cell<T> {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl<T> Eq for Cell<T> {}
