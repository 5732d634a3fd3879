//! Grid
//!
//! Owning collection of cells for one board, plus generation, pixel
//! conversion and topology queries.
//!
//! Cells are stored sparsely in a `HashMap` keyed by their [`CellCoord`],
//! which makes the key collision-free over the whole `i32` range. Iteration
//! order of [`Grid::cells`] is unspecified; snapshots sort by coordinate.
//!
//! # Example
//!
//! ```
//! use tilegrid::grid::{Grid, GridConfig};
//!
//! let grid: Grid = Grid::generated(GridConfig::hex(15.0, 2)).unwrap();
//! assert_eq!(grid.len(), 19);
//!
//! let center = grid.cell_to_pixel(tilegrid::cell::CellCoord::flat(1, -1));
//! assert_eq!(grid.pixel_to_cell(center), tilegrid::cell::CellCoord::flat(1, -1));
//! ```

use glam::{Vec2, Vec3};
use std::collections::HashMap;

use super::config::GridConfig;
use super::error::GridError;
use crate::cell::{Cell, CellCoord, CellGeometry, CellShape, Tile};

/// Nudge applied while walking a line so samples never land exactly on a
/// cell boundary.
const LINE_EPSILON: f32 = 1e-4;

/// A board of cells sharing one shape and one cell size.
#[derive(Debug, Clone)]
pub struct Grid<T = ()> {
    config: GridConfig,
    geometry: CellGeometry,
    cells: HashMap<CellCoord, Cell<T>>,
    autogenerated: bool,
}

impl<T> Grid<T> {
    /// Creates an empty grid. Call [`generate`](Self::generate) or
    /// [`add_cell`](Self::add_cell) to populate it.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self {
            geometry: CellGeometry::new(config.shape, config.cell_size, config.tile_scale),
            config,
            cells: HashMap::new(),
            autogenerated: false,
        })
    }

    /// Creates a grid and fills the region described by `config`.
    pub fn generated(config: GridConfig) -> Result<Self, GridError> {
        let mut grid = Self::new(config)?;
        grid.fill_region();
        Ok(grid)
    }

    /// Clears the grid, then fills every coordinate within `config.size` of
    /// the origin on layer 0.
    ///
    /// Hex boards are hexagons (`1 + 3n(n+1)` cells), square boards are
    /// `(2n+1)^2` squares. Invalid configs leave the grid untouched.
    pub fn generate(&mut self, config: GridConfig) -> Result<(), GridError> {
        config.validate()?;
        self.geometry = CellGeometry::new(config.shape, config.cell_size, config.tile_scale);
        self.config = config;
        self.fill_region();
        Ok(())
    }

    fn fill_region(&mut self) {
        self.cells.clear();

        let shape = self.config.shape;
        let radius = self.config.cell_size;
        let n = self.config.size;
        for q in -n..=n {
            for r in shape.board_rows(q, n) {
                let coord = CellCoord::flat(q, r);
                self.cells.insert(coord, Cell::new(coord, shape, radius));
            }
        }
        self.autogenerated = true;

        log::debug!(
            "generated {:?} grid: size={} cell_size={} cells={}",
            shape,
            n,
            radius,
            self.cells.len()
        );
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn shape(&self) -> CellShape {
        self.config.shape
    }

    pub fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    pub fn size(&self) -> i32 {
        self.config.size
    }

    /// Cached shape constants and tile outline for renderers.
    pub fn geometry(&self) -> &CellGeometry {
        &self.geometry
    }

    /// `true` while the cell set is exactly what [`generate`](Self::generate)
    /// produced.
    pub fn is_autogenerated(&self) -> bool {
        self.autogenerated
    }

    pub(crate) fn mark_autogenerated(&mut self, autogenerated: bool) {
        self.autogenerated = autogenerated;
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Iterates all cells in unspecified order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell<T>> {
        self.cells.values()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell<T>> {
        self.cells.values_mut()
    }

    /// The cell at an exact coordinate, `None` when there isn't one.
    pub fn cell_at(&self, coord: CellCoord) -> Option<&Cell<T>> {
        self.cells.get(&coord)
    }

    pub fn cell_at_mut(&mut self, coord: CellCoord) -> Option<&mut Cell<T>> {
        self.cells.get_mut(&coord)
    }

    /// Adds a cell at `coord`. Returns `false` if one was already there.
    pub fn add_cell(&mut self, coord: CellCoord) -> bool {
        if self.cells.contains_key(&coord) {
            return false;
        }
        self.cells
            .insert(coord, Cell::new(coord, self.config.shape, self.config.cell_size));
        self.autogenerated = false;
        true
    }

    /// Removes and returns the cell at `coord`, tile included.
    pub fn remove_cell(&mut self, coord: CellCoord) -> Option<Cell<T>> {
        let removed = self.cells.remove(&coord);
        if removed.is_some() {
            self.autogenerated = false;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.autogenerated = false;
    }

    /// Sets the default passability of a cell. Returns `false` if there is no
    /// cell at `coord`.
    pub fn set_walkable(&mut self, coord: CellCoord, walkable: bool) -> bool {
        match self.cells.get_mut(&coord) {
            Some(cell) => {
                cell.walkable = walkable;
                true
            }
            None => false,
        }
    }

    /// Puts a tile on the cell at `coord`, replacing any previous tile.
    /// Returns `false` (and drops `data`) if there is no cell there.
    pub fn place_tile(&mut self, coord: CellCoord, data: T) -> bool {
        match self.cells.get_mut(&coord) {
            Some(cell) => {
                cell.set_tile(data);
                true
            }
            None => false,
        }
    }

    pub fn remove_tile(&mut self, coord: CellCoord) -> Option<Tile<T>> {
        self.cells.get_mut(&coord).and_then(Cell::take_tile)
    }

    pub fn tile_at(&self, coord: CellCoord) -> Option<&Tile<T>> {
        self.cells.get(&coord).and_then(Cell::tile)
    }

    pub fn tile_at_mut(&mut self, coord: CellCoord) -> Option<&mut Tile<T>> {
        self.cells.get_mut(&coord).and_then(Cell::tile_mut)
    }

    // ========================================================================
    // COORDINATE CONVERSION
    // ========================================================================

    /// World-space center of a cell. Y is `h * layer_height`.
    pub fn cell_to_pixel(&self, coord: CellCoord) -> Vec3 {
        let planar = self.config.shape.to_planar(coord, self.config.cell_size);
        Vec3::new(planar.x, coord.h as f32 * self.config.layer_height, planar.y)
    }

    /// Coordinate of the cell containing a world position.
    ///
    /// The coordinate is computed, not looked up; it may lie outside the
    /// board. See [`CellShape::round`] for the boundary rule.
    pub fn pixel_to_cell(&self, position: Vec3) -> CellCoord {
        let shape = self.config.shape;
        let (q, r) = shape.from_planar(Vec2::new(position.x, position.z), self.config.cell_size);
        let (q, r) = shape.round(q, r);
        let h = (position.y / self.config.layer_height).round() as i32;
        CellCoord::new(q, r, h)
    }

    /// The cell under a world position, if the board has one there.
    pub fn cell_at_pixel(&self, position: Vec3) -> Option<&Cell<T>> {
        self.cell_at(self.pixel_to_cell(position))
    }

    // ========================================================================
    // TOPOLOGY QUERIES
    // ========================================================================

    /// Step distance between two coordinates under the grid's shape metric.
    pub fn distance(&self, a: CellCoord, b: CellCoord) -> u32 {
        self.config.shape.distance(a, b)
    }

    /// Coordinates of the existing edge neighbors of `coord`, in direction
    /// order (plus diagonals after them when `diagonals` is set).
    ///
    /// Missing neighbors are skipped.
    pub fn neighbor_coords(
        &self,
        coord: CellCoord,
        diagonals: bool,
    ) -> impl Iterator<Item = CellCoord> + '_ {
        let shape = self.config.shape;
        let extra: &'static [CellCoord] = if diagonals { shape.diagonals() } else { &[] };
        shape
            .directions()
            .iter()
            .chain(extra)
            .map(move |offset| coord.add(*offset))
            .filter(move |c| self.cells.contains_key(c))
    }

    /// Existing edge neighbors of `coord`.
    pub fn neighbors(&self, coord: CellCoord) -> impl Iterator<Item = &Cell<T>> {
        self.neighbor_coords(coord, false)
            .filter_map(move |c| self.cells.get(&c))
    }

    /// Existing diagonal neighbors of `coord`.
    pub fn diagonals(&self, coord: CellCoord) -> impl Iterator<Item = &Cell<T>> {
        self.config
            .shape
            .diagonals()
            .iter()
            .filter_map(move |offset| self.cells.get(&coord.add(*offset)))
    }

    /// Neighbors of `coord` (optionally with diagonals) that pass `filter`.
    pub fn neighbors_filtered<F>(&self, coord: CellCoord, diagonals: bool, filter: F) -> Vec<&Cell<T>>
    where
        F: Fn(&Cell<T>) -> bool,
    {
        self.neighbor_coords(coord, diagonals)
            .filter_map(|c| self.cells.get(&c))
            .filter(|cell| filter(cell))
            .collect()
    }

    /// Existing cells within `radius` steps of `center` on its layer,
    /// `center` included when present.
    ///
    /// Restartable (the iterator is `Clone`). Cells come column by column,
    /// `q` ascending then `r` ascending.
    ///
    /// Small radii walk the offsets around `center` lazily. Once the ball
    /// holds more offsets than the board has cells, the board is filtered
    /// instead, so any `radius` up to `u32::MAX` is fine.
    pub fn cells_in_range(
        &self,
        center: CellCoord,
        radius: u32,
    ) -> impl Iterator<Item = &Cell<T>> + Clone + '_ {
        let shape = self.config.shape;
        let cells = &self.cells;
        let walk = shape.range_area(radius) <= cells.len() as u64;

        let offsets = walk.then(move || {
            let n = i32::try_from(radius).unwrap_or(i32::MAX);
            (-n..=n)
                .flat_map(move |dq| shape.range_rows(dq, n).map(move |dr| CellCoord::flat(dq, dr)))
                .filter_map(move |offset| center.checked_add(offset))
                .filter_map(move |c| cells.get(&c))
        });
        let filtered = (!walk).then(move || {
            let mut found: Vec<&Cell<T>> = cells
                .values()
                .filter(|cell| {
                    let c = cell.coord();
                    c.h == center.h && shape.distance(center, c) <= radius
                })
                .collect();
            found.sort_by_key(|cell| (cell.coord().q, cell.coord().r));
            found
        });

        offsets
            .into_iter()
            .flatten()
            .chain(filtered.into_iter().flatten())
    }

    /// Existing cells exactly `radius` steps from `center`.
    pub fn cells_in_ring(
        &self,
        center: CellCoord,
        radius: u32,
    ) -> impl Iterator<Item = &Cell<T>> + Clone + '_ {
        let shape = self.config.shape;
        self.cells_in_range(center, radius)
            .filter(move |cell| shape.distance(center, cell.coord()) == radius)
    }

    /// Coordinates on the straight line from `a` to `b`, both inclusive,
    /// on `a`'s layer.
    ///
    /// Samples are taken at `distance(a, b)` evenly spaced points and
    /// snapped with the shape's rounding rule. The result is not filtered
    /// against the board.
    pub fn line(&self, a: CellCoord, b: CellCoord) -> Vec<CellCoord> {
        let shape = self.config.shape;
        let b = b.with_h(a.h);
        let steps = shape.distance(a, b);
        if steps == 0 {
            return vec![a];
        }

        let mut line: Vec<CellCoord> = Vec::with_capacity(steps as usize + 1);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let q = a.q as f32 + (b.q - a.q) as f32 * t + LINE_EPSILON;
            let r = a.r as f32 + (b.r - a.r) as f32 * t + LINE_EPSILON;
            let (q, r) = shape.round(q, r);
            let coord = CellCoord::new(q, r, a.h);
            if line.last() != Some(&coord) {
                line.push(coord);
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid: Grid = Grid::new(GridConfig::default()).unwrap();
        assert!(grid.is_empty());
        assert!(!grid.is_autogenerated());
    }

    #[test]
    fn test_generate_hex_count() {
        let grid: Grid = Grid::generated(GridConfig::hex(15.0, 2)).unwrap();
        assert_eq!(grid.len(), 19);
        assert!(grid.is_autogenerated());
        for cell in grid.cells() {
            let c = cell.coord();
            assert_eq!(c.q + c.r + c.s, 0);
        }
    }

    #[test]
    fn test_generate_square_count() {
        let grid: Grid = Grid::generated(GridConfig::square(1.0, 2)).unwrap();
        assert_eq!(grid.len(), 25);
    }

    #[test]
    fn test_generate_clears_first() {
        let mut grid: Grid = Grid::generated(GridConfig::hex(1.0, 3)).unwrap();
        grid.add_cell(CellCoord::flat(50, 50));
        grid.generate(GridConfig::hex(1.0, 1)).unwrap();
        assert_eq!(grid.len(), 7);
        assert!(!grid.contains(CellCoord::flat(50, 50)));
    }

    #[test]
    fn test_generate_rejects_negative_size() {
        let mut grid: Grid = Grid::generated(GridConfig::hex(1.0, 1)).unwrap();
        let result = grid.generate(GridConfig::hex(1.0, -3));
        assert!(matches!(result, Err(GridError::InvalidSize(-3))));
        // Failed generation leaves the existing board alone
        assert_eq!(grid.len(), 7);
    }

    #[test]
    fn test_cell_at_miss() {
        let grid: Grid = Grid::generated(GridConfig::hex(1.0, 1)).unwrap();
        assert!(grid.cell_at(CellCoord::flat(5, 0)).is_none());
        assert!(grid.cell_at(CellCoord::new(0, 0, 1)).is_none());
    }

    #[test]
    fn test_add_remove_clears_autogenerated() {
        let mut grid: Grid = Grid::generated(GridConfig::hex(1.0, 1)).unwrap();
        assert!(!grid.add_cell(CellCoord::ORIGIN));
        assert!(grid.is_autogenerated());

        assert!(grid.remove_cell(CellCoord::ORIGIN).is_some());
        assert!(!grid.is_autogenerated());
        assert!(grid.remove_cell(CellCoord::ORIGIN).is_none());
    }

    #[test]
    fn test_pixel_roundtrip_hex() {
        let grid: Grid = Grid::generated(GridConfig::hex(15.0, 4)).unwrap();
        for cell in grid.cells() {
            let world = grid.cell_to_pixel(cell.coord());
            assert_eq!(grid.pixel_to_cell(world), cell.coord());
        }
    }

    #[test]
    fn test_pixel_to_cell_off_center() {
        let grid: Grid = Grid::generated(GridConfig::hex(10.0, 3)).unwrap();
        let center = grid.cell_to_pixel(CellCoord::flat(2, -1));
        let nudged = center + Vec3::new(3.0, 0.2, -2.0);
        assert_eq!(grid.pixel_to_cell(nudged), CellCoord::flat(2, -1));
    }

    #[test]
    fn test_layer_conversion() {
        let mut config = GridConfig::square(2.0, 1);
        config.layer_height = 0.5;
        let grid: Grid = Grid::new(config).unwrap();
        let coord = CellCoord::new(1, -1, 3);
        let world = grid.cell_to_pixel(coord);
        assert_eq!(world, Vec3::new(2.0, 1.5, -2.0));
        assert_eq!(grid.pixel_to_cell(world), coord);
    }

    #[test]
    fn test_neighbors_at_edge() {
        let grid: Grid = Grid::generated(GridConfig::hex(1.0, 1)).unwrap();
        assert_eq!(grid.neighbors(CellCoord::ORIGIN).count(), 6);
        // A corner of a radius-1 hex board touches the center and two ring cells
        assert_eq!(grid.neighbors(CellCoord::flat(1, 0)).count(), 3);
    }

    #[test]
    fn test_neighbors_filtered_with_diagonals() {
        let mut grid: Grid = Grid::generated(GridConfig::square(1.0, 2)).unwrap();
        grid.set_walkable(CellCoord::flat(1, 0), false);

        let all = grid.neighbors_filtered(CellCoord::ORIGIN, true, |_| true);
        assert_eq!(all.len(), 8);

        let open = grid.neighbors_filtered(CellCoord::ORIGIN, true, |c| c.walkable);
        assert_eq!(open.len(), 7);
        assert_eq!(grid.diagonals(CellCoord::ORIGIN).count(), 4);
    }

    #[test]
    fn test_cells_in_range_hex() {
        let grid: Grid = Grid::generated(GridConfig::hex(1.0, 4)).unwrap();
        assert_eq!(grid.cells_in_range(CellCoord::ORIGIN, 0).count(), 1);
        assert_eq!(grid.cells_in_range(CellCoord::ORIGIN, 2).count(), 19);
        // Clipped by the board edge
        assert_eq!(grid.cells_in_range(CellCoord::flat(4, 0), 1).count(), 4);
    }

    #[test]
    fn test_cells_in_range_restartable() {
        let grid: Grid = Grid::generated(GridConfig::square(1.0, 3)).unwrap();
        let range = grid.cells_in_range(CellCoord::ORIGIN, 2);
        let first: Vec<_> = range.clone().map(|c| c.coord()).collect();
        let second: Vec<_> = range.map(|c| c.coord()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 13);
    }

    #[test]
    fn test_cells_in_range_huge_radius() {
        let grid: Grid = Grid::generated(GridConfig::hex(1.0, 3)).unwrap();
        assert_eq!(grid.cells_in_range(CellCoord::ORIGIN, u32::MAX).count(), grid.len());
        assert_eq!(grid.cells_in_ring(CellCoord::ORIGIN, u32::MAX).count(), 0);

        let far = CellCoord::flat(i32::MAX, 0);
        assert_eq!(grid.cells_in_range(far, 2).count(), 0);
        // Every board cell is fewer than u32::MAX steps away
        assert_eq!(grid.cells_in_range(far, u32::MAX).count(), grid.len());
    }

    #[test]
    fn test_cells_in_range_both_paths_agree() {
        // Radius 3 walks offsets; radius 7 exceeds the board and filters it
        let grid: Grid = Grid::generated(GridConfig::square(1.0, 3)).unwrap();
        let walked: Vec<_> = grid.cells_in_range(CellCoord::flat(1, 1), 3).map(|c| c.coord()).collect();
        let mut expected: Vec<_> = grid
            .cells()
            .map(|c| c.coord())
            .filter(|&c| grid.distance(CellCoord::flat(1, 1), c) <= 3)
            .collect();
        expected.sort_by_key(|c| (c.q, c.r));
        assert_eq!(walked, expected);

        let all: Vec<_> = grid.cells_in_range(CellCoord::ORIGIN, 7).map(|c| c.coord()).collect();
        let mut sorted = all.clone();
        sorted.sort_by_key(|c| (c.q, c.r));
        assert_eq!(all, sorted);
        assert_eq!(all.len(), grid.len());
    }

    #[test]
    fn test_cells_in_ring() {
        let grid: Grid = Grid::generated(GridConfig::hex(1.0, 3)).unwrap();
        assert_eq!(grid.cells_in_ring(CellCoord::ORIGIN, 0).count(), 1);
        assert_eq!(grid.cells_in_ring(CellCoord::ORIGIN, 1).count(), 6);
        assert_eq!(grid.cells_in_ring(CellCoord::ORIGIN, 3).count(), 18);
    }

    #[test]
    fn test_line_hex() {
        let grid: Grid = Grid::generated(GridConfig::hex(1.0, 4)).unwrap();
        let a = CellCoord::flat(-2, 0);
        let b = CellCoord::flat(2, -1);
        let line = grid.line(a, b);
        assert_eq!(line.first(), Some(&a));
        assert_eq!(line.last(), Some(&b));
        assert_eq!(line.len() as u32, grid.distance(a, b) + 1);
        for pair in line.windows(2) {
            assert_eq!(grid.distance(pair[0], pair[1]), 1);
        }
    }

    #[test]
    fn test_line_same_cell() {
        let grid: Grid = Grid::new(GridConfig::default()).unwrap();
        assert_eq!(grid.line(CellCoord::ORIGIN, CellCoord::ORIGIN), vec![CellCoord::ORIGIN]);
    }

    #[test]
    fn test_tiles() {
        let mut grid: Grid<&str> = Grid::generated(GridConfig::hex(1.0, 1)).unwrap();
        assert!(grid.place_tile(CellCoord::ORIGIN, "castle"));
        assert!(!grid.place_tile(CellCoord::flat(9, 9), "nowhere"));

        let tile = grid.tile_at_mut(CellCoord::ORIGIN).unwrap();
        tile.toggle();
        assert!(grid.tile_at(CellCoord::ORIGIN).unwrap().toggled);

        let removed = grid.remove_tile(CellCoord::ORIGIN).unwrap();
        assert_eq!(removed.data, "castle");
        assert!(grid.tile_at(CellCoord::ORIGIN).is_none());
    }

    #[test]
    fn test_geometry_cached_from_config() {
        let grid: Grid = Grid::new(GridConfig::hex(15.0, 2)).unwrap();
        assert_eq!(grid.geometry().width, 30.0);
        assert_eq!(grid.geometry().outline.len(), 6);
    }
}
