//! Cell Shapes
//!
//! Every shape-dependent number in the crate lives here: neighbor and
//! diagonal offset tables, the distance metric, the forward/inverse pixel
//! basis and the outline used by renderers to build tile meshes.
//!
//! # Orientation
//!
//! Boards lie in the XZ plane with Y up. Hex cells are flat-top:
//! - X = radius * 3/2 * q
//! - Z = radius * sqrt(3) * (r + q/2)
//!
//! Square cells are axis aligned with `q` as column (X) and `r` as row (Z).
//! For squares the `radius` parameter is the side length.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::ops::RangeInclusive;

use super::coord::CellCoord;

/// sqrt(3)
pub const SQRT_3: f32 = 1.732_050_8;

/// Flat-top hex neighbor offsets, counter-clockwise starting east-north-east.
static HEX_DIRECTIONS: [CellCoord; 6] = [
    CellCoord::new(1, -1, 0),
    CellCoord::new(1, 0, 0),
    CellCoord::new(0, 1, 0),
    CellCoord::new(-1, 1, 0),
    CellCoord::new(-1, 0, 0),
    CellCoord::new(0, -1, 0),
];

/// Hex diagonals: the six cells two steps away that share a single vertex.
static HEX_DIAGONALS: [CellCoord; 6] = [
    CellCoord::new(2, -1, 0),
    CellCoord::new(1, 1, 0),
    CellCoord::new(-1, 2, 0),
    CellCoord::new(-2, 1, 0),
    CellCoord::new(-1, -1, 0),
    CellCoord::new(1, -2, 0),
];

static SQUARE_DIRECTIONS: [CellCoord; 4] = [
    CellCoord::new(1, 0, 0),
    CellCoord::new(0, -1, 0),
    CellCoord::new(-1, 0, 0),
    CellCoord::new(0, 1, 0),
];

static SQUARE_DIAGONALS: [CellCoord; 4] = [
    CellCoord::new(-1, -1, 0),
    CellCoord::new(-1, 1, 0),
    CellCoord::new(1, 1, 0),
    CellCoord::new(1, -1, 0),
];

/// Shape tag for every cell of a grid.
///
/// Grid and pathfinder code only call the capability methods below and
/// never match on the variant themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellShape {
    #[default]
    Hex,
    Square,
}

impl CellShape {
    /// Neighbor offsets in a fixed order. Index `i` is the `direction_index`
    /// accepted by [`Cell::neighbor`](super::Cell::neighbor).
    pub fn directions(self) -> &'static [CellCoord] {
        match self {
            CellShape::Hex => &HEX_DIRECTIONS,
            CellShape::Square => &SQUARE_DIRECTIONS,
        }
    }

    pub fn diagonals(self) -> &'static [CellCoord] {
        match self {
            CellShape::Hex => &HEX_DIAGONALS,
            CellShape::Square => &SQUARE_DIAGONALS,
        }
    }

    pub fn direction_count(self) -> usize {
        self.directions().len()
    }

    pub fn diagonal_count(self) -> usize {
        self.diagonals().len()
    }

    /// Number of outline corners.
    pub fn corner_count(self) -> usize {
        match self {
            CellShape::Hex => 6,
            CellShape::Square => 4,
        }
    }

    /// Grid distance in steps between two coordinates.
    ///
    /// Hex uses the cube metric `max(|dq|, |dr|, |ds|)`, square uses
    /// Manhattan distance to match its four edge neighbors. A layer change
    /// costs one step per level.
    pub fn distance(self, a: CellCoord, b: CellCoord) -> u32 {
        let dq = a.q.abs_diff(b.q);
        let dr = a.r.abs_diff(b.r);
        let ds = a.s.abs_diff(b.s);
        let planar = match self {
            CellShape::Hex => dq.max(dr).max(ds),
            CellShape::Square => dq.saturating_add(dr),
        };
        planar.saturating_add(a.h.abs_diff(b.h))
    }

    /// Fewest steps between two coordinates when diagonal moves are allowed.
    ///
    /// Square becomes Chebyshev. A hex diagonal covers two cube steps, so the
    /// bound is half the cube distance, rounded up.
    pub fn diagonal_distance(self, a: CellCoord, b: CellCoord) -> u32 {
        let dq = a.q.abs_diff(b.q);
        let dr = a.r.abs_diff(b.r);
        let planar = match self {
            CellShape::Hex => {
                let ds = a.s.abs_diff(b.s);
                dq.max(dr).max(ds).div_ceil(2)
            }
            CellShape::Square => dq.max(dr),
        };
        planar + a.h.abs_diff(b.h)
    }

    /// Rows `r` of column `q` (relative to the center) inside the metric
    /// ball of radius `n`: a hexagon for hex, a diamond for square.
    pub fn range_rows(self, q: i32, n: i32) -> RangeInclusive<i32> {
        match self {
            CellShape::Hex => {
                let neg_q = q.saturating_neg();
                (-n).max(neg_q.saturating_sub(n))..=n.min(neg_q.saturating_add(n))
            }
            CellShape::Square => {
                let rest = n.saturating_sub(q.saturating_abs());
                -rest..=rest
            }
        }
    }

    /// Number of offsets `range_rows` yields over `-radius..=radius`,
    /// saturating at `u64::MAX`.
    pub fn range_area(self, radius: u32) -> u64 {
        let n = u64::from(radius);
        let k = match self {
            CellShape::Hex => 3,
            CellShape::Square => 2,
        };
        n.saturating_mul(n + 1).saturating_mul(k).saturating_add(1)
    }

    /// Rows `r` of column `q` on a generated board of extent `n`:
    /// a hexagon for hex, a full `(2n+1)^2` square for square.
    pub fn board_rows(self, q: i32, n: i32) -> RangeInclusive<i32> {
        match self {
            CellShape::Hex => self.range_rows(q, n),
            CellShape::Square => -n..=n,
        }
    }

    /// Extent of one cell along X.
    pub fn width(self, radius: f32) -> f32 {
        match self {
            CellShape::Hex => radius * 2.0,
            CellShape::Square => radius,
        }
    }

    /// Extent of one cell along Z.
    pub fn length(self, radius: f32) -> f32 {
        match self {
            CellShape::Hex => radius * SQRT_3,
            CellShape::Square => radius,
        }
    }

    pub fn perimeter(self, radius: f32) -> f32 {
        match self {
            CellShape::Hex => radius * 6.0,
            CellShape::Square => radius * 4.0,
        }
    }

    /// Planar center of a cell in world units (X, Z).
    pub fn to_planar(self, coord: CellCoord, cell_size: f32) -> Vec2 {
        let q = coord.q as f32;
        let r = coord.r as f32;
        match self {
            CellShape::Hex => Vec2::new(cell_size * 1.5 * q, cell_size * SQRT_3 * (r + q * 0.5)),
            CellShape::Square => Vec2::new(q * cell_size, r * cell_size),
        }
    }

    /// Fractional `(q, r)` for a planar world position. Inverse of [`to_planar`](Self::to_planar)
    /// before rounding.
    pub fn from_planar(self, planar: Vec2, cell_size: f32) -> (f32, f32) {
        match self {
            CellShape::Hex => {
                let q = (2.0 / 3.0) * planar.x / cell_size;
                let r = (SQRT_3 / 3.0 * planar.y - planar.x / 3.0) / cell_size;
                (q, r)
            }
            CellShape::Square => (planar.x / cell_size, planar.y / cell_size),
        }
    }

    /// Snaps fractional `(q, r)` to the containing cell.
    ///
    /// Hex: round each cube axis half away from zero, then recompute the axis
    /// with the largest rounding error from the other two (ties resolve q
    /// first, then r, otherwise s).
    ///
    /// Square: `floor(x + 0.5)` per axis, so a point exactly on a boundary
    /// belongs to the cell with the higher index.
    pub fn round(self, q: f32, r: f32) -> (i32, i32) {
        match self {
            CellShape::Hex => cube_round(q, r),
            CellShape::Square => ((q + 0.5).floor() as i32, (r + 0.5).floor() as i32),
        }
    }

    /// Outline corners around the cell center, scaled by `scale`
    /// (the `tile_scale` of a grid leaves a gap between tiles when < 1).
    pub fn outline(self, radius: f32, scale: f32) -> Vec<Vec2> {
        match self {
            CellShape::Hex => (0..6)
                .map(|i| {
                    let angle = PI / 3.0 * i as f32;
                    Vec2::new(angle.cos(), angle.sin()) * radius * scale
                })
                .collect(),
            CellShape::Square => {
                let half = radius * scale * 0.5;
                vec![
                    Vec2::new(half, half),
                    Vec2::new(-half, half),
                    Vec2::new(-half, -half),
                    Vec2::new(half, -half),
                ]
            }
        }
    }
}

fn cube_round(q: f32, r: f32) -> (i32, i32) {
    let s = -q - r;

    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let q_diff = (rq - q).abs();
    let r_diff = (rr - r).abs();
    let s_diff = (rs - s).abs();

    if q_diff >= r_diff && q_diff >= s_diff {
        rq = -rr - rs;
    } else if r_diff >= s_diff {
        rr = -rq - rs;
    }

    (rq as i32, rr as i32)
}

// ============================================================================
// GEOMETRY DESCRIPTORS
// ============================================================================

/// Outline vertex handed to renderers, laid out for direct buffer upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct OutlineVertex {
    pub position: [f32; 3],
}

static_assertions::assert_eq_size!(OutlineVertex, [f32; 3]);

impl OutlineVertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
        }
    }
}

/// Shape constants for one grid, computed once when the grid is built.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGeometry {
    pub shape: CellShape,
    pub radius: f32,
    pub width: f32,
    pub length: f32,
    pub perimeter: f32,
    /// Tile outline in the XZ plane, relative to the cell center.
    pub outline: Vec<Vec2>,
}

impl CellGeometry {
    pub fn new(shape: CellShape, radius: f32, tile_scale: f32) -> Self {
        Self {
            shape,
            radius,
            width: shape.width(radius),
            length: shape.length(radius),
            perimeter: shape.perimeter(radius),
            outline: shape.outline(radius, tile_scale),
        }
    }

    /// Outline as a closed loop of vertices at height `y`.
    ///
    /// The first corner is repeated at the end so line-strip renderers
    /// can draw it without extra indices.
    pub fn outline_vertices(&self, y: f32) -> Vec<OutlineVertex> {
        self.outline
            .iter()
            .chain(self.outline.first())
            .map(|p| OutlineVertex::new(Vec3::new(p.x, y, p.y)))
            .collect()
    }
}
