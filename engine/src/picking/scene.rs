//! Pick Scene
//!
//! What the picker casts against. Rendering owns the real scene; the picker
//! only needs something that answers "what does this ray hit, nearest
//! first" and hands back the logical structure each hit object was built
//! for.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::ray::Ray;
use crate::cell::CellCoord;
use crate::grid::Grid;

/// Logical structure behind a pickable object on a grid board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "coord", rename_all = "lowercase")]
pub enum StructureRef {
    Cell(CellCoord),
    Tile(CellCoord),
}

impl StructureRef {
    /// Coordinate of the cell the structure sits on.
    pub fn coord(&self) -> CellCoord {
        match *self {
            StructureRef::Cell(coord) | StructureRef::Tile(coord) => coord,
        }
    }

    pub fn is_tile(&self) -> bool {
        matches!(self, StructureRef::Tile(_))
    }
}

/// One ray hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<S> {
    /// Back-reference of the object that was hit.
    pub structure: S,
    /// World-space hit point.
    pub point: Vec3,
    /// Distance from the ray origin.
    pub distance: f32,
}

/// Something the picker can cast rays against.
pub trait PickScene<S> {
    /// All hits along `ray`, sorted nearest first.
    fn intersect(&self, ray: &Ray) -> Vec<Intersection<S>>;
}

/// Volume of a pickable object.
#[derive(Debug, Clone, PartialEq)]
pub enum PickShape {
    /// Axis-aligned box.
    Box { min: Vec3, max: Vec3 },
    /// Convex outline (X/Z offsets from `base`) extruded `height` up from
    /// `base.y`.
    Prism {
        base: Vec3,
        outline: Arc<[Vec2]>,
        height: f32,
    },
}

impl PickShape {
    /// Distance along `ray` to this shape, if it is hit.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self {
            PickShape::Box { min, max } => ray.intersect_aabb(*min, *max),
            PickShape::Prism {
                base,
                outline,
                height,
            } => ray.intersect_prism(*base, outline, *height),
        }
    }
}

/// A pickable volume tagged with the structure it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct PickObject<S> {
    pub shape: PickShape,
    /// Set once when the object is built; hits resolve to this value.
    pub structure: S,
}

impl<S> PickObject<S> {
    /// Axis-aligned box spanning `min` and `max` (in either order).
    pub fn new(min: Vec3, max: Vec3, structure: S) -> Self {
        Self {
            shape: PickShape::Box {
                min: min.min(max),
                max: min.max(max),
            },
            structure,
        }
    }

    /// Outline extruded `height` up from `base`.
    pub fn prism(base: Vec3, outline: Arc<[Vec2]>, height: f32, structure: S) -> Self {
        Self {
            shape: PickShape::Prism {
                base,
                outline,
                height,
            },
            structure,
        }
    }
}

/// Flat list of pickable objects; the simplest [`PickScene`].
///
/// Hits at equal distance keep insertion order.
#[derive(Debug, Clone)]
pub struct PickGroup<S> {
    objects: Vec<PickObject<S>>,
}

impl<S> Default for PickGroup<S> {
    fn default() -> Self {
        Self { objects: Vec::new() }
    }
}

impl<S> PickGroup<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: PickObject<S>) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[PickObject<S>] {
        &self.objects
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl PickGroup<StructureRef> {
    /// One prism per cell: the full cell outline (ignoring `tile_scale`),
    /// `extrude_settings.amount` tall.
    ///
    /// Outlines tile the board without overlap, so a ray straight down
    /// resolves to the same cell as [`Grid::pixel_to_cell`]. Objects are
    /// ordered by coordinate, which makes ties on shared edges
    /// deterministic.
    ///
    /// Cells holding a tile resolve to [`StructureRef::Tile`], the rest to
    /// [`StructureRef::Cell`].
    pub fn from_grid<T>(grid: &Grid<T>) -> Self {
        let config = grid.config();
        let outline: Arc<[Vec2]> = config.shape.outline(config.cell_size, 1.0).into();
        let height = config.extrude_settings.amount;

        let mut cells: Vec<_> = grid.cells().collect();
        cells.sort_by_key(|cell| cell.coord());

        let objects = cells
            .into_iter()
            .map(|cell| {
                let coord = cell.coord();
                let structure = if cell.tile().is_some() {
                    StructureRef::Tile(coord)
                } else {
                    StructureRef::Cell(coord)
                };
                PickObject::prism(grid.cell_to_pixel(coord), Arc::clone(&outline), height, structure)
            })
            .collect();
        Self { objects }
    }
}

impl<S: Clone> PickScene<S> for PickGroup<S> {
    fn intersect(&self, ray: &Ray) -> Vec<Intersection<S>> {
        let mut hits: Vec<Intersection<S>> = self
            .objects
            .iter()
            .filter_map(|object| {
                object.shape.intersect(ray).map(|distance| Intersection {
                    structure: object.structure.clone(),
                    point: ray.at(distance),
                    distance,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
