//! Grid Snapshot
//!
//! Plain serializable form of a grid for persistence and reload:
//!
//! ```json
//! { "shape": "hex", "size": 2, "cellSize": 15.0, "layerHeight": 1.0,
//!   "cells": [{ "q": 0, "r": 0, "s": 0, "h": 0, "walkable": true }],
//!   "autogenerated": true, "extrudeSettings": { ... } }
//! ```
//!
//! Tiles are owned by the application and are not part of the snapshot.
//! A document with `autogenerated: true` and no `cells` is regenerated from
//! `size` on load.

use serde::{Deserialize, Serialize};

use super::board::Grid;
use super::config::{ExtrudeSettings, GridConfig};
use super::error::GridError;
use crate::cell::{CellCoord, CellShape};

/// One cell as stored in a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub q: i32,
    pub r: i32,
    /// Written for readability, ignored on load (always recomputed as `-q - r`).
    #[serde(default)]
    pub s: i32,
    #[serde(default)]
    pub h: i32,
    #[serde(default = "default_true")]
    pub walkable: bool,
}

impl CellRecord {
    pub fn coord(&self) -> CellCoord {
        CellCoord::new(self.q, self.r, self.h)
    }
}

fn default_true() -> bool {
    true
}

fn default_layer_height() -> f32 {
    GridConfig::default().layer_height
}

fn default_tile_scale() -> f32 {
    GridConfig::default().tile_scale
}

/// Serializable grid state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    #[serde(default)]
    pub shape: CellShape,
    pub size: i32,
    pub cell_size: f32,
    #[serde(default = "default_layer_height")]
    pub layer_height: f32,
    #[serde(default = "default_tile_scale")]
    pub tile_scale: f32,
    #[serde(default)]
    pub cells: Vec<CellRecord>,
    #[serde(default)]
    pub autogenerated: bool,
    #[serde(default)]
    pub extrude_settings: ExtrudeSettings,
}

impl GridSnapshot {
    pub fn config(&self) -> GridConfig {
        GridConfig {
            shape: self.shape,
            cell_size: self.cell_size,
            size: self.size,
            layer_height: self.layer_height,
            tile_scale: self.tile_scale,
            extrude_settings: self.extrude_settings,
        }
    }
}

impl<T> Grid<T> {
    /// Captures the grid's cells and settings. Cells are sorted by
    /// coordinate so equal grids produce identical snapshots.
    pub fn snapshot(&self) -> GridSnapshot {
        let mut cells: Vec<CellRecord> = self
            .cells()
            .map(|cell| {
                let c = cell.coord();
                CellRecord {
                    q: c.q,
                    r: c.r,
                    s: c.s,
                    h: c.h,
                    walkable: cell.walkable,
                }
            })
            .collect();
        cells.sort_by_key(CellRecord::coord);

        let config = self.config();
        GridSnapshot {
            shape: config.shape,
            size: config.size,
            cell_size: config.cell_size,
            layer_height: config.layer_height,
            tile_scale: config.tile_scale,
            cells,
            autogenerated: self.is_autogenerated(),
            extrude_settings: config.extrude_settings,
        }
    }

    /// Rebuilds a grid from a snapshot, validating it first.
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Self, GridError> {
        let config = snapshot.config();

        if snapshot.autogenerated && snapshot.cells.is_empty() {
            return Self::generated(config);
        }

        let mut grid = Self::new(config)?;
        for record in &snapshot.cells {
            let coord = record.coord();
            if !grid.add_cell(coord) {
                return Err(GridError::DuplicateCell(coord));
            }
            grid.set_walkable(coord, record.walkable);
        }
        grid.mark_autogenerated(snapshot.autogenerated);

        log::debug!(
            "loaded {:?} grid snapshot: {} cells (autogenerated={})",
            config.shape,
            grid.len(),
            snapshot.autogenerated
        );
        Ok(grid)
    }

    pub fn to_json(&self) -> Result<String, GridError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    pub fn to_json_pretty(&self) -> Result<String, GridError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn from_json(json: &str) -> Result<Self, GridError> {
        let snapshot: GridSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(&snapshot)
    }
}
