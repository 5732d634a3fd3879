//! Grid Configuration
//!
//! Generation parameters for a board. `Default` gives a radius-5 hex board
//! with 10-unit cells. Every field has a serde default so a partial JSON
//! document like `{"shape": "square", "size": 3}` is a valid config.

use serde::{Deserialize, Serialize};

use super::error::GridError;
use crate::cell::CellShape;

/// Extrusion parameters passed through to tile mesh builders.
///
/// The engine does not read these; they travel with the grid snapshot so a
/// reloaded board renders the same.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtrudeSettings {
    /// Extrusion depth
    pub amount: f32,
    pub bevel_enabled: bool,
    pub bevel_segments: u32,
    pub steps: u32,
    pub bevel_size: f32,
    pub bevel_thickness: f32,
}

impl Default for ExtrudeSettings {
    fn default() -> Self {
        Self {
            amount: 1.0,
            bevel_enabled: true,
            bevel_segments: 1,
            steps: 1,
            bevel_size: 0.5,
            bevel_thickness: 0.5,
        }
    }
}

/// Board generation configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Shape of every cell on the board
    pub shape: CellShape,
    /// Cell radius in world units (side length for squares)
    pub cell_size: f32,
    /// Extent of the generated board: hex radius, or half-width of the square
    pub size: i32,
    /// World-space Y distance between layers
    pub layer_height: f32,
    /// Outline scale handed to renderers (1.0 = tiles touch)
    pub tile_scale: f32,
    pub extrude_settings: ExtrudeSettings,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            shape: CellShape::Hex,
            cell_size: 10.0,
            size: 5,
            layer_height: 1.0,
            tile_scale: 0.95,
            extrude_settings: ExtrudeSettings::default(),
        }
    }
}

impl GridConfig {
    /// Hex board of the given radius.
    pub fn hex(cell_size: f32, size: i32) -> Self {
        Self {
            shape: CellShape::Hex,
            cell_size,
            size,
            ..Default::default()
        }
    }

    /// Square board spanning `-size..=size` on both axes.
    pub fn square(cell_size: f32, size: i32) -> Self {
        Self {
            shape: CellShape::Square,
            cell_size,
            size,
            ..Default::default()
        }
    }

    /// Parses a config from JSON and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, GridError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects parameters that would produce a corrupt grid.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.size < 0 {
            return Err(GridError::InvalidSize(self.size));
        }
        if !is_positive(self.cell_size) {
            return Err(GridError::InvalidCellSize(self.cell_size));
        }
        if !is_positive(self.layer_height) {
            return Err(GridError::InvalidLayerHeight(self.layer_height));
        }
        if !is_positive(self.tile_scale) {
            return Err(GridError::InvalidTileScale(self.tile_scale));
        }
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
