//! Excavation footprint of a preset at a given rotation.

use serde::{Deserialize, Serialize};

use crate::catalog::PoolPreset;
use crate::fit::Rotation;
use crate::terrain::Terrain;

/// Hole to dig for a preset: shell plus cushion on every side.
///
/// `length_m` always runs along the terrain length and `width_m` along the
/// terrain width, so at 90° the preset's own length and width are swapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExcavationFootprint {
    pub length_m: f64,
    pub width_m: f64,
    /// Shell depth plus floor cushion
    pub depth_m: f64,
    pub volume_m3: f64,
}

impl ExcavationFootprint {
    pub fn of(preset: &PoolPreset, rotation: Rotation) -> Self {
        let cushion = 2.0 * preset.lateral_cushion_space_m;
        let along_preset_length = preset.length_m + cushion;
        let along_preset_width = preset.width_m + cushion;

        let (length_m, width_m) = match rotation {
            Rotation::Deg0 => (along_preset_length, along_preset_width),
            Rotation::Deg90 => (along_preset_width, along_preset_length),
        };
        let depth_m = preset.depth_m + preset.floor_cushion_depth_m;

        ExcavationFootprint {
            length_m,
            width_m,
            depth_m,
            volume_m3: length_m * width_m * depth_m,
        }
    }

    /// Plan area (m²)
    pub fn area_m2(&self) -> f64 {
        self.length_m * self.width_m
    }

    /// Length needed along the terrain, clearances included.
    pub fn required_length_m(&self, terrain: &Terrain) -> f64 {
        self.length_m + terrain.min_frontal_space_m + terrain.min_back_space_m
    }

    /// Width needed across the terrain, clearances included.
    pub fn required_width_m(&self, terrain: &Terrain) -> f64 {
        self.width_m + 2.0 * terrain.min_lateral_space_m
    }

    /// Whether the footprint and its clearances fit on both axes.
    pub fn fits(&self, terrain: &Terrain) -> bool {
        self.required_length_m(terrain) <= terrain.length_m
            && self.required_width_m(terrain) <= terrain.width_m
    }
}
