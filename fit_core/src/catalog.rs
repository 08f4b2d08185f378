//! # Pool Preset Catalog
//!
//! Pool presets are supplied by an external catalog (a database, a vendor
//! price list, a JSON file). The engine only reads them. [`CatalogProvider`]
//! is the seam: anything that can hand over an *ordered* list of presets and
//! the clearance defaults used to seed a [`Terrain`](crate::terrain::Terrain)
//! can drive a search.
//!
//! Catalog order matters. The search uses a stable sort, so among equal fit
//! scores the preset listed first wins.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "clearance_defaults": {
//!     "min_lateral_space_m": 0.5,
//!     "min_frontal_space_m": 1.0,
//!     "min_back_space_m": 1.0
//!   },
//!   "presets": [
//!     {
//!       "id": "classic-6x3",
//!       "name": "Classic 6 x 3",
//!       "length_m": 6.0,
//!       "width_m": 3.0,
//!       "depth_m": 1.4,
//!       "lateral_cushion_space_m": 0.3
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::units::{Meters, SquareMeters};

/// Current schema version for catalog files
pub const CATALOG_SCHEMA_VERSION: &str = "0.1.0";

/// A rectangular pool model from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolPreset {
    /// Catalog identifier
    pub id: String,

    /// Display name (e.g., "Classic 6 x 3")
    pub name: String,

    /// Inner shell length in meters
    pub length_m: f64,

    /// Inner shell width in meters
    pub width_m: f64,

    /// Shell depth in meters (shallow end for variable-depth pools)
    pub depth_m: f64,

    /// Deep-end depth in meters, if the floor slopes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_end_m: Option<f64>,

    /// Excavation margin added around the shell on every side
    #[serde(default)]
    pub lateral_cushion_space_m: f64,

    /// Extra excavation depth below the shell for the bedding layer
    #[serde(default)]
    pub floor_cushion_depth_m: f64,
}

impl PoolPreset {
    /// Create a constant-depth preset with no cushions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fit_core::catalog::PoolPreset;
    ///
    /// let preset = PoolPreset::new("p-1", "Compact", 4.0, 3.0, 1.5).with_cushion(0.3);
    /// assert_eq!(preset.lateral_cushion_space_m, 0.3);
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>, length_m: f64, width_m: f64, depth_m: f64) -> Self {
        PoolPreset {
            id: id.into(),
            name: name.into(),
            length_m,
            width_m,
            depth_m,
            depth_end_m: None,
            lateral_cushion_space_m: 0.0,
            floor_cushion_depth_m: 0.0,
        }
    }

    /// Set the lateral cushion space
    pub fn with_cushion(mut self, cushion_m: f64) -> Self {
        self.lateral_cushion_space_m = cushion_m;
        self
    }

    /// Set the floor cushion depth
    pub fn with_floor_cushion(mut self, floor_cushion_m: f64) -> Self {
        self.floor_cushion_depth_m = floor_cushion_m;
        self
    }

    /// Set a sloped floor ending at `depth_end_m`
    pub fn with_depth_end(mut self, depth_end_m: f64) -> Self {
        self.depth_end_m = Some(depth_end_m);
        self
    }

    /// Validate preset dimensions.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("length_m", self.length_m)?;
        require_positive("width_m", self.width_m)?;
        require_positive("depth_m", self.depth_m)?;
        if let Some(depth_end) = self.depth_end_m {
            require_positive("depth_end_m", depth_end)?;
        }
        require_non_negative("lateral_cushion_space_m", self.lateral_cushion_space_m)?;
        require_non_negative("floor_cushion_depth_m", self.floor_cushion_depth_m)?;
        Ok(())
    }

    /// Average water depth; equal to `depth_m` unless the floor slopes.
    pub fn average_depth_m(&self) -> f64 {
        match self.depth_end_m {
            Some(end) if end != self.depth_m => (self.depth_m + end) / 2.0,
            _ => self.depth_m,
        }
    }

    /// Shell geometry from the unrotated preset dimensions.
    pub fn shell_geometry(&self) -> ShellGeometry {
        ShellGeometry::new(self.length_m, self.width_m, self.depth_m)
    }
}

/// Derived shell geometry shared by the cost and material estimators.
///
/// Uses the (shallow-end) `depth_m` throughout; estimators are defined on the
/// bounding box, not the water volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShellGeometry {
    /// length × width × depth (m³)
    pub volume_m3: f64,
    /// 2·(length·depth) + 2·(width·depth) (m²)
    pub wall_area_m2: f64,
    /// length × width (m²)
    pub floor_area_m2: f64,
    /// wall + floor (m²)
    pub total_surface_area_m2: f64,
}

impl ShellGeometry {
    pub fn new(length_m: f64, width_m: f64, depth_m: f64) -> Self {
        let (length, width, depth) = (Meters(length_m), Meters(width_m), Meters(depth_m));
        let floor = length * width;
        let walls = SquareMeters(2.0 * (length * depth).0) + SquareMeters(2.0 * (width * depth).0);
        ShellGeometry {
            volume_m3: (floor * depth).0,
            wall_area_m2: walls.0,
            floor_area_m2: floor.0,
            total_surface_area_m2: (walls + floor).0,
        }
    }
}

/// Minimum clearances a catalog recommends around an excavation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceDefaults {
    pub min_lateral_space_m: f64,
    pub min_frontal_space_m: f64,
    pub min_back_space_m: f64,
}

impl Default for ClearanceDefaults {
    fn default() -> Self {
        ClearanceDefaults {
            min_lateral_space_m: 0.5,
            min_frontal_space_m: 1.0,
            min_back_space_m: 1.0,
        }
    }
}

/// Source of pool presets for a search.
///
/// Implementors must return presets in a stable order; that order is the
/// tie-break among equal fit scores.
pub trait CatalogProvider {
    /// All presets, in catalog order.
    fn presets(&self) -> CalcResult<Vec<PoolPreset>>;

    /// Clearance defaults used to initialize a terrain.
    fn clearance_defaults(&self) -> ClearanceDefaults {
        ClearanceDefaults::default()
    }
}

/// In-memory, JSON-serializable catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetCatalog {
    /// Schema version (for migration compatibility)
    #[serde(default = "default_catalog_version")]
    pub version: String,

    /// Clearance defaults for new terrains; `None` defers to the caller's fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearance_defaults: Option<ClearanceDefaults>,

    /// Presets in display order
    pub presets: Vec<PoolPreset>,
}

fn default_catalog_version() -> String {
    CATALOG_SCHEMA_VERSION.to_string()
}

impl PresetCatalog {
    /// Create a catalog from an ordered list of presets.
    pub fn new(presets: Vec<PoolPreset>) -> Self {
        PresetCatalog {
            version: CATALOG_SCHEMA_VERSION.to_string(),
            clearance_defaults: None,
            presets,
        }
    }

    /// Set the catalog's own clearance defaults.
    pub fn with_clearance_defaults(mut self, defaults: ClearanceDefaults) -> Self {
        self.clearance_defaults = Some(defaults);
        self
    }

    /// The catalog's clearance defaults, or `fallback` when it has none.
    pub fn clearances_or(&self, fallback: ClearanceDefaults) -> ClearanceDefaults {
        self.clearance_defaults.unwrap_or(fallback)
    }

    /// Look up a preset by id.
    pub fn find(&self, preset_id: &str) -> CalcResult<&PoolPreset> {
        self.presets
            .iter()
            .find(|p| p.id == preset_id)
            .ok_or_else(|| CalcError::preset_not_found(preset_id))
    }

    /// Validate every preset and reject duplicate ids.
    pub fn validate(&self) -> CalcResult<()> {
        for (i, preset) in self.presets.iter().enumerate() {
            preset.validate()?;
            if self.presets[..i].iter().any(|p| p.id == preset.id) {
                return Err(CalcError::invalid_input(
                    "presets.id",
                    preset.id.clone(),
                    "Duplicate preset id in catalog",
                ));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl CatalogProvider for PresetCatalog {
    fn presets(&self) -> CalcResult<Vec<PoolPreset>> {
        Ok(self.presets.clone())
    }

    fn clearance_defaults(&self) -> ClearanceDefaults {
        self.clearance_defaults.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> PresetCatalog {
        PresetCatalog::new(vec![
            PoolPreset::new("a", "Compact", 4.0, 3.0, 1.5),
            PoolPreset::new("b", "Family", 7.0, 3.5, 1.4).with_cushion(0.3),
        ])
    }

    #[test]
    fn test_shell_geometry() {
        let geo = PoolPreset::new("p", "P", 4.0, 3.0, 1.5).shell_geometry();
        assert!((geo.volume_m3 - 18.0).abs() < 1e-12);
        assert!((geo.wall_area_m2 - 21.0).abs() < 1e-12);
        assert!((geo.floor_area_m2 - 12.0).abs() < 1e-12);
        assert!((geo.total_surface_area_m2 - 33.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_depth() {
        let flat = PoolPreset::new("p", "P", 8.0, 4.0, 1.2);
        assert_eq!(flat.average_depth_m(), 1.2);

        let sloped = flat.with_depth_end(1.8);
        assert!((sloped.average_depth_m() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        assert!(PoolPreset::new("p", "P", 0.0, 3.0, 1.5).validate().is_err());
        assert!(PoolPreset::new("p", "P", 4.0, -3.0, 1.5).validate().is_err());
        assert!(PoolPreset::new("p", "P", 4.0, 3.0, 0.0).validate().is_err());
        assert!(PoolPreset::new("p", "P", 4.0, 3.0, 1.5).with_cushion(-0.1).validate().is_err());
        assert!(PoolPreset::new("p", "P", 4.0, 3.0, 1.5).validate().is_ok());
    }

    #[test]
    fn test_catalog_find_and_duplicates() {
        let mut catalog = sample_catalog();
        assert_eq!(catalog.find("b").unwrap().name, "Family");
        assert_eq!(catalog.find("zzz").unwrap_err().error_code(), "PRESET_NOT_FOUND");
        assert!(catalog.validate().is_ok());

        catalog.presets.push(PoolPreset::new("a", "Dup", 5.0, 3.0, 1.5));
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_catalog_deserializes_with_defaults() {
        let json = r#"{
            "presets": [
                { "id": "x", "name": "X", "length_m": 5.0, "width_m": 2.5, "depth_m": 1.3 }
            ]
        }"#;
        let catalog: PresetCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.version, CATALOG_SCHEMA_VERSION);
        assert!(catalog.clearance_defaults.is_none());
        assert_eq!(CatalogProvider::clearance_defaults(&catalog), ClearanceDefaults::default());
        assert_eq!(catalog.presets[0].lateral_cushion_space_m, 0.0);
        assert!(catalog.presets[0].depth_end_m.is_none());
    }

    #[test]
    fn test_catalog_clearances_take_precedence_over_fallback() {
        let fallback = ClearanceDefaults {
            min_back_space_m: 3.0,
            ..ClearanceDefaults::default()
        };
        let bare = sample_catalog();
        assert_eq!(bare.clearances_or(fallback).min_back_space_m, 3.0);

        let own = sample_catalog().with_clearance_defaults(ClearanceDefaults {
            min_back_space_m: 2.0,
            ..ClearanceDefaults::default()
        });
        assert_eq!(own.clearances_or(fallback).min_back_space_m, 2.0);
    }

    #[test]
    fn test_partial_clearance_defaults() {
        let json = r#"{ "clearance_defaults": { "min_back_space_m": 3.0 }, "presets": [] }"#;
        let catalog: PresetCatalog = serde_json::from_str(json).unwrap();
        let defaults = catalog.clearance_defaults.unwrap();
        assert_eq!(defaults.min_back_space_m, 3.0);
        assert_eq!(defaults.min_lateral_space_m, 0.5);
        assert_eq!(defaults.min_frontal_space_m, 1.0);
    }

    #[test]
    fn test_provider_preserves_order() {
        let catalog = sample_catalog();
        let ids: Vec<_> = catalog.presets().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
