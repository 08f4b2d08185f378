//! # File I/O Module
//!
//! JSON file operations for the engine's inputs and outputs:
//! - **Atomic saves**: Write to .tmp, fsync, rename to prevent corruption
//! - **Version validation**: Catalogs and drafts carry a schema version
//! - **Validation on load**: Everything loaded is checked before it is returned
//!
//! ## Example
//!
//! ```rust,no_run
//! use fit_core::file_io::{load_catalog, load_settings, load_terrain, save_json_atomic};
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("settings.json"))?;
//! let catalog = load_catalog(Path::new("catalog.json"))?;
//! let defaults = catalog.clearances_or(settings.default_clearances);
//! let terrain = load_terrain(Path::new("terrain.json"), defaults)?;
//! save_json_atomic(&terrain, Path::new("terrain-copy.json"))?;
//! # Ok::<(), fit_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::perimeter_tiles::TileLayoutConfig;
use crate::catalog::{ClearanceDefaults, PresetCatalog, CATALOG_SCHEMA_VERSION};
use crate::errors::{CalcError, CalcResult};
use crate::project::{ProjectDraft, SCHEMA_VERSION};
use crate::settings::EngineSettings;
use crate::terrain::Terrain;

/// Serialize `value` as pretty JSON and write it atomically.
///
/// The save process:
/// 1. Serialize to JSON
/// 2. Write to a temporary file next to `path` (`<ext>.tmp`)
/// 3. Sync to disk (fsync)
/// 4. Rename over `path` (atomic on most filesystems)
pub fn save_json_atomic<T: Serialize + ?Sized>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension(
        path.extension()
            .map(|e| format!("{}.tmp", e.to_string_lossy()))
            .unwrap_or_else(|| "tmp".to_string()),
    );

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = json.len(), "saved json");
    Ok(())
}

/// Read and parse a JSON file.
fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// Load a preset catalog.
///
/// # Returns
///
/// * `Ok(PresetCatalog)` - Loaded and validated catalog
/// * `Err(CalcError::VersionMismatch)` - Catalog schema is incompatible
/// * `Err(CalcError::InvalidInput)` - A preset has invalid dimensions or a duplicate id
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_catalog(path: &Path) -> CalcResult<PresetCatalog> {
    let catalog: PresetCatalog = read_json(path)?;
    validate_version(&catalog.version, CATALOG_SCHEMA_VERSION)?;
    catalog.validate()?;
    debug!(path = %path.display(), presets = catalog.len(), "loaded catalog");
    Ok(catalog)
}

/// Terrain file shape: clearances may be omitted.
#[derive(Debug, Deserialize)]
struct TerrainFile {
    length_m: f64,
    width_m: f64,
    min_lateral_space_m: Option<f64>,
    min_frontal_space_m: Option<f64>,
    min_back_space_m: Option<f64>,
}

/// Load a terrain. Missing clearances are taken from `defaults`.
pub fn load_terrain(path: &Path, defaults: ClearanceDefaults) -> CalcResult<Terrain> {
    let file: TerrainFile = read_json(path)?;
    let terrain = Terrain {
        length_m: file.length_m,
        width_m: file.width_m,
        min_lateral_space_m: file.min_lateral_space_m.unwrap_or(defaults.min_lateral_space_m),
        min_frontal_space_m: file.min_frontal_space_m.unwrap_or(defaults.min_frontal_space_m),
        min_back_space_m: file.min_back_space_m.unwrap_or(defaults.min_back_space_m),
    };
    terrain.validate()?;
    Ok(terrain)
}

/// Load engine settings. Omitted fields keep their defaults.
pub fn load_settings(path: &Path) -> CalcResult<EngineSettings> {
    let settings: EngineSettings = read_json(path)?;
    settings.validate()?;
    debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Load a per-side deck tiling layout.
pub fn load_tile_layout(path: &Path) -> CalcResult<TileLayoutConfig> {
    read_json(path)
}

/// Save a project draft with atomic write semantics.
pub fn save_draft(draft: &ProjectDraft, path: &Path) -> CalcResult<()> {
    save_json_atomic(draft, path)
}

/// Load a project draft, checking its schema version.
pub fn load_draft(path: &Path) -> CalcResult<ProjectDraft> {
    let draft: ProjectDraft = read_json(path)?;
    validate_version(&draft.version, SCHEMA_VERSION)?;
    Ok(draft)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str, current: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: current.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = current.split('.').filter_map(|p| p.parse().ok()).collect();

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    // Major version must match
    if file_major != current_major {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor may contain breaking changes
    if current_major == 0 {
        if let (Some(&file_minor), Some(&current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::perimeter_tiles::{FirstRingType, SideTiling};
    use crate::catalog::PoolPreset;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let catalog = PresetCatalog::new(vec![
            PoolPreset::new("a", "Compact", 4.0, 3.0, 1.5),
            PoolPreset::new("b", "Family", 7.0, 3.5, 1.4).with_cushion(0.3),
        ]);
        save_json_atomic(&catalog, &path).unwrap();

        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        save_json_atomic(&vec![1, 2, 3], &path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("report.json.tmp").exists());
    }

    #[test]
    fn test_catalog_with_invalid_preset_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"{ "presets": [ { "id": "x", "name": "X", "length_m": -5.0, "width_m": 2.5, "depth_m": 1.3 } ] }"#,
        )
        .unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_catalog_version_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"{ "version": "1.0.0", "presets": [] }"#).unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_catalog(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_terrain_clearances_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("terrain.json");
        fs::write(&path, r#"{ "length_m": 12.0, "width_m": 9.0, "min_back_space_m": 2.0 }"#).unwrap();

        let terrain = load_terrain(&path, ClearanceDefaults::default()).unwrap();
        assert_eq!(terrain.length_m, 12.0);
        assert_eq!(terrain.min_lateral_space_m, 0.5);
        assert_eq!(terrain.min_frontal_space_m, 1.0);
        assert_eq!(terrain.min_back_space_m, 2.0);
    }

    #[test]
    fn test_settings_clearances_apply_when_catalog_has_none() {
        let dir = tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        let settings_path = dir.path().join("settings.json");
        let terrain_path = dir.path().join("terrain.json");
        fs::write(&catalog_path, r#"{ "presets": [] }"#).unwrap();
        fs::write(&settings_path, r#"{ "default_clearances": { "min_back_space_m": 3.0 } }"#).unwrap();
        fs::write(&terrain_path, r#"{ "length_m": 12.0, "width_m": 9.0 }"#).unwrap();

        let catalog = load_catalog(&catalog_path).unwrap();
        let settings = load_settings(&settings_path).unwrap();
        let defaults = catalog.clearances_or(settings.default_clearances);

        let terrain = load_terrain(&terrain_path, defaults).unwrap();
        assert_eq!(terrain.min_back_space_m, 3.0);
        assert_eq!(terrain.min_lateral_space_m, 0.5);
        assert_ne!(terrain, load_terrain(&terrain_path, ClearanceDefaults::default()).unwrap());
    }

    #[test]
    fn test_terrain_is_validated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("terrain.json");
        fs::write(&path, r#"{ "length_m": 0.0, "width_m": 9.0 }"#).unwrap();
        assert!(load_terrain(&path, ClearanceDefaults::default()).is_err());
    }

    #[test]
    fn test_partial_settings_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "cost_rates": { "equipment_base": 400000.0 } }"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.cost_rates.equipment_base, 400_000.0);
        assert_eq!(settings.tile_spec, EngineSettings::default().tile_spec);
    }

    #[test]
    fn test_load_tile_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let layout = TileLayoutConfig::uniform(SideTiling::ring(FirstRingType::WhaleBack, 2));
        save_json_atomic(&layout, &path).unwrap();

        assert_eq!(load_tile_layout(&path).unwrap(), layout);
    }

    #[test]
    fn test_save_and_load_draft() {
        use crate::fit::{Rotation, TerrainFitEvaluator};
        use crate::project::ClientInfo;
        use chrono::Month;

        let dir = tempdir().unwrap();
        let path = dir.path().join("draft.json");

        let evaluator = TerrainFitEvaluator::new(&EngineSettings::default(), Month::March);
        let terrain = Terrain::new(10.0, 8.0, ClearanceDefaults::default());
        let preset = PoolPreset::new("classic", "Classic", 6.0, 3.0, 1.4);
        let fit = evaluator.evaluate(&terrain, &preset, Rotation::Deg0).unwrap().unwrap();
        let draft = ProjectDraft::from_fit(&fit, ClientInfo::new("Garcia"));

        save_draft(&draft, &path).unwrap();
        let loaded = load_draft(&path).unwrap();
        assert_eq!(loaded.id, draft.id);
        assert_eq!(loaded.preset_id, "classic");
        assert_eq!(loaded.excavation_length_m, 6.0);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(CATALOG_SCHEMA_VERSION, CATALOG_SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5", "0.1.0").is_ok());
        assert!(validate_version("0.0.9", "0.1.0").is_ok());
        assert!(validate_version("1.0.0", "0.1.0").is_err());
        assert!(validate_version("0.2.0", "0.1.0").is_err());
        assert!(validate_version("garbage", "0.1.0").is_err());
    }
}
