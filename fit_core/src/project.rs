//! # Project Drafts
//!
//! Once a client picks one of the ranked layouts, the chosen [`FitResult`]
//! is turned into a [`ProjectDraft`]: the record a persistence layer stores
//! to start a construction project. Drafts serialize as JSON (see
//! [`file_io`](crate::file_io) for atomic saves).
//!
//! Stored dimensions are rounded to centimeters; the unrounded values stay
//! available on the `FitResult` the draft was built from.
//!
//! ## Example
//!
//! ```rust
//! use chrono::Month;
//! use fit_core::catalog::{ClearanceDefaults, PoolPreset};
//! use fit_core::fit::{Rotation, TerrainFitEvaluator};
//! use fit_core::project::{ClientInfo, ProjectDraft, ProjectStatus};
//! use fit_core::settings::EngineSettings;
//! use fit_core::terrain::Terrain;
//!
//! let evaluator = TerrainFitEvaluator::new(&EngineSettings::default(), Month::November);
//! let terrain = Terrain::new(12.0, 9.0, ClearanceDefaults::default());
//! let preset = PoolPreset::new("classic-6x3", "Classic", 6.0, 3.0, 1.4).with_cushion(0.3);
//! let fit = evaluator.evaluate(&terrain, &preset, Rotation::Deg0).unwrap().unwrap();
//!
//! let draft = ProjectDraft::from_fit(&fit, ClientInfo::new("Pool for the Garcias"));
//! assert_eq!(draft.status, ProjectStatus::Draft);
//! assert_eq!(draft.excavation_length_m, 6.6);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fit::FitResult;

/// Current schema version for saved drafts
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Lifecycle of a construction project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Budgeted,
    Approved,
    InProgress,
    Completed,
    Cancelled,
}

/// Who the project is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClientInfo {
    /// Client or project display name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Site address or description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ClientInfo {
    pub fn new(name: impl Into<String>) -> Self {
        ClientInfo {
            name: name.into(),
            ..ClientInfo::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Initial project record derived from a chosen layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub id: Uuid,

    pub created: DateTime<Utc>,

    pub client: ClientInfo,

    /// Catalog id of the chosen preset
    pub preset_id: String,

    /// Orientation the layout was chosen at (0 or 90)
    pub rotation: u16,

    /// Excavation along the terrain length (m, 2 decimals)
    pub excavation_length_m: f64,

    /// Excavation across the terrain width (m, 2 decimals)
    pub excavation_width_m: f64,

    /// Shell depth plus floor cushion (m, 2 decimals)
    pub excavation_depth_m: f64,

    /// Shell perimeter `2 (l + w)` (m)
    pub perimeter_m: f64,

    /// Water surface `l × w` (m²)
    pub water_mirror_area_m2: f64,

    /// `l × w × average depth` (m³)
    pub volume_m3: f64,

    /// Purchased materials; starts at zero
    pub material_cost: f64,

    /// Total from the fit's cost estimate
    pub estimated_total: f64,

    pub status: ProjectStatus,
}

impl ProjectDraft {
    /// Build a draft from a feasible fit.
    pub fn from_fit(fit: &FitResult, client: ClientInfo) -> Self {
        let preset = &fit.preset;
        let perimeter = 2.0 * (preset.length_m + preset.width_m);
        let water_mirror = preset.length_m * preset.width_m;
        let volume = water_mirror * preset.average_depth_m();

        ProjectDraft {
            version: SCHEMA_VERSION.to_string(),
            id: Uuid::new_v4(),
            created: Utc::now(),
            client,
            preset_id: preset.id.clone(),
            rotation: fit.position.rotation.degrees(),
            excavation_length_m: round_cm(fit.excavation.length_m),
            excavation_width_m: round_cm(fit.excavation.width_m),
            excavation_depth_m: round_cm(fit.excavation.depth_m),
            perimeter_m: round_cm(perimeter),
            water_mirror_area_m2: round_cm(water_mirror),
            volume_m3: round_cm(volume),
            material_cost: 0.0,
            estimated_total: fit.estimated_cost.total,
            status: ProjectStatus::Draft,
        }
    }
}

/// Round to two decimals.
fn round_cm(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
