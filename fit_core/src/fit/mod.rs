//! # Terrain Fit
//!
//! Places pool presets on a rectangular terrain, scores each feasible
//! placement and ranks them.
//!
//! ## Pipeline
//!
//! ```text
//! TerrainFitSearch::search(terrain, presets)
//!   └── for each preset, for 0° and 90°
//!         TerrainFitEvaluator::evaluate(terrain, preset, rotation)
//!           ├── ExcavationFootprint::of(preset, rotation)
//!           ├── feasibility check (footprint + clearances ≤ terrain)
//!           ├── centered placement + remaining space
//!           ├── ScoreBreakdown::compute
//!           └── CostEstimator / MaterialQuantityEstimator / SeasonalAdvisor
//! ```
//!
//! ## Coordinates
//!
//! `x` is measured across the terrain width from the left boundary, `y`
//! along the terrain length from the front boundary. Both locate the
//! excavation's corner closest to the origin.

pub mod evaluator;
pub mod footprint;
pub mod search;

pub use evaluator::{ScoreBreakdown, TerrainFitEvaluator};
pub use footprint::ExcavationFootprint;
pub use search::TerrainFitSearch;

use serde::{Deserialize, Serialize};

use crate::calculations::cost::CostEstimate;
use crate::calculations::materials::MaterialQuantities;
use crate::calculations::seasonal::SeasonalRecommendation;
use crate::catalog::PoolPreset;
use crate::errors::CalcError;

/// Orientation of the pool on the terrain.
///
/// Serializes as the integer angle (`0` or `90`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    /// Pool length along the terrain length
    Deg0,
    /// Pool length across the terrain width
    Deg90,
}

impl Rotation {
    /// Both orientations in evaluation order.
    pub const ALL: [Rotation; 2] = [Rotation::Deg0, Rotation::Deg90];

    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = CalcError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            other => Err(CalcError::invalid_input(
                "rotation",
                other.to_string(),
                "Rotation must be 0 or 90 degrees",
            )),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> u16 {
        rotation.degrees()
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Placement of the excavation on the terrain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Offset from the left boundary (m)
    pub x: f64,
    /// Offset from the front boundary (m)
    pub y: f64,
    pub rotation: Rotation,
}

/// Free space between the excavation and each boundary (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemainingSpace {
    pub left: f64,
    pub right: f64,
    pub front: f64,
    pub back: f64,
}

/// Plan dimensions of the excavation as placed (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExcavationDimensions {
    /// Along the terrain length
    pub length: f64,
    /// Across the terrain width
    pub width: f64,
}

/// A feasible placement of one preset at one rotation.
///
/// Only produced when the excavation and all clearances fit; there is no
/// "infeasible" result value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub preset: PoolPreset,
    /// Composite score, 0–100, higher is better
    pub fit_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub position: Position,
    pub remaining_space: RemainingSpace,
    pub excavation_dimensions: ExcavationDimensions,
    /// Full footprint including depth and volume
    pub excavation: ExcavationFootprint,
    pub estimated_cost: CostEstimate,
    pub materials: MaterialQuantities,
    pub seasonal_recommendation: SeasonalRecommendation,
}
