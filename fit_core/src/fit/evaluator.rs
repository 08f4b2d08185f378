//! # Terrain Fit Evaluator
//!
//! Checks whether one preset at one rotation fits a terrain and, if it does,
//! places it, scores it and attaches cost, material and seasonal estimates.
//!
//! ## Placement
//!
//! The excavation is centered across the terrain width and pushed against
//! the minimum frontal clearance:
//!
//! - `x = (terrain.width − excavation.width) / 2`
//! - `y = terrain.min_frontal_space`
//!
//! Placement is fixed; only the choice of preset and rotation is ranked.
//!
//! ## Score
//!
//! ```text
//! fit_score = 0.4 × space_utilization
//!           + 0.3 × lateral_balance
//!           + 0.3 × min_space_compliance
//! ```
//!
//! - `space_utilization`: excavation area over terrain area, in percent.
//! - `lateral_balance`: `100 − |left − right| / terrain.width × 100`. The
//!   centered placement makes this 100; it stays in the formula so that
//!   scores remain comparable if placement changes.
//! - `min_space_compliance`: mean over the four sides of
//!   `min(actual / required, 1) × 100`; a side with no requirement scores 100.

use chrono::Month;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::cost::CostEstimator;
use crate::calculations::materials::MaterialQuantityEstimator;
use crate::calculations::seasonal::SeasonalAdvisor;
use crate::catalog::PoolPreset;
use crate::errors::CalcResult;
use crate::fit::{
    ExcavationDimensions, ExcavationFootprint, FitResult, Position, RemainingSpace, Rotation,
};
use crate::settings::EngineSettings;
use crate::terrain::Terrain;

const UTILIZATION_WEIGHT: f64 = 0.4;
const BALANCE_WEIGHT: f64 = 0.3;
const COMPLIANCE_WEIGHT: f64 = 0.3;

/// The three sub-scores behind a fit score, each 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub space_utilization: f64,
    pub lateral_balance: f64,
    pub min_space_compliance: f64,
}

impl ScoreBreakdown {
    pub fn compute(terrain: &Terrain, footprint: &ExcavationFootprint, remaining: &RemainingSpace) -> Self {
        let space_utilization = footprint.area_m2() / terrain.area_m2() * 100.0;
        let lateral_balance = 100.0 - (remaining.left - remaining.right).abs() / terrain.width_m * 100.0;

        let min_space_compliance = (side_compliance(remaining.left, terrain.min_lateral_space_m)
            + side_compliance(remaining.right, terrain.min_lateral_space_m)
            + side_compliance(remaining.front, terrain.min_frontal_space_m)
            + side_compliance(remaining.back, terrain.min_back_space_m))
            / 4.0;

        ScoreBreakdown {
            space_utilization,
            lateral_balance,
            min_space_compliance,
        }
    }

    /// Weighted blend of the sub-scores.
    pub fn fit_score(&self) -> f64 {
        UTILIZATION_WEIGHT * self.space_utilization
            + BALANCE_WEIGHT * self.lateral_balance
            + COMPLIANCE_WEIGHT * self.min_space_compliance
    }
}

fn side_compliance(actual_m: f64, required_m: f64) -> f64 {
    if required_m <= 0.0 {
        return 100.0;
    }
    (actual_m / required_m).min(1.0) * 100.0
}

/// Evaluates (terrain, preset, rotation) triples.
///
/// Holds the estimators and the month used for seasonal advice, so every
/// evaluation is a pure function of its arguments.
///
/// # Example
///
/// ```rust
/// use chrono::Month;
/// use fit_core::catalog::{ClearanceDefaults, PoolPreset};
/// use fit_core::fit::{Rotation, TerrainFitEvaluator};
/// use fit_core::settings::EngineSettings;
/// use fit_core::terrain::Terrain;
///
/// let evaluator = TerrainFitEvaluator::new(&EngineSettings::default(), Month::October);
/// let terrain = Terrain::new(10.0, 8.0, ClearanceDefaults::default());
/// let preset = PoolPreset::new("p-1", "Family", 6.0, 3.0, 1.4).with_cushion(0.3);
///
/// let fit = evaluator.evaluate(&terrain, &preset, Rotation::Deg0).unwrap().unwrap();
/// assert!(fit.fit_score > 0.0 && fit.fit_score <= 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct TerrainFitEvaluator {
    cost: CostEstimator,
    materials: MaterialQuantityEstimator,
    current_month: Month,
}

impl TerrainFitEvaluator {
    pub fn new(settings: &EngineSettings, current_month: Month) -> Self {
        TerrainFitEvaluator {
            cost: CostEstimator::new(settings.cost_rates),
            materials: MaterialQuantityEstimator::new(settings.material_coefficients),
            current_month,
        }
    }

    pub fn current_month(&self) -> Month {
        self.current_month
    }

    /// Evaluate one preset at one rotation.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(FitResult))` - The placement is feasible
    /// * `Ok(None)` - The excavation plus clearances does not fit
    /// * `Err(CalcError)` - Terrain or preset violates its preconditions
    pub fn evaluate(&self, terrain: &Terrain, preset: &PoolPreset, rotation: Rotation) -> CalcResult<Option<FitResult>> {
        terrain.validate()?;
        preset.validate()?;

        let footprint = ExcavationFootprint::of(preset, rotation);
        if !footprint.fits(terrain) {
            debug!(
                preset = %preset.id,
                rotation = rotation.degrees(),
                required_length_m = footprint.required_length_m(terrain),
                required_width_m = footprint.required_width_m(terrain),
                "placement does not fit"
            );
            return Ok(None);
        }

        let x = (terrain.width_m - footprint.width_m) / 2.0;
        let y = terrain.min_frontal_space_m;
        let remaining = RemainingSpace {
            left: x,
            right: terrain.width_m - footprint.width_m - x,
            front: y,
            back: terrain.length_m - footprint.length_m - y,
        };

        let breakdown = ScoreBreakdown::compute(terrain, &footprint, &remaining);
        let fit_score = breakdown.fit_score();
        debug!(preset = %preset.id, rotation = rotation.degrees(), fit_score, "placement fits");

        Ok(Some(FitResult {
            preset: preset.clone(),
            fit_score,
            score_breakdown: breakdown,
            position: Position { x, y, rotation },
            remaining_space: remaining,
            excavation_dimensions: ExcavationDimensions {
                length: footprint.length_m,
                width: footprint.width_m,
            },
            excavation: footprint,
            estimated_cost: self.cost.estimate(preset)?,
            materials: self.materials.estimate(preset)?,
            seasonal_recommendation: SeasonalAdvisor::recommend(self.current_month),
        }))
    }
}
