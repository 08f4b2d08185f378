//! # Cost Estimation
//!
//! Rough construction budget for a pool shell, split into four buckets.
//!
//! ## Formulas
//!
//! With `volume = l·w·d` and `surface = l·w + 2·l·d + 2·w·d`:
//!
//! - excavation = volume × `excavation_per_m3`
//! - structure  = volume × `structure_per_m3`
//! - finishing  = surface × `finishing_per_m2`
//! - equipment  = `equipment_base` (flat, independent of size)
//! - total      = sum of the four
//!
//! Rates are plain numbers in a single currency unit; no conversion happens.
//!
//! ## Example
//!
//! ```rust
//! use fit_core::calculations::cost::{CostEstimator, CostRates};
//! use fit_core::catalog::PoolPreset;
//!
//! let preset = PoolPreset::new("p-1", "Compact", 4.0, 3.0, 1.5);
//! let cost = CostEstimator::new(CostRates::default()).estimate(&preset).unwrap();
//! assert_eq!(cost.total, 1_826_000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::PoolPreset;
use crate::errors::{require_non_negative, CalcResult};

/// Unit rates used by [`CostEstimator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRates {
    /// Cost per m³ of shell volume for digging and hauling
    pub excavation_per_m3: f64,
    /// Cost per m³ of shell volume for the structural shell
    pub structure_per_m3: f64,
    /// Cost per m² of wall and floor surface for finishing
    pub finishing_per_m2: f64,
    /// Flat equipment allowance (pump, filter, fittings)
    pub equipment_base: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        CostRates {
            excavation_per_m3: 15_000.0,
            structure_per_m3: 45_000.0,
            finishing_per_m2: 12_000.0,
            equipment_base: 350_000.0,
        }
    }
}

impl CostRates {
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("excavation_per_m3", self.excavation_per_m3)?;
        require_non_negative("structure_per_m3", self.structure_per_m3)?;
        require_non_negative("finishing_per_m2", self.finishing_per_m2)?;
        require_non_negative("equipment_base", self.equipment_base)?;
        Ok(())
    }
}

/// Cost buckets for one preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub excavation: f64,
    pub structure: f64,
    pub finishing: f64,
    pub equipment: f64,
    pub total: f64,
}

/// Derives [`CostEstimate`]s from preset dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostEstimator {
    rates: CostRates,
}

impl CostEstimator {
    pub fn new(rates: CostRates) -> Self {
        CostEstimator { rates }
    }

    pub fn rates(&self) -> &CostRates {
        &self.rates
    }

    /// Estimate costs from the unrotated preset dimensions.
    pub fn estimate(&self, preset: &PoolPreset) -> CalcResult<CostEstimate> {
        preset.validate()?;
        self.rates.validate()?;

        let geo = preset.shell_geometry();
        let excavation = geo.volume_m3 * self.rates.excavation_per_m3;
        let structure = geo.volume_m3 * self.rates.structure_per_m3;
        let finishing = geo.total_surface_area_m2 * self.rates.finishing_per_m2;
        let equipment = self.rates.equipment_base;

        Ok(CostEstimate {
            excavation,
            structure,
            finishing,
            equipment,
            total: excavation + structure + finishing + equipment,
        })
    }
}
