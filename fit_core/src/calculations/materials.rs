//! # Shell Material Quantities
//!
//! Raw material take-off for the pool shell:
//!
//! - concrete (m³) = volume × `concrete_ratio`
//! - reinforcement (kg) = surface × `reinforcement_kg_per_m2`
//! - tiles (m²) = surface × `tile_waste_factor`
//! - waterproofing (m²) = surface × `waterproofing_waste_factor`
//!
//! where `surface` is walls plus floor. The defaults carry a 10% waste
//! allowance on tiles and 5% on waterproofing.

use serde::{Deserialize, Serialize};

use crate::catalog::PoolPreset;
use crate::errors::{require_non_negative, CalcResult};

/// Coefficients used by [`MaterialQuantityEstimator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialCoefficients {
    /// m³ of concrete per m³ of shell volume
    pub concrete_ratio: f64,
    /// kg of rebar per m² of surface
    pub reinforcement_kg_per_m2: f64,
    /// Tile area multiplier (1.10 = 10% waste)
    pub tile_waste_factor: f64,
    /// Waterproofing area multiplier (1.05 = 5% waste)
    pub waterproofing_waste_factor: f64,
}

impl Default for MaterialCoefficients {
    fn default() -> Self {
        MaterialCoefficients {
            concrete_ratio: 0.40,
            reinforcement_kg_per_m2: 8.0,
            tile_waste_factor: 1.10,
            waterproofing_waste_factor: 1.05,
        }
    }
}

impl MaterialCoefficients {
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("concrete_ratio", self.concrete_ratio)?;
        require_non_negative("reinforcement_kg_per_m2", self.reinforcement_kg_per_m2)?;
        require_non_negative("tile_waste_factor", self.tile_waste_factor)?;
        require_non_negative("waterproofing_waste_factor", self.waterproofing_waste_factor)?;
        Ok(())
    }
}

/// Shell material quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialQuantities {
    /// Concrete volume (m³)
    pub concrete_m3: f64,
    /// Reinforcement mass (kg)
    pub reinforcement_kg: f64,
    /// Tile area including waste (m²)
    pub tiles_m2: f64,
    /// Waterproofing area including waste (m²)
    pub waterproofing_m2: f64,
}

/// Derives [`MaterialQuantities`] from preset dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaterialQuantityEstimator {
    coefficients: MaterialCoefficients,
}

impl MaterialQuantityEstimator {
    pub fn new(coefficients: MaterialCoefficients) -> Self {
        MaterialQuantityEstimator { coefficients }
    }

    /// Estimate quantities from the unrotated preset dimensions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fit_core::calculations::materials::MaterialQuantityEstimator;
    /// use fit_core::catalog::PoolPreset;
    ///
    /// let preset = PoolPreset::new("p-1", "Compact", 4.0, 3.0, 1.5);
    /// let q = MaterialQuantityEstimator::default().estimate(&preset).unwrap();
    /// assert!((q.reinforcement_kg - 264.0).abs() < 1e-9);
    /// ```
    pub fn estimate(&self, preset: &PoolPreset) -> CalcResult<MaterialQuantities> {
        preset.validate()?;
        self.coefficients.validate()?;

        let geo = preset.shell_geometry();
        let c = &self.coefficients;
        Ok(MaterialQuantities {
            concrete_m3: geo.volume_m3 * c.concrete_ratio,
            reinforcement_kg: geo.total_surface_area_m2 * c.reinforcement_kg_per_m2,
            tiles_m2: geo.total_surface_area_m2 * c.tile_waste_factor,
            waterproofing_m2: geo.total_surface_area_m2 * c.waterproofing_waste_factor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_compact_pool_quantities() {
        let preset = PoolPreset::new("p-1", "Compact", 4.0, 3.0, 1.5);
        let q = MaterialQuantityEstimator::default().estimate(&preset).unwrap();

        assert!(approx_eq!(f64, q.concrete_m3, 7.2, epsilon = 1e-9));
        assert!(approx_eq!(f64, q.reinforcement_kg, 264.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, q.tiles_m2, 36.3, epsilon = 1e-9));
        assert!(approx_eq!(f64, q.waterproofing_m2, 34.65, epsilon = 1e-9));
    }

    #[test]
    fn test_custom_coefficients() {
        let preset = PoolPreset::new("p-1", "Compact", 4.0, 3.0, 1.5);
        let estimator = MaterialQuantityEstimator::new(MaterialCoefficients {
            concrete_ratio: 1.0,
            reinforcement_kg_per_m2: 1.0,
            tile_waste_factor: 1.0,
            waterproofing_waste_factor: 2.0,
        });
        let q = estimator.estimate(&preset).unwrap();
        assert!(approx_eq!(f64, q.concrete_m3, 18.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, q.tiles_m2, 33.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, q.waterproofing_m2, 66.0, epsilon = 1e-12));
    }

    #[test]
    fn test_independent_of_orientation_fields() {
        // Swapping length and width must not change anything.
        let a = PoolPreset::new("a", "A", 8.0, 4.0, 1.4);
        let b = PoolPreset::new("b", "B", 4.0, 8.0, 1.4);
        let estimator = MaterialQuantityEstimator::default();
        assert_eq!(estimator.estimate(&a).unwrap(), estimator.estimate(&b).unwrap());
    }

    #[test]
    fn test_invalid_preset() {
        let preset = PoolPreset::new("p", "P", 4.0, 3.0, -1.0);
        assert!(MaterialQuantityEstimator::default().estimate(&preset).is_err());
    }
}
