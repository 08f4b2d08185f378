//! # Terrain
//!
//! A rectangular buildable plot plus the minimum clearance required between
//! the excavation and each boundary. The length axis runs front to back;
//! the width axis runs left to right.

use serde::{Deserialize, Serialize};

use crate::catalog::ClearanceDefaults;
use crate::errors::{require_non_negative, require_positive, CalcResult};

/// Rectangular terrain with clearance requirements.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length_m": 10.0,
///   "width_m": 8.0,
///   "min_lateral_space_m": 0.5,
///   "min_frontal_space_m": 1.0,
///   "min_back_space_m": 1.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    /// Plot length in meters (front to back)
    pub length_m: f64,

    /// Plot width in meters (left to right)
    pub width_m: f64,

    /// Clearance required on the left and on the right
    pub min_lateral_space_m: f64,

    /// Clearance required at the front
    pub min_frontal_space_m: f64,

    /// Clearance required at the back
    pub min_back_space_m: f64,
}

impl Terrain {
    /// Create a terrain using the given clearance defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fit_core::catalog::ClearanceDefaults;
    /// use fit_core::terrain::Terrain;
    ///
    /// let terrain = Terrain::new(10.0, 8.0, ClearanceDefaults::default());
    /// assert_eq!(terrain.min_frontal_space_m, 1.0);
    /// ```
    pub fn new(length_m: f64, width_m: f64, clearances: ClearanceDefaults) -> Self {
        Terrain {
            length_m,
            width_m,
            min_lateral_space_m: clearances.min_lateral_space_m,
            min_frontal_space_m: clearances.min_frontal_space_m,
            min_back_space_m: clearances.min_back_space_m,
        }
    }

    /// Validate terrain dimensions and clearances.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("length_m", self.length_m)?;
        require_positive("width_m", self.width_m)?;
        require_non_negative("min_lateral_space_m", self.min_lateral_space_m)?;
        require_non_negative("min_frontal_space_m", self.min_frontal_space_m)?;
        require_non_negative("min_back_space_m", self.min_back_space_m)?;
        Ok(())
    }

    /// Plot area (m²)
    pub fn area_m2(&self) -> f64 {
        self.length_m * self.width_m
    }

    /// Longest excavation length that still leaves front and back clearance.
    pub fn usable_length_m(&self) -> f64 {
        self.length_m - self.min_frontal_space_m - self.min_back_space_m
    }

    /// Widest excavation that still leaves lateral clearance on both sides.
    pub fn usable_width_m(&self) -> f64 {
        self.width_m - 2.0 * self.min_lateral_space_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> Terrain {
        Terrain::new(10.0, 8.0, ClearanceDefaults::default())
    }

    #[test]
    fn test_usable_extent() {
        let t = plot();
        assert!((t.usable_length_m() - 8.0).abs() < 1e-12);
        assert!((t.usable_width_m() - 7.0).abs() < 1e-12);
        assert!((t.area_m2() - 80.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(plot().validate().is_ok());

        let mut t = plot();
        t.width_m = 0.0;
        assert!(t.validate().is_err());

        let mut t = plot();
        t.min_back_space_m = -1.0;
        assert!(t.validate().is_err());

        let mut t = plot();
        t.min_lateral_space_m = 0.0;
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let t = plot();
        let json = serde_json::to_string(&t).unwrap();
        let roundtrip: Terrain = serde_json::from_str(&json).unwrap();
        assert_eq!(t, roundtrip);
    }
}
