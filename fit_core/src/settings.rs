//! # Engine Settings
//!
//! Every tunable number the engine uses, in one serde-friendly struct.
//! All fields default, so a settings file only needs the values it
//! overrides:
//!
//! ```json
//! {
//!   "cost_rates": { "equipment_base": 420000.0 },
//!   "tile_spec": { "tile_size_m": 0.4, "joint_size_m": 0.003 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::cost::CostRates;
use crate::calculations::materials::MaterialCoefficients;
use crate::calculations::sidewalk::SidewalkSettings;
use crate::calculations::tile_layout::TileSpec;
use crate::catalog::ClearanceDefaults;
use crate::errors::CalcResult;

/// Tunable rates and coefficients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Unit rates for the cost estimate
    pub cost_rates: CostRates,

    /// Coefficients for the shell material take-off
    pub material_coefficients: MaterialCoefficients,

    /// Coping/deck tile size and joint
    pub tile_spec: TileSpec,

    /// Deck construction consumption rates
    pub sidewalk: SidewalkSettings,

    /// Clearances for terrains given without them, when the catalog
    /// carries no `clearance_defaults` of its own
    pub default_clearances: ClearanceDefaults,
}

impl EngineSettings {
    pub fn validate(&self) -> CalcResult<()> {
        self.cost_rates.validate()?;
        self.material_coefficients.validate()?;
        self.tile_spec.validate()?;
        self.sidewalk.validate()?;
        Ok(())
    }
}
