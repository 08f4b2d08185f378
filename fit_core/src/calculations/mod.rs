//! # Quantity Calculations
//!
//! Pure estimators that turn pool dimensions into costs, material
//! quantities and tile counts. They take inputs by reference, validate
//! them, and return a JSON-serializable result or a [`CalcError`](crate::CalcError).
//!
//! ## Available Calculations
//!
//! - [`cost`] - Excavation, structure, finishing and equipment cost buckets
//! - [`materials`] - Shell concrete, reinforcement, tile and waterproofing take-off
//! - [`seasonal`] - Build duration and weather advice by start month
//! - [`tile_layout`] - Tile count along one edge (three-tier remainder rule)
//! - [`perimeter_tiles`] - Full deck tile bill (first ring, rows, corners)
//! - [`sidewalk`] - Deck area and bulk materials

pub mod cost;
pub mod materials;
pub mod perimeter_tiles;
pub mod seasonal;
pub mod sidewalk;
pub mod tile_layout;

// Re-export commonly used types
pub use cost::{CostEstimate, CostEstimator, CostRates};
pub use materials::{MaterialCoefficients, MaterialQuantities, MaterialQuantityEstimator};
pub use perimeter_tiles::{FirstRingType, PerimeterTileBill, SideTiling, TileLayoutConfig};
pub use seasonal::{Season, SeasonalAdvisor, SeasonalRecommendation};
pub use sidewalk::{SidewalkEstimate, SidewalkSettings};
pub use tile_layout::{tiles_for_span, RemainderRule, SpanLayout, TileSpec};
