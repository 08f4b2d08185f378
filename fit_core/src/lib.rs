//! # fit_core - Pool Layout and Quantity Engine
//!
//! `fit_core` decides which catalog pools fit on a rectangular plot, ranks
//! the feasible placements, and estimates what building the chosen pool
//! takes: cost buckets, shell materials, deck tiles and sidewalk materials.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Deterministic**: Same inputs, same ranking; the current month is a parameter
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Month;
//! use fit_core::catalog::{PoolPreset, PresetCatalog};
//! use fit_core::fit::{TerrainFitEvaluator, TerrainFitSearch};
//! use fit_core::settings::EngineSettings;
//! use fit_core::terrain::Terrain;
//!
//! let catalog = PresetCatalog::new(vec![
//!     PoolPreset::new("compact", "Compact 4 x 3", 4.0, 3.0, 1.5).with_cushion(0.5),
//!     PoolPreset::new("family", "Family 7 x 3.5", 7.0, 3.5, 1.4).with_cushion(0.3),
//! ]);
//! let settings = EngineSettings::default();
//! let terrain = Terrain::new(10.0, 8.0, catalog.clearances_or(settings.default_clearances));
//!
//! let search = TerrainFitSearch::new(TerrainFitEvaluator::new(&settings, Month::October));
//! let ranked = search.search_catalog(&terrain, &catalog).unwrap();
//!
//! let best = &ranked[0];
//! println!("{} at {} scores {:.1}", best.preset.name, best.position.rotation, best.fit_score);
//! ```
//!
//! ## Modules
//!
//! - [`fit`] - Placement, scoring and ranking of presets on a terrain
//! - [`calculations`] - Cost, materials, seasonal advice, tiles and sidewalk
//! - [`catalog`] - Pool presets and the catalog provider seam
//! - [`terrain`] - Plot dimensions and clearances
//! - [`project`] - Project draft built from a chosen layout
//! - [`settings`] - Tunable rates and coefficients
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON loading with validation and atomic saves

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod file_io;
pub mod fit;
pub mod project;
pub mod settings;
pub mod terrain;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use catalog::{CatalogProvider, PoolPreset, PresetCatalog};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_catalog, load_settings, load_terrain, save_json_atomic};
pub use fit::{FitResult, Rotation, TerrainFitEvaluator, TerrainFitSearch};
pub use project::{ClientInfo, ProjectDraft};
pub use settings::EngineSettings;
pub use terrain::Terrain;
