//! # Terrain Fit Search
//!
//! Evaluates every preset of a catalog at both rotations and ranks the
//! feasible placements by descending fit score.
//!
//! Ranking uses a stable sort, so equal scores keep catalog order, and
//! within one preset the 0° placement precedes the 90° one. The parallel
//! variant collects per-preset results in catalog order before sorting and
//! therefore returns exactly what the sequential search returns.

use rayon::prelude::*;
use tracing::info;

use crate::catalog::{CatalogProvider, PoolPreset};
use crate::errors::CalcResult;
use crate::fit::{FitResult, Rotation, TerrainFitEvaluator};
use crate::terrain::Terrain;

/// Ranks presets against a terrain.
///
/// # Example
///
/// ```rust
/// use chrono::Month;
/// use fit_core::catalog::{ClearanceDefaults, PoolPreset};
/// use fit_core::fit::{TerrainFitEvaluator, TerrainFitSearch};
/// use fit_core::settings::EngineSettings;
/// use fit_core::terrain::Terrain;
///
/// let search = TerrainFitSearch::new(TerrainFitEvaluator::new(&EngineSettings::default(), Month::March));
/// let terrain = Terrain::new(10.0, 8.0, ClearanceDefaults::default());
/// let presets = vec![
///     PoolPreset::new("small", "Small", 4.0, 2.0, 1.2),
///     PoolPreset::new("large", "Large", 7.0, 3.5, 1.5),
/// ];
///
/// let ranked = search.search(&terrain, &presets).unwrap();
/// assert_eq!(ranked.len(), 4);
/// assert_eq!(ranked[0].preset.id, "large");
/// ```
#[derive(Debug, Clone)]
pub struct TerrainFitSearch {
    evaluator: TerrainFitEvaluator,
}

impl TerrainFitSearch {
    pub fn new(evaluator: TerrainFitEvaluator) -> Self {
        TerrainFitSearch { evaluator }
    }

    pub fn evaluator(&self) -> &TerrainFitEvaluator {
        &self.evaluator
    }

    /// Rank all feasible (preset, rotation) placements.
    ///
    /// An empty result means nothing fits; it is not an error.
    pub fn search(&self, terrain: &Terrain, presets: &[PoolPreset]) -> CalcResult<Vec<FitResult>> {
        terrain.validate()?;

        let mut results = Vec::with_capacity(presets.len() * 2);
        for preset in presets {
            results.extend(self.evaluate_both(terrain, preset)?);
        }

        rank(&mut results);
        log_summary(terrain, presets.len(), &results);
        Ok(results)
    }

    /// Same as [`search`](Self::search), evaluating presets on the rayon pool.
    pub fn search_parallel(&self, terrain: &Terrain, presets: &[PoolPreset]) -> CalcResult<Vec<FitResult>> {
        terrain.validate()?;

        let per_preset: Vec<Vec<FitResult>> = presets
            .par_iter()
            .map(|preset| self.evaluate_both(terrain, preset))
            .collect::<CalcResult<_>>()?;

        let mut results: Vec<FitResult> = per_preset.into_iter().flatten().collect();
        rank(&mut results);
        log_summary(terrain, presets.len(), &results);
        Ok(results)
    }

    /// Search every preset a catalog provides.
    pub fn search_catalog<P: CatalogProvider + ?Sized>(&self, terrain: &Terrain, provider: &P) -> CalcResult<Vec<FitResult>> {
        let presets = provider.presets()?;
        self.search(terrain, &presets)
    }

    fn evaluate_both(&self, terrain: &Terrain, preset: &PoolPreset) -> CalcResult<Vec<FitResult>> {
        let mut fits = Vec::with_capacity(2);
        for rotation in Rotation::ALL {
            if let Some(fit) = self.evaluator.evaluate(terrain, preset, rotation)? {
                fits.push(fit);
            }
        }
        Ok(fits)
    }
}

/// Stable sort by descending fit score.
fn rank(results: &mut [FitResult]) {
    results.sort_by(|a, b| b.fit_score.total_cmp(&a.fit_score));
}

fn log_summary(terrain: &Terrain, preset_count: usize, results: &[FitResult]) {
    match results.first() {
        Some(best) => info!(
            terrain_length_m = terrain.length_m,
            terrain_width_m = terrain.width_m,
            presets = preset_count,
            feasible = results.len(),
            best_preset = %best.preset.id,
            best_score = best.fit_score,
            "fit search complete"
        ),
        None => info!(
            terrain_length_m = terrain.length_m,
            terrain_width_m = terrain.width_m,
            presets = preset_count,
            "fit search found no feasible layout"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ClearanceDefaults, PresetCatalog};
    use crate::settings::EngineSettings;
    use chrono::Month;

    fn search() -> TerrainFitSearch {
        TerrainFitSearch::new(TerrainFitEvaluator::new(&EngineSettings::default(), Month::June))
    }

    fn plot() -> Terrain {
        Terrain::new(10.0, 8.0, ClearanceDefaults::default())
    }

    #[test]
    fn test_results_sorted_descending() {
        let presets = vec![
            PoolPreset::new("a", "A", 4.0, 2.0, 1.2),
            PoolPreset::new("b", "B", 7.0, 3.5, 1.5),
            PoolPreset::new("c", "C", 6.0, 3.0, 1.4).with_cushion(0.3),
        ];
        let results = search().search(&plot(), &presets).unwrap();
        assert_eq!(results.len(), 6);
        for pair in results.windows(2) {
            assert!(pair[0].fit_score >= pair[1].fit_score);
        }
    }

    #[test]
    fn test_preset_contributes_zero_one_or_two() {
        let presets = vec![
            // fits only at 0°: 7.5 + 2 <= 10, 5.5 + 1 <= 8; at 90°: 5.5 + 2 <= 10 but 7.5 + 1 > 8
            PoolPreset::new("one", "One", 7.5, 5.5, 1.4),
            PoolPreset::new("none", "None", 12.0, 9.0, 1.4),
            PoolPreset::new("two", "Two", 4.0, 3.0, 1.4),
        ];
        let results = search().search(&plot(), &presets).unwrap();
        let count = |id: &str| results.iter().filter(|r| r.preset.id == id).count();
        assert_eq!(count("one"), 1);
        assert_eq!(count("none"), 0);
        assert_eq!(count("two"), 2);
    }

    #[test]
    fn test_nothing_fits_is_empty() {
        let presets = vec![PoolPreset::new("huge", "Huge", 20.0, 10.0, 2.0)];
        let results = search().search(&plot(), &presets).unwrap();
        assert!(results.is_empty());

        let results = search().search(&plot(), &[]).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        // Identical dimensions -> identical scores
        let presets = vec![
            PoolPreset::new("first", "First", 5.0, 3.0, 1.4),
            PoolPreset::new("second", "Second", 5.0, 3.0, 1.4),
        ];
        let results = search().search(&plot(), &presets).unwrap();
        let deg0: Vec<_> = results
            .iter()
            .filter(|r| r.position.rotation == Rotation::Deg0)
            .map(|r| r.preset.id.as_str())
            .collect();
        assert_eq!(deg0, vec!["first", "second"]);
    }

    #[test]
    fn test_square_pool_keeps_rotation_order() {
        let presets = vec![PoolPreset::new("sq", "Square", 4.0, 4.0, 1.4)];
        let results = search().search(&plot(), &presets).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].fit_score, results[1].fit_score);
        assert_eq!(results[0].position.rotation, Rotation::Deg0);
        assert_eq!(results[1].position.rotation, Rotation::Deg90);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let presets: Vec<PoolPreset> = (0..24)
            .map(|i| {
                let length = 3.0 + (i % 6) as f64;
                let width = 2.0 + (i % 4) as f64 * 0.5;
                PoolPreset::new(format!("p{i}"), format!("P{i}"), length, width, 1.4).with_cushion(0.2)
            })
            .collect();
        let s = search();
        let sequential = s.search(&plot(), &presets).unwrap();
        let parallel = s.search_parallel(&plot(), &presets).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_invalid_preset_aborts_search() {
        let presets = vec![
            PoolPreset::new("ok", "Ok", 4.0, 3.0, 1.4),
            PoolPreset::new("bad", "Bad", 4.0, -3.0, 1.4),
        ];
        assert!(search().search(&plot(), &presets).is_err());
        assert!(search().search_parallel(&plot(), &presets).is_err());
    }

    #[test]
    fn test_search_catalog() {
        let catalog = PresetCatalog::new(vec![PoolPreset::new("a", "A", 4.0, 3.0, 1.4)]);
        let results = search().search_catalog(&plot(), &catalog).unwrap();
        assert_eq!(results.len(), 2);
    }
}
