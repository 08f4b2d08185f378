//! # Terrafit CLI
//!
//! Command-line front end for `fit_core`: rank catalog pools on a plot,
//! price a single pool, or compute the deck tile bill. Reports go to stdout
//! (text or `--json`); logs go to stderr.

mod cli;
mod report;

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, Month};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use fit_core::calculations::perimeter_tiles::{FirstRingType, PerimeterTileBill, SideTiling, TileLayoutConfig};
use fit_core::calculations::{sidewalk, CostEstimator, MaterialQuantityEstimator, SeasonalAdvisor};
use fit_core::catalog::{PoolPreset, PresetCatalog};
use fit_core::file_io::{load_catalog, load_settings, load_terrain, load_tile_layout, save_draft, save_json_atomic};
use fit_core::fit::{ExcavationFootprint, FitResult, Rotation, TerrainFitEvaluator, TerrainFitSearch};
use fit_core::project::{ClientInfo, ProjectDraft};
use fit_core::settings::EngineSettings;
use fit_core::terrain::Terrain;

use cli::{Cli, Command, EstimateArgs, FitArgs, TilesArgs};
use report::{EstimateReport, FitReport, TilesReport};

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let settings = match &args.settings {
        Some(path) => load_settings(path).with_context(|| format!("loading settings from {}", path.display()))?,
        None => {
            debug!("no settings file given, using defaults");
            EngineSettings::default()
        }
    };

    match &args.command {
        Command::Fit(fit) => run_fit(&args, fit, &settings),
        Command::Tiles(tiles) => run_tiles(&args, tiles, &settings),
        Command::Estimate(estimate) => run_estimate(&args, estimate, &settings),
    }
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn resolve_month(month: Option<u8>) -> Result<Month> {
    let number = match month {
        Some(m) => m,
        None => u8::try_from(chrono::Local::now().month()).context("current month out of range")?,
    };
    Month::try_from(number).map_err(|_| anyhow!("invalid month {number}"))
}

/// Print the report and, with `--output`, save its JSON form.
fn emit<T: Serialize>(args: &Cli, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }

    if let Some(path) = &args.output {
        save_json_atomic(value, path).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "report saved");
    }
    Ok(())
}

/// Presets to search: the whole catalog, or the one named by `--preset`.
fn select_presets(catalog: &PresetCatalog, preset_id: Option<&str>) -> Result<Vec<PoolPreset>> {
    match preset_id {
        Some(id) => Ok(vec![catalog.find(id)?.clone()]),
        None => Ok(catalog.presets.clone()),
    }
}

/// Save a draft for the best layout. Returns `false` when nothing fits.
fn save_best_draft(path: &Path, results: &[FitResult], client: Option<&str>) -> Result<bool> {
    let Some(best) = results.first() else {
        warn!(path = %path.display(), "no layout fits, project draft not saved");
        return Ok(false);
    };
    let draft = ProjectDraft::from_fit(best, ClientInfo::new(client.unwrap_or("Unnamed client")));
    save_draft(&draft, path).with_context(|| format!("writing draft to {}", path.display()))?;
    info!(path = %path.display(), preset = %draft.preset_id, "project draft saved");
    Ok(true)
}

fn run_fit(args: &Cli, fit: &FitArgs, settings: &EngineSettings) -> Result<()> {
    let catalog = load_catalog(&fit.catalog)
        .with_context(|| format!("loading catalog from {}", fit.catalog.display()))?;

    let defaults = catalog.clearances_or(settings.default_clearances);
    let terrain = match (&fit.terrain, fit.length, fit.width) {
        (Some(path), _, _) => load_terrain(path, defaults)
            .with_context(|| format!("loading terrain from {}", path.display()))?,
        (None, Some(length), Some(width)) => Terrain::new(length, width, defaults),
        _ => bail!("give either --terrain <FILE> or both --length and --width"),
    };
    terrain.validate().context("invalid terrain")?;

    let presets = select_presets(&catalog, fit.preset.as_deref())?;
    let month = resolve_month(fit.month)?;
    let search = TerrainFitSearch::new(TerrainFitEvaluator::new(settings, month));
    let mut results = if fit.parallel {
        search.search_parallel(&terrain, &presets)?
    } else {
        search.search(&terrain, &presets)?
    };

    if let Some(path) = &fit.draft {
        save_best_draft(path, &results, fit.client.as_deref())?;
    }

    let feasible = results.len();
    if let Some(top) = fit.top {
        results.truncate(top);
    }

    let report = FitReport {
        terrain,
        month,
        feasible,
        results,
    };
    emit(args, &report, || report::render_fit(&report))
}

fn run_tiles(args: &Cli, tiles: &TilesArgs, settings: &EngineSettings) -> Result<()> {
    let layout = match &tiles.layout {
        Some(path) => load_tile_layout(path).with_context(|| format!("loading layout from {}", path.display()))?,
        None => TileLayoutConfig::uniform(SideTiling::ring(FirstRingType::WhaleBack, 1)),
    };

    let spec = &settings.tile_spec;
    let deck = sidewalk::estimate(tiles.length, tiles.width, &layout, spec, &settings.sidewalk)?;
    let report = TilesReport {
        length_edge: spec.layout(tiles.length)?,
        width_edge: spec.layout(tiles.width)?,
        bill: PerimeterTileBill::calculate(tiles.length, tiles.width, &layout, spec)?,
        order: deck.order_lines(&settings.sidewalk),
        sidewalk: deck,
    };
    emit(args, &report, || report::render_tiles(&report))
}

fn run_estimate(args: &Cli, estimate: &EstimateArgs, settings: &EngineSettings) -> Result<()> {
    let mut preset = PoolPreset::new("custom", "Custom pool", estimate.length, estimate.width, estimate.depth)
        .with_cushion(estimate.cushion);
    if let Some(depth_end) = estimate.depth_end {
        preset = preset.with_depth_end(depth_end);
    }
    preset.validate().context("invalid pool dimensions")?;

    let month = resolve_month(estimate.month)?;
    let report = EstimateReport {
        shell: preset.shell_geometry(),
        excavation: ExcavationFootprint::of(&preset, Rotation::Deg0),
        cost: CostEstimator::new(settings.cost_rates).estimate(&preset)?,
        materials: MaterialQuantityEstimator::new(settings.material_coefficients).estimate(&preset)?,
        seasonal: SeasonalAdvisor::recommend(month),
        preset,
    };
    emit(args, &report, || report::render_estimate(&report))
}
