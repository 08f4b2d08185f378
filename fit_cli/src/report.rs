//! Text rendering for terminal output.
//!
//! Every report also has a JSON form; these functions only produce the
//! human-readable variant.

use std::fmt::Write;

use chrono::Month;
use serde::Serialize;

use fit_core::calculations::perimeter_tiles::PerimeterTileBill;
use fit_core::calculations::sidewalk::{OrderLine, SidewalkEstimate};
use fit_core::calculations::tile_layout::SpanLayout;
use fit_core::calculations::{CostEstimate, MaterialQuantities, SeasonalRecommendation};
use fit_core::catalog::{PoolPreset, ShellGeometry};
use fit_core::fit::{ExcavationFootprint, FitResult};
use fit_core::terrain::Terrain;

const RULE: &str = "═══════════════════════════════════════════════════════";

#[derive(Debug, Serialize)]
pub struct FitReport {
    pub terrain: Terrain,
    pub month: Month,
    /// Layouts evaluated before `--top` was applied
    pub feasible: usize,
    pub results: Vec<FitResult>,
}

#[derive(Debug, Serialize)]
pub struct TilesReport {
    pub length_edge: SpanLayout,
    pub width_edge: SpanLayout,
    pub bill: PerimeterTileBill,
    pub sidewalk: SidewalkEstimate,
    pub order: Vec<OrderLine>,
}

#[derive(Debug, Serialize)]
pub struct EstimateReport {
    pub preset: PoolPreset,
    pub shell: ShellGeometry,
    pub excavation: ExcavationFootprint,
    pub cost: CostEstimate,
    pub materials: MaterialQuantities,
    pub seasonal: SeasonalRecommendation,
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  {title}");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
}

/// Thousands-separated amount, no decimals.
pub fn money(amount: f64) -> String {
    let whole = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0.0 && grouped.chars().any(|c| c != '0') {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn render_fit(report: &FitReport) -> String {
    let mut out = String::new();
    header(&mut out, "POOL LAYOUT RANKING");

    let t = &report.terrain;
    let _ = writeln!(out, "Terrain:");
    let _ = writeln!(out, "  Size:        {:.2} m x {:.2} m ({:.1} m²)", t.length_m, t.width_m, t.area_m2());
    let _ = writeln!(
        out,
        "  Clearances:  lateral {:.2} m, front {:.2} m, back {:.2} m",
        t.min_lateral_space_m, t.min_frontal_space_m, t.min_back_space_m
    );
    let _ = writeln!(out, "  Start month: {}", report.month.name());
    let _ = writeln!(out);

    if report.feasible == 0 {
        let _ = writeln!(out, "No preset fits this terrain with the required clearances.");
        return out;
    }

    for (rank, fit) in report.results.iter().enumerate() {
        let b = &fit.score_breakdown;
        let r = &fit.remaining_space;
        let _ = writeln!(
            out,
            "#{:<2} {} [{}] at {}  score {:.1}",
            rank + 1,
            fit.preset.name,
            fit.preset.id,
            fit.position.rotation,
            fit.fit_score
        );
        let _ = writeln!(
            out,
            "    Excavation:  {:.2} x {:.2} x {:.2} m ({:.2} m³)",
            fit.excavation.length_m, fit.excavation.width_m, fit.excavation.depth_m, fit.excavation.volume_m3
        );
        let _ = writeln!(out, "    Position:    x={:.2} m, y={:.2} m", fit.position.x, fit.position.y);
        let _ = writeln!(
            out,
            "    Remaining:   left {:.2}, right {:.2}, front {:.2}, back {:.2} m",
            r.left, r.right, r.front, r.back
        );
        let _ = writeln!(
            out,
            "    Score:       utilization {:.1}, balance {:.1}, clearance {:.1}",
            b.space_utilization, b.lateral_balance, b.min_space_compliance
        );
        let _ = writeln!(out, "    Cost:        {}", money(fit.estimated_cost.total));
        let _ = writeln!(out);
    }

    let shown = report.results.len();
    if shown < report.feasible {
        let _ = writeln!(out, "Showing {shown} of {} feasible layouts.", report.feasible);
        let _ = writeln!(out);
    }

    let Some(first) = report.results.first() else {
        return out;
    };
    let seasonal = &first.seasonal_recommendation;
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "  {}: about {} weeks of work",
        seasonal.season, seasonal.duration_weeks
    );
    let _ = writeln!(out, "{RULE}");
    out
}

pub fn render_tiles(report: &TilesReport) -> String {
    let mut out = String::new();
    header(&mut out, "DECK TILES AND SIDEWALK");

    let _ = writeln!(out, "Edges:");
    for (label, edge) in [("Length", &report.length_edge), ("Width", &report.width_edge)] {
        let _ = writeln!(
            out,
            "  {label:<7} {:.3} m -> {} tiles ({} full, remainder {:.3} m, {:?})",
            edge.span_m, edge.tile_count, edge.full_tiles, edge.remainder_m, edge.rule
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Tile bill:");
    for line in &report.bill.lines {
        let _ = writeln!(out, "  {:<34} {:>5}", line.label, line.quantity);
    }
    let _ = writeln!(out, "  {:<34} {:>5}", "Total units", report.bill.total_units());
    let _ = writeln!(out);

    let s = &report.sidewalk;
    let _ = writeln!(out, "Sidewalk:");
    let _ = writeln!(out, "  Area:            {:.2} m²", s.total_area_m2);
    let _ = writeln!(out, "  Base concrete:   {:.3} m³", s.base_concrete_m3);
    let _ = writeln!(out, "  Grouted joints:  {:.2} m", s.grouted_length_m);
    let _ = writeln!(out);

    let _ = writeln!(out, "Order:");
    for line in &report.order {
        let _ = writeln!(out, "  {:<16} {:>5} {}", line.material, line.quantity, line.unit);
    }
    out
}

pub fn render_estimate(report: &EstimateReport) -> String {
    let mut out = String::new();
    header(&mut out, "POOL ESTIMATE");

    let p = &report.preset;
    let _ = writeln!(out, "Pool:");
    let _ = writeln!(out, "  Shell:       {:.2} x {:.2} x {:.2} m", p.length_m, p.width_m, p.depth_m);
    let _ = writeln!(out, "  Volume:      {:.2} m³", report.shell.volume_m3);
    let _ = writeln!(out, "  Surface:     {:.2} m²", report.shell.total_surface_area_m2);
    let _ = writeln!(
        out,
        "  Excavation:  {:.2} x {:.2} x {:.2} m",
        report.excavation.length_m, report.excavation.width_m, report.excavation.depth_m
    );
    let _ = writeln!(out);

    let m = &report.materials;
    let _ = writeln!(out, "Materials:");
    let _ = writeln!(out, "  Concrete:       {:.2} m³", m.concrete_m3);
    let _ = writeln!(out, "  Reinforcement:  {:.1} kg", m.reinforcement_kg);
    let _ = writeln!(out, "  Tiles:          {:.2} m²", m.tiles_m2);
    let _ = writeln!(out, "  Waterproofing:  {:.2} m²", m.waterproofing_m2);
    let _ = writeln!(out);

    let c = &report.cost;
    let _ = writeln!(out, "Cost:");
    let _ = writeln!(out, "  Excavation:  {:>12}", money(c.excavation));
    let _ = writeln!(out, "  Structure:   {:>12}", money(c.structure));
    let _ = writeln!(out, "  Finishing:   {:>12}", money(c.finishing));
    let _ = writeln!(out, "  Equipment:   {:>12}", money(c.equipment));
    let _ = writeln!(out);

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  TOTAL: {}", money(c.total));
    let _ = writeln!(
        out,
        "  {}: about {} weeks",
        report.seasonal.season, report.seasonal.duration_weeks
    );
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", report.seasonal.weather_considerations);
    out
}
