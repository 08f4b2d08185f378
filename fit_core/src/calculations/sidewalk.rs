//! # Sidewalk (Deck) Materials
//!
//! Area of the tiled deck around the pool and the bulk materials needed to
//! lay it: a concrete base, tile adhesive, grout (white cement + marmolina),
//! wire mesh and a waterproofing membrane.
//!
//! Each side contributes `span × (ring_width + joint)` for its first ring
//! and `span × (tile + joint) × extra_rows` for the rows beyond it. Corner
//! squares are not included in the area.

use serde::{Deserialize, Serialize};

use crate::calculations::perimeter_tiles::{Side, TileLayoutConfig};
use crate::calculations::tile_layout::TileSpec;
use crate::errors::{require_non_negative, require_positive, CalcResult};
use crate::units::Kilograms;

/// Consumption rates for deck construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidewalkSettings {
    /// Joint between deck tiles, measured across rows (m)
    pub joint_width_m: f64,
    /// Tile adhesive per m² of deck
    pub adhesive_kg_per_m2: f64,
    /// Concrete base thickness (cm)
    pub base_thickness_cm: f64,
    /// Cement per m³ of base concrete
    pub cement_kg_per_m3: f64,
    /// Sand per m³ of base concrete
    pub sand_m3_per_m3: f64,
    /// Gravel per m³ of base concrete
    pub gravel_m3_per_m3: f64,
    /// White cement per meter of grouted joint
    pub white_cement_kg_per_linear_m: f64,
    /// Marmolina (marble dust) per meter of grouted joint
    pub marmolina_kg_per_linear_m: f64,
    /// Wire mesh per m² of deck
    pub wire_mesh_m2_per_m2: f64,
    /// Waterproofing per m² per coat
    pub waterproofing_kg_per_m2: f64,
    /// Number of waterproofing coats
    pub waterproofing_coats: u32,
    pub cement_bag_kg: f64,
    pub white_cement_bag_kg: f64,
    pub marmolina_bag_kg: f64,
}

impl Default for SidewalkSettings {
    fn default() -> Self {
        SidewalkSettings {
            joint_width_m: 0.008,
            adhesive_kg_per_m2: 5.0,
            base_thickness_cm: 10.0,
            cement_kg_per_m3: 200.0,
            sand_m3_per_m3: 0.6,
            gravel_m3_per_m3: 0.8,
            white_cement_kg_per_linear_m: 0.15,
            marmolina_kg_per_linear_m: 0.10,
            wire_mesh_m2_per_m2: 1.0,
            waterproofing_kg_per_m2: 1.5,
            waterproofing_coats: 2,
            cement_bag_kg: 25.0,
            white_cement_bag_kg: 25.0,
            marmolina_bag_kg: 30.0,
        }
    }
}

impl SidewalkSettings {
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("joint_width_m", self.joint_width_m)?;
        require_non_negative("adhesive_kg_per_m2", self.adhesive_kg_per_m2)?;
        require_non_negative("base_thickness_cm", self.base_thickness_cm)?;
        require_non_negative("cement_kg_per_m3", self.cement_kg_per_m3)?;
        require_non_negative("sand_m3_per_m3", self.sand_m3_per_m3)?;
        require_non_negative("gravel_m3_per_m3", self.gravel_m3_per_m3)?;
        require_non_negative("white_cement_kg_per_linear_m", self.white_cement_kg_per_linear_m)?;
        require_non_negative("marmolina_kg_per_linear_m", self.marmolina_kg_per_linear_m)?;
        require_non_negative("wire_mesh_m2_per_m2", self.wire_mesh_m2_per_m2)?;
        require_non_negative("waterproofing_kg_per_m2", self.waterproofing_kg_per_m2)?;
        require_positive("cement_bag_kg", self.cement_bag_kg)?;
        require_positive("white_cement_bag_kg", self.white_cement_bag_kg)?;
        require_positive("marmolina_bag_kg", self.marmolina_bag_kg)?;
        Ok(())
    }
}

/// Deck area per side (m²)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SideAreas {
    pub north_m2: f64,
    pub south_m2: f64,
    pub east_m2: f64,
    pub west_m2: f64,
}

impl SideAreas {
    pub fn total_m2(&self) -> f64 {
        self.north_m2 + self.south_m2 + self.east_m2 + self.west_m2
    }

    fn set(&mut self, side: Side, area_m2: f64) {
        match side {
            Side::North => self.north_m2 = area_m2,
            Side::South => self.south_m2 = area_m2,
            Side::East => self.east_m2 = area_m2,
            Side::West => self.west_m2 = area_m2,
        }
    }
}

/// Exact (unrounded) deck material quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SidewalkEstimate {
    pub side_areas: SideAreas,
    pub total_area_m2: f64,
    pub adhesive_kg: f64,
    pub base_concrete_m3: f64,
    pub cement_kg: f64,
    pub sand_m3: f64,
    pub gravel_m3: f64,
    /// Pool perimeter plus the length of every row, both edges
    pub grouted_length_m: f64,
    pub white_cement_kg: f64,
    pub marmolina_kg: f64,
    pub wire_mesh_m2: f64,
    pub waterproofing_kg: f64,
}

/// Purchasable quantity, rounded up to whole units or bags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub material: String,
    pub quantity: u32,
    pub unit: String,
}

impl OrderLine {
    fn new(material: &str, quantity: u32, unit: impl Into<String>) -> Self {
        OrderLine {
            material: material.to_string(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// Estimate deck materials for a pool of `pool_length_m × pool_width_m`.
///
/// `spec` gives the common tile size; ring widths come from the ring type.
pub fn estimate(
    pool_length_m: f64,
    pool_width_m: f64,
    config: &TileLayoutConfig,
    spec: &TileSpec,
    settings: &SidewalkSettings,
) -> CalcResult<SidewalkEstimate> {
    require_positive("pool_length_m", pool_length_m)?;
    require_positive("pool_width_m", pool_width_m)?;
    spec.validate()?;
    settings.validate()?;

    let joint = settings.joint_width_m;
    let mut side_areas = SideAreas::default();
    let mut row_length_m = 0.0;

    for (side, tiling, span) in config.sides(pool_length_m, pool_width_m) {
        let mut area = 0.0;
        if let Some(ring) = tiling.first_ring {
            area += span * (ring.ring_width_m() + joint);
        }
        // `rows` counts the first ring, so only the rows beyond it add common-tile area
        area += span * (spec.tile_size_m + joint) * f64::from(tiling.extra_rows());
        side_areas.set(side, area);

        // A ring side with `rows = 0` still lays one grouted row
        row_length_m += f64::from(tiling.total_rows()) * span * 2.0;
    }

    let total_area_m2 = side_areas.total_m2();
    let base_concrete_m3 = total_area_m2 * settings.base_thickness_cm / 100.0;
    let grouted_length_m = 2.0 * (pool_length_m + pool_width_m) + row_length_m;

    Ok(SidewalkEstimate {
        side_areas,
        total_area_m2,
        adhesive_kg: total_area_m2 * settings.adhesive_kg_per_m2,
        base_concrete_m3,
        cement_kg: base_concrete_m3 * settings.cement_kg_per_m3,
        sand_m3: base_concrete_m3 * settings.sand_m3_per_m3,
        gravel_m3: base_concrete_m3 * settings.gravel_m3_per_m3,
        grouted_length_m,
        white_cement_kg: grouted_length_m * settings.white_cement_kg_per_linear_m,
        marmolina_kg: grouted_length_m * settings.marmolina_kg_per_linear_m,
        wire_mesh_m2: total_area_m2 * settings.wire_mesh_m2_per_m2,
        waterproofing_kg: total_area_m2
            * settings.waterproofing_kg_per_m2
            * f64::from(settings.waterproofing_coats),
    })
}

impl SidewalkEstimate {
    /// Order list: bagged materials in whole bags, bulk materials rounded up.
    pub fn order_lines(&self, settings: &SidewalkSettings) -> Vec<OrderLine> {
        let bag_unit = |kg: f64| format!("bags of {kg}kg");
        vec![
            OrderLine::new("Tile adhesive", self.adhesive_kg.ceil() as u32, "kg"),
            OrderLine::new(
                "Cement",
                Kilograms(self.cement_kg).bags_of(Kilograms(settings.cement_bag_kg)),
                bag_unit(settings.cement_bag_kg),
            ),
            OrderLine::new("Sand", self.sand_m3.ceil() as u32, "m³"),
            OrderLine::new("Gravel", self.gravel_m3.ceil() as u32, "m³"),
            OrderLine::new(
                "White cement",
                Kilograms(self.white_cement_kg).bags_of(Kilograms(settings.white_cement_bag_kg)),
                bag_unit(settings.white_cement_bag_kg),
            ),
            OrderLine::new(
                "Marmolina",
                Kilograms(self.marmolina_kg).bags_of(Kilograms(settings.marmolina_bag_kg)),
                bag_unit(settings.marmolina_bag_kg),
            ),
            OrderLine::new("Wire mesh", self.wire_mesh_m2.ceil() as u32, "m²"),
            OrderLine::new("Waterproofing", self.waterproofing_kg.ceil() as u32, "kg"),
        ]
    }
}
