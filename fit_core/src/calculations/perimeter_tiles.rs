//! # Perimeter Tile Bill
//!
//! Builds the tile bill of materials for the deck around a rectangular pool.
//!
//! The deck is described per side. North and south run along the pool
//! length, east and west along the pool width. Each side has a number of
//! tile rows; the innermost row may be a special *first ring* coping piece.
//!
//! ```text
//!          north (length)
//!        +----------------+
//!  west  |      pool      |  east
//! (width)|                | (width)
//!        +----------------+
//!          south (length)
//! ```
//!
//! Counting rules:
//!
//! - First ring: `tiles_for_span(side)` units on every side that has one,
//!   grouped by ring type, plus a fixed 4 corner units for the ring.
//! - Extra rows: every row beyond the first ring is a row of common tiles,
//!   `tiles_for_span(side)` each.
//! - Corner blocks: where two tiled sides meet, `rows_a × rows_b` common
//!   tiles fill the square corner. The 4 ring corner units already cover
//!   the innermost corner tiles and are subtracted.

use serde::{Deserialize, Serialize};

use crate::calculations::tile_layout::TileSpec;
use crate::errors::{require_positive, CalcResult};

/// Coping piece used for the first ring around the pool edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FirstRingType {
    /// Rounded "whale back" coping, 50 cm deep
    WhaleBack,
    /// L-shaped finishing piece, 40 cm deep
    LFinish,
    /// Flat perimeter piece, 40 cm deep
    Perimeter,
}

impl FirstRingType {
    pub const ALL: [FirstRingType; 3] = [
        FirstRingType::WhaleBack,
        FirstRingType::LFinish,
        FirstRingType::Perimeter,
    ];

    /// Depth of the piece measured outward from the pool edge (m)
    pub fn ring_width_m(&self) -> f64 {
        match self {
            FirstRingType::WhaleBack => 0.50,
            FirstRingType::LFinish | FirstRingType::Perimeter => 0.40,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FirstRingType::WhaleBack => "Whale-back coping (50x50cm)",
            FirstRingType::LFinish => "L-finish coping (50x50cm)",
            FirstRingType::Perimeter => "Perimeter coping (50x50cm)",
        }
    }
}

impl std::fmt::Display for FirstRingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tiling of one side of the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideTiling {
    /// Coping piece for the innermost row, if any
    #[serde(default)]
    pub first_ring: Option<FirstRingType>,

    /// Total rows on this side, first ring included
    #[serde(default)]
    pub rows: u32,
}

impl SideTiling {
    /// Side with a first ring and `rows` rows in total.
    pub fn ring(first_ring: FirstRingType, rows: u32) -> Self {
        SideTiling {
            first_ring: Some(first_ring),
            rows,
        }
    }

    /// Side with `rows` rows of common tiles and no coping.
    pub fn plain(rows: u32) -> Self {
        SideTiling {
            first_ring: None,
            rows,
        }
    }

    /// Total rows; a side with a first ring always has at least one.
    pub fn total_rows(&self) -> u32 {
        match self.first_ring {
            Some(_) => self.rows.max(1),
            None => self.rows,
        }
    }

    /// Rows of common tiles beyond the first ring.
    pub fn extra_rows(&self) -> u32 {
        match self.first_ring {
            Some(_) => self.total_rows() - 1,
            None => self.rows,
        }
    }
}

/// Deck tiling for all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileLayoutConfig {
    pub north: SideTiling,
    pub south: SideTiling,
    pub east: SideTiling,
    pub west: SideTiling,
}

impl TileLayoutConfig {
    /// Same tiling on all four sides.
    pub fn uniform(side: SideTiling) -> Self {
        TileLayoutConfig {
            north: side,
            south: side,
            east: side,
            west: side,
        }
    }

    /// Sides with the span they run along, in north, south, east, west order.
    pub fn sides(&self, pool_length_m: f64, pool_width_m: f64) -> [(Side, SideTiling, f64); 4] {
        [
            (Side::North, self.north, pool_length_m),
            (Side::South, self.south, pool_length_m),
            (Side::East, self.east, pool_width_m),
            (Side::West, self.west, pool_width_m),
        ]
    }

    pub fn has_first_ring(&self) -> bool {
        [self.north, self.south, self.east, self.west]
            .iter()
            .any(|s| s.first_ring.is_some())
    }
}

/// Deck side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    North,
    South,
    East,
    West,
}

/// Kind of line in the bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ring_type")]
pub enum TileLineKind {
    FirstRing(FirstRingType),
    Corner,
    Common,
}

/// One line of the tile bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLine {
    pub kind: TileLineKind,
    pub label: String,
    /// Units to order
    pub quantity: u32,
}

/// Tile bill of materials for the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerimeterTileBill {
    pub lines: Vec<TileLine>,
    /// First-ring pieces along the edges (corners excluded)
    pub first_ring_units: u32,
    /// Ring corner units (0 or 4)
    pub corner_units: u32,
    /// Common tiles in extra rows and corner blocks
    pub common_tiles: u32,
    /// Corner-block tiles included in `common_tiles`
    pub corner_block_tiles: u32,
}

/// Fixed corner units of a rectangular first ring
pub const RING_CORNER_UNITS: u32 = 4;

impl PerimeterTileBill {
    /// Compute the bill for a pool of `pool_length_m × pool_width_m`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fit_core::calculations::perimeter_tiles::{
    ///     FirstRingType, PerimeterTileBill, SideTiling, TileLayoutConfig,
    /// };
    /// use fit_core::calculations::tile_layout::TileSpec;
    ///
    /// let config = TileLayoutConfig::uniform(SideTiling::ring(FirstRingType::WhaleBack, 1));
    /// let bill = PerimeterTileBill::calculate(5.0, 2.5, &config, &TileSpec::default()).unwrap();
    ///
    /// // 10 + 10 along the length, 5 + 5 along the width, plus 4 corners
    /// assert_eq!(bill.first_ring_units, 30);
    /// assert_eq!(bill.corner_units, 4);
    /// assert_eq!(bill.common_tiles, 0);
    /// ```
    pub fn calculate(
        pool_length_m: f64,
        pool_width_m: f64,
        config: &TileLayoutConfig,
        spec: &TileSpec,
    ) -> CalcResult<Self> {
        require_positive("pool_length_m", pool_length_m)?;
        require_positive("pool_width_m", pool_width_m)?;
        spec.validate()?;

        let length_tiles = spec.layout(pool_length_m)?.tile_count;
        let width_tiles = spec.layout(pool_width_m)?.tile_count;
        let tiles_along = |side: Side| match side {
            Side::North | Side::South => length_tiles,
            Side::East | Side::West => width_tiles,
        };

        let mut lines: Vec<TileLine> = Vec::new();
        let mut first_ring_units = 0;
        let mut extra_row_tiles = 0;

        for (side, tiling, _) in config.sides(pool_length_m, pool_width_m) {
            let per_row = tiles_along(side);

            if let Some(ring) = tiling.first_ring {
                first_ring_units += per_row;
                match lines
                    .iter_mut()
                    .find(|l| l.kind == TileLineKind::FirstRing(ring))
                {
                    Some(line) => line.quantity += per_row,
                    None => lines.push(TileLine {
                        kind: TileLineKind::FirstRing(ring),
                        label: ring.display_name().to_string(),
                        quantity: per_row,
                    }),
                }
            }

            extra_row_tiles += tiling.extra_rows() * per_row;
        }

        let corner_units = if config.has_first_ring() {
            RING_CORNER_UNITS
        } else {
            0
        };
        if corner_units > 0 {
            lines.push(TileLine {
                kind: TileLineKind::Corner,
                label: "Ring corner piece (50x50cm)".to_string(),
                quantity: corner_units,
            });
        }

        let corner_block = |a: SideTiling, b: SideTiling| a.total_rows() * b.total_rows();
        let corner_block_tiles = (corner_block(config.north, config.west)
            + corner_block(config.north, config.east)
            + corner_block(config.south, config.west)
            + corner_block(config.south, config.east))
        .saturating_sub(corner_units);

        let common_tiles = extra_row_tiles + corner_block_tiles;
        if common_tiles > 0 {
            lines.push(TileLine {
                kind: TileLineKind::Common,
                label: format!(
                    "Common tile ({:.0}x{:.0}cm)",
                    spec.tile_size_m * 100.0,
                    spec.tile_size_m * 100.0
                ),
                quantity: common_tiles,
            });
        }

        Ok(PerimeterTileBill {
            lines,
            first_ring_units,
            corner_units,
            common_tiles,
            corner_block_tiles,
        })
    }

    /// All units to order.
    pub fn total_units(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> TileSpec {
        TileSpec::default()
    }

    #[test]
    fn test_first_ring_only() {
        // 5.0 m -> 10 tiles, 2.5 m -> 5 tiles
        let config = TileLayoutConfig::uniform(SideTiling::ring(FirstRingType::WhaleBack, 1));
        let bill = PerimeterTileBill::calculate(5.0, 2.5, &config, &spec()).unwrap();

        assert_eq!(bill.first_ring_units, 30);
        assert_eq!(bill.corner_units, 4);
        assert_eq!(bill.corner_block_tiles, 0);
        assert_eq!(bill.common_tiles, 0);
        assert_eq!(bill.total_units(), 34);
        assert_eq!(bill.lines.len(), 2);
    }

    #[test]
    fn test_extra_rows_and_corner_blocks() {
        let config = TileLayoutConfig {
            north: SideTiling::ring(FirstRingType::WhaleBack, 1),
            south: SideTiling::ring(FirstRingType::WhaleBack, 1),
            east: SideTiling::ring(FirstRingType::WhaleBack, 5),
            west: SideTiling::ring(FirstRingType::WhaleBack, 2),
        };
        let bill = PerimeterTileBill::calculate(5.0, 2.5, &config, &spec()).unwrap();

        // extra rows: east 4 x 5 + west 1 x 5 = 25
        // corner blocks: NW 1x2 + NE 1x5 + SW 1x2 + SE 1x5 = 14, minus 4 = 10
        assert_eq!(bill.corner_block_tiles, 10);
        assert_eq!(bill.common_tiles, 35);
        assert_eq!(bill.first_ring_units, 30);
    }

    #[test]
    fn test_mixed_ring_types_grouped() {
        let config = TileLayoutConfig {
            north: SideTiling::ring(FirstRingType::WhaleBack, 1),
            south: SideTiling::ring(FirstRingType::LFinish, 1),
            east: SideTiling::ring(FirstRingType::WhaleBack, 1),
            west: SideTiling::plain(0),
        };
        let bill = PerimeterTileBill::calculate(5.0, 2.5, &config, &spec()).unwrap();

        let whale = bill
            .lines
            .iter()
            .find(|l| l.kind == TileLineKind::FirstRing(FirstRingType::WhaleBack))
            .unwrap();
        assert_eq!(whale.quantity, 15);
        let l_finish = bill
            .lines
            .iter()
            .find(|l| l.kind == TileLineKind::FirstRing(FirstRingType::LFinish))
            .unwrap();
        assert_eq!(l_finish.quantity, 10);
        // NE 1x1 + SE 1x1 = 2, minus 4 saturates at 0
        assert_eq!(bill.corner_block_tiles, 0);
    }

    #[test]
    fn test_plain_rows_without_ring() {
        let config = TileLayoutConfig::uniform(SideTiling::plain(2));
        let bill = PerimeterTileBill::calculate(5.0, 2.5, &config, &spec()).unwrap();

        assert_eq!(bill.corner_units, 0);
        assert_eq!(bill.first_ring_units, 0);
        // rows: 2x10 + 2x10 + 2x5 + 2x5 = 60, corners 4 x (2x2) = 16
        assert_eq!(bill.common_tiles, 76);
        assert_eq!(bill.lines.len(), 1);
    }

    #[test]
    fn test_ring_with_zero_rows_counts_as_one() {
        let side = SideTiling::ring(FirstRingType::Perimeter, 0);
        assert_eq!(side.total_rows(), 1);
        assert_eq!(side.extra_rows(), 0);
    }

    #[test]
    fn test_no_tiling() {
        let bill =
            PerimeterTileBill::calculate(5.0, 2.5, &TileLayoutConfig::default(), &spec()).unwrap();
        assert!(bill.lines.is_empty());
        assert_eq!(bill.total_units(), 0);
    }

    #[test]
    fn test_invalid_pool() {
        let config = TileLayoutConfig::default();
        assert!(PerimeterTileBill::calculate(0.0, 2.5, &config, &spec()).is_err());
    }

    #[test]
    fn test_config_json() {
        let json = r#"{
            "north": { "first_ring": "WhaleBack", "rows": 2 },
            "south": { "rows": 1 },
            "east": {},
            "west": { "first_ring": "LFinish" }
        }"#;
        let config: TileLayoutConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.north.extra_rows(), 1);
        assert_eq!(config.south.first_ring, None);
        assert_eq!(config.east.rows, 0);
        assert_eq!(config.west.total_rows(), 1);
    }
}
