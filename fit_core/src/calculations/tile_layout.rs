//! # Tile Count Along a Span
//!
//! Counts the coping/deck tiles needed along one straight pool edge.
//!
//! Tiles are laid at a fixed pitch (`tile + joint`). After the last whole
//! tile, the leftover length decides whether one more (cut) tile is needed:
//!
//! 1. `remainder ≤ joint`: nothing but a joint is left, keep `full`.
//! 2. `remainder ≥ tile / 2`: one more tile, trimmed to fit.
//! 3. otherwise: the sliver is absorbed by trimming the last two or three
//!    tiles at installation time. The *count* is still `full + 1`.
//!
//! Only the count is modeled. How the sliver in case 3 is spread across the
//! trailing tiles is decided on site.
//!
//! No rounding happens apart from the `floor` that yields `full`; the
//! thresholds are compared against the raw double-precision remainder.
//!
//! ## Example
//!
//! ```rust
//! use fit_core::calculations::tile_layout::tiles_for_span;
//!
//! // 50 cm tiles with 3 mm joints along an 8.1 m edge
//! assert_eq!(tiles_for_span(8.1, 0.5, 0.003).unwrap(), 17);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcResult};
use crate::units::{Centimeters, Meters, Millimeters};

/// Which remainder rule produced the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemainderRule {
    /// Only a joint (or nothing) left after the last full tile
    Flush,
    /// Remainder hosts one more, possibly trimmed, tile
    ExtraTile,
    /// Narrow sliver spread over the trailing tiles; counted as one extra tile
    Redistributed,
}

/// Tile size and joint width along an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSpec {
    /// Tile edge length along the span (m)
    pub tile_size_m: f64,
    /// Joint width between tiles (m)
    pub joint_size_m: f64,
}

impl Default for TileSpec {
    /// 50 × 50 cm tiles with 3 mm joints
    fn default() -> Self {
        TileSpec {
            tile_size_m: 0.5,
            joint_size_m: 0.003,
        }
    }
}

impl TileSpec {
    /// Build a spec from catalog units (tile in cm, joint in mm).
    pub fn from_catalog_units(tile: Centimeters, joint: Millimeters) -> Self {
        let tile: Meters = tile.into();
        let joint: Meters = joint.into();
        TileSpec {
            tile_size_m: tile.0,
            joint_size_m: joint.0,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("tile_size_m", self.tile_size_m)?;
        require_non_negative("joint_size_m", self.joint_size_m)?;
        Ok(())
    }

    /// Repeating unit along the edge: tile plus joint.
    pub fn effective_pitch_m(&self) -> f64 {
        self.tile_size_m + self.joint_size_m
    }

    /// Lay out tiles along `span_m`.
    pub fn layout(&self, span_m: f64) -> CalcResult<SpanLayout> {
        self.validate()?;
        require_non_negative("span_m", span_m)?;

        let pitch = self.effective_pitch_m();
        let full_tiles = (span_m / pitch).floor();
        let remainder_m = span_m - full_tiles * pitch;
        let full_tiles = full_tiles as u32;

        let rule = if remainder_m <= self.joint_size_m {
            RemainderRule::Flush
        } else if remainder_m >= self.tile_size_m / 2.0 {
            RemainderRule::ExtraTile
        } else {
            RemainderRule::Redistributed
        };

        let tile_count = match rule {
            RemainderRule::Flush => full_tiles,
            RemainderRule::ExtraTile | RemainderRule::Redistributed => full_tiles + 1,
        };

        Ok(SpanLayout {
            span_m,
            full_tiles,
            remainder_m,
            rule,
            tile_count,
        })
    }
}

/// Tile layout along a single edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanLayout {
    pub span_m: f64,
    /// Whole tiles at full pitch
    pub full_tiles: u32,
    /// Length left after the whole tiles (m)
    pub remainder_m: f64,
    pub rule: RemainderRule,
    /// Tiles to order for this edge
    pub tile_count: u32,
}

/// Number of tiles needed along `span_m`.
///
/// Fails on a non-positive tile size, a negative joint or a negative span.
pub fn tiles_for_span(span_m: f64, tile_size_m: f64, joint_size_m: f64) -> CalcResult<u32> {
    let spec = TileSpec {
        tile_size_m,
        joint_size_m,
    };
    Ok(spec.layout(span_m)?.tile_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(8.048, 16; "exact multiple of pitch")]
    #[test_case(8.0, 16; "large remainder adds a tile")]
    #[test_case(8.1, 17; "sliver still adds a tile")]
    #[test_case(4.0, 8; "four meters")]
    #[test_case(0.0, 0; "empty span")]
    fn test_tile_rule_boundaries(span: f64, expected: u32) {
        assert_eq!(tiles_for_span(span, 0.5, 0.003).unwrap(), expected);
    }

    #[test]
    fn test_rule_classification() {
        let spec = TileSpec::default();

        let large = spec.layout(8.0).unwrap();
        assert_eq!(large.full_tiles, 15);
        assert!((large.remainder_m - 0.455).abs() < 1e-9);
        assert_eq!(large.rule, RemainderRule::ExtraTile);

        let sliver = spec.layout(8.1).unwrap();
        assert_eq!(sliver.full_tiles, 16);
        assert!((sliver.remainder_m - 0.052).abs() < 1e-9);
        assert_eq!(sliver.rule, RemainderRule::Redistributed);
        assert_eq!(sliver.tile_count, 17);

        let flush = spec.layout(0.503 + 0.002).unwrap();
        assert_eq!(flush.full_tiles, 1);
        assert_eq!(flush.rule, RemainderRule::Flush);
        assert_eq!(flush.tile_count, 1);
    }

    #[test]
    fn test_remainder_equal_to_joint_is_flush() {
        // pitch 0.75, remainder exactly 0.25
        let spec = TileSpec {
            tile_size_m: 0.5,
            joint_size_m: 0.25,
        };
        let layout = spec.layout(1.0).unwrap();
        assert_eq!(layout.full_tiles, 1);
        assert_eq!(layout.remainder_m, 0.25);
        assert_eq!(layout.rule, RemainderRule::Flush);
        assert_eq!(layout.tile_count, 1);
    }

    #[test]
    fn test_remainder_equal_to_half_tile_adds_tile() {
        // pitch 0.5, remainder exactly 0.25
        let spec = TileSpec {
            tile_size_m: 0.5,
            joint_size_m: 0.0,
        };
        let layout = spec.layout(0.75).unwrap();
        assert_eq!(layout.full_tiles, 1);
        assert_eq!(layout.remainder_m, 0.25);
        assert_eq!(layout.rule, RemainderRule::ExtraTile);
        assert_eq!(layout.tile_count, 2);
    }

    #[test]
    fn test_zero_joint() {
        assert_eq!(tiles_for_span(2.0, 0.5, 0.0).unwrap(), 4);
        assert_eq!(tiles_for_span(2.3, 0.5, 0.0).unwrap(), 5);
    }

    #[test]
    fn test_from_catalog_units() {
        let spec = TileSpec::from_catalog_units(Centimeters(50.0), Millimeters(3.0));
        assert!((spec.effective_pitch_m() - 0.503).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(tiles_for_span(-1.0, 0.5, 0.003).is_err());
        assert!(tiles_for_span(4.0, 0.0, 0.003).is_err());
        assert!(tiles_for_span(4.0, 0.5, -0.003).is_err());
        assert!(tiles_for_span(f64::NAN, 0.5, 0.003).is_err());
    }
}
