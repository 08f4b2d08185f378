use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank pool presets against a terrain and estimate quantities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Engine settings JSON (rates, coefficients, tile sizes)
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write the JSON result to this file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print JSON instead of the text report
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank every catalog preset that fits the terrain
    Fit(FitArgs),
    /// Deck tile bill and sidewalk materials for a pool
    Tiles(TilesArgs),
    /// Cost, shell materials and build season for a single pool
    Estimate(EstimateArgs),
}

#[derive(Args, Debug)]
pub struct FitArgs {
    /// Preset catalog JSON
    #[arg(short, long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Terrain JSON; clearances default to the catalog's
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["length", "width"])]
    pub terrain: Option<PathBuf>,

    /// Terrain length in meters
    #[arg(long, requires = "width")]
    pub length: Option<f64>,

    /// Terrain width in meters
    #[arg(long, requires = "length")]
    pub width: Option<f64>,

    /// Only evaluate the catalog preset with this id
    #[arg(short, long, value_name = "ID")]
    pub preset: Option<String>,

    /// Construction start month (1-12), defaults to the current month
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub month: Option<u8>,

    /// Evaluate presets on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Only show the best N layouts
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Save a project draft for the best layout
    #[arg(long, value_name = "FILE")]
    pub draft: Option<PathBuf>,

    /// Client name recorded on the draft
    #[arg(long, requires = "draft")]
    pub client: Option<String>,
}

#[derive(Args, Debug)]
pub struct TilesArgs {
    /// Pool length in meters
    #[arg(long)]
    pub length: f64,

    /// Pool width in meters
    #[arg(long)]
    pub width: f64,

    /// Per-side tiling layout JSON; defaults to one whale-back ring on every side
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Pool length in meters
    #[arg(long)]
    pub length: f64,

    /// Pool width in meters
    #[arg(long)]
    pub width: f64,

    /// Pool depth in meters (shallow end for sloped floors)
    #[arg(long)]
    pub depth: f64,

    /// Deep-end depth in meters
    #[arg(long)]
    pub depth_end: Option<f64>,

    /// Lateral excavation cushion in meters
    #[arg(long, default_value_t = 0.0)]
    pub cushion: f64,

    /// Construction start month (1-12), defaults to the current month
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub month: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fit_with_dimensions() {
        let cli = Cli::try_parse_from([
            "fit_cli", "fit", "--catalog", "c.json", "--length", "10", "--width", "8", "--month", "3", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Fit(args) => {
                assert_eq!(args.length, Some(10.0));
                assert_eq!(args.width, Some(8.0));
                assert_eq!(args.month, Some(3));
                assert!(args.terrain.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_terrain_conflicts_with_dimensions() {
        let result = Cli::try_parse_from([
            "fit_cli", "fit", "--catalog", "c.json", "--terrain", "t.json", "--length", "10", "--width", "8",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_month_out_of_range() {
        let result = Cli::try_parse_from([
            "fit_cli", "estimate", "--length", "4", "--width", "3", "--depth", "1.5", "--month", "13",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_fit_single_preset() {
        let cli = Cli::try_parse_from(["fit_cli", "fit", "-c", "c.json", "-t", "t.json", "--preset", "lap-10x2.5"])
            .unwrap();
        match cli.command {
            Command::Fit(args) => assert_eq!(args.preset.as_deref(), Some("lap-10x2.5")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_length_requires_width() {
        let result = Cli::try_parse_from(["fit_cli", "fit", "--catalog", "c.json", "--length", "10"]);
        assert!(result.is_err());
    }
}
