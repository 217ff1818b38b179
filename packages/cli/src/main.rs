#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for seed zone region analytics.
//!
//! Every subcommand reads the same `GeoJSON` seed zone dataset, aggregates
//! it by physiographic region and prints a table (or JSON with `--json`).
//! Running without a subcommand opens an interactive menu.
//!
//! Uses `indicatif-log-bridge` (via [`firescape_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

mod commands;
mod interactive;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use firescape_analytics_models::Order;
use firescape_region_models::{Metric, RegionLabel};

#[derive(Parser)]
#[command(name = "firescape", about = "Wildfire statistics by California physiographic region")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every command that reads a dataset.
#[derive(Args)]
struct DatasetArgs {
    /// Path to the seed zone `GeoJSON` `FeatureCollection`
    geojson: PathBuf,
    /// Dataset config TOML (defaults to the built-in `final_combined` mapping)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Drop zones that match no region instead of reporting them as Unknown
    #[arg(long)]
    exclude_unknown: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the physiographic regions and their seed zone ranges
    Regions,
    /// Classify seed zone ids (e.g., "523", "961.4")
    Classify {
        /// Raw seed zone ids
        #[arg(required = true)]
        zones: Vec<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Aggregate a dataset into per-region statistics
    Summarize {
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Rank regions by one metric
    Rank {
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Metric to rank by (fire-density, burned-density, rare-veg-density,
        /// percent-rare-veg, precipitation)
        #[arg(long, default_value = "fire-density")]
        metric: Metric,
        /// Lowest value first
        #[arg(long)]
        ascending: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List zones with their region and fire/precipitation classes
    Zones {
        /// Path to the seed zone `GeoJSON` `FeatureCollection`
        geojson: PathBuf,
        /// Dataset config TOML
        #[arg(long)]
        config: Option<PathBuf>,
        /// Only list zones in this region (name or key, e.g., "great-basin")
        #[arg(long)]
        region: Option<RegionLabel>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Scale a region's fire activity by a multiplier
    Scenario {
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Region name or key (e.g., "central-coast")
        #[arg(long)]
        region: RegionLabel,
        /// Fire multiplier (0 or greater)
        #[arg(long, default_value = "1.0")]
        multiplier: f64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the fire density and precipitation class legends
    Classes {
        /// Dataset config TOML
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = firescape_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run(&multi);
    };

    match command {
        Commands::Regions => commands::regions(),
        Commands::Classify { zones, json } => commands::classify(&zones, json)?,
        Commands::Summarize { dataset, json } => {
            let data = commands::load(&multi, &dataset.geojson, dataset.config.as_deref())?;
            let summaries = commands::summaries(&data, dataset.exclude_unknown)?;
            commands::summarize(&data, &summaries, json)?;
        }
        Commands::Rank {
            dataset,
            metric,
            ascending,
            json,
        } => {
            let data = commands::load(&multi, &dataset.geojson, dataset.config.as_deref())?;
            let summaries = commands::summaries(&data, dataset.exclude_unknown)?;
            let order = if ascending {
                Order::Ascending
            } else {
                Order::Descending
            };
            commands::rank(&summaries, metric, order, json)?;
        }
        Commands::Zones {
            geojson,
            config,
            region,
            json,
        } => {
            let data = commands::load(&multi, &geojson, config.as_deref())?;
            commands::zones(&data, region, json)?;
        }
        Commands::Scenario {
            dataset,
            region,
            multiplier,
            json,
        } => {
            let data = commands::load(&multi, &dataset.geojson, dataset.config.as_deref())?;
            let summaries = commands::summaries(&data, dataset.exclude_unknown)?;
            commands::scenario(&summaries, region, multiplier, json)?;
        }
        Commands::Classes { config, json } => {
            let config = commands::config(config.as_deref())?;
            commands::classes(&config, json)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rank_metric() {
        let cli = Cli::try_parse_from([
            "firescape",
            "rank",
            "x.geojson",
            "--metric",
            "burned-density",
            "--ascending",
        ])
        .unwrap();

        let Some(Commands::Rank {
            dataset,
            metric,
            ascending,
            json,
        }) = cli.command
        else {
            panic!("expected the rank command");
        };
        assert_eq!(dataset.geojson, PathBuf::from("x.geojson"));
        assert_eq!(metric, Metric::BurnedDensity);
        assert!(ascending);
        assert!(!json);
    }

    #[test]
    fn rank_metric_defaults_to_fire_density() {
        let cli = Cli::try_parse_from(["firescape", "rank", "x.geojson"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Rank {
                metric: Metric::FireDensity,
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_metric() {
        let result = Cli::try_parse_from(["firescape", "rank", "x.geojson", "--metric", "heat"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_region_keys_and_labels() {
        let cli = Cli::try_parse_from([
            "firescape",
            "scenario",
            "x.geojson",
            "--region",
            "great-basin",
            "--multiplier",
            "2.5",
        ])
        .unwrap();
        let Some(Commands::Scenario {
            region, multiplier, ..
        }) = cli.command
        else {
            panic!("expected the scenario command");
        };
        assert_eq!(region, RegionLabel::GreatBasin);
        assert!((multiplier - 2.5).abs() < f64::EPSILON);

        let cli =
            Cli::try_parse_from(["firescape", "zones", "x.geojson", "--region", "Central Valley"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Zones {
                region: Some(RegionLabel::CentralValley),
                ..
            })
        ));
    }

    #[test]
    fn no_subcommand_means_interactive() {
        assert!(Cli::try_parse_from(["firescape"]).unwrap().command.is_none());
    }
}
