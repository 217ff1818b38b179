//! Command implementations shared by the subcommands and interactive mode.

use std::path::Path;

use firescape_analytics::{aggregate, group_zones, normalize, rank_regions, region_scenario};
use firescape_analytics_models::{ClassBreaks, ClassRange, Order};
use firescape_cli_utils::{IndicatifProgress, MultiProgress};
use firescape_ingest::coerce::parse_zone_id;
use firescape_ingest::{default_config, load_config, load_zones};
use firescape_ingest_models::DatasetConfig;
use firescape_region_models::{
    GlobalScale, Metric, RegionLabel, RegionSummaries, ZoneId, ZoneRecord,
};
use serde::Serialize;
use strum::IntoEnumIterator as _;

/// Width of the text bars drawn next to ranked values.
const BAR_WIDTH: usize = 40;

/// A loaded dataset: its configuration and zone records.
pub struct Dataset {
    pub config: DatasetConfig,
    pub records: Vec<ZoneRecord>,
}

/// Loads the dataset configuration, falling back to the embedded default.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or is invalid.
pub fn config(path: Option<&Path>) -> Result<DatasetConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => load_config(path)?,
        None => default_config(),
    })
}

/// Loads seed zone records with a progress bar.
///
/// # Errors
///
/// Returns an error if the config or the `GeoJSON` file cannot be loaded.
pub fn load(
    multi: &MultiProgress,
    geojson: &Path,
    config_path: Option<&Path>,
) -> Result<Dataset, Box<dyn std::error::Error>> {
    let config = config(config_path)?;
    let progress = IndicatifProgress::features_bar(multi, "Reading seed zones");
    let records = load_zones(geojson, &config, &progress)?;

    Ok(Dataset { config, records })
}

/// Aggregates a dataset into region summaries, optionally dropping the
/// `Unknown` group.
///
/// # Errors
///
/// Returns an error if any zone has no usable area.
pub fn summaries(
    dataset: &Dataset,
    exclude_unknown: bool,
) -> Result<RegionSummaries, Box<dyn std::error::Error>> {
    let summaries = aggregate(&dataset.records)?;

    Ok(if exclude_unknown {
        firescape_analytics::without_unknown(summaries)
    } else {
        summaries
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn range_text(lower: Option<f64>, upper: Option<f64>) -> String {
    match (lower, upper) {
        (None, Some(upper)) => format!("< {upper}"),
        (Some(lower), Some(upper)) => format!("{lower} - {upper}"),
        (Some(lower), None) => format!(">= {lower}"),
        (None, None) => "all".to_string(),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled)
}

/// Lists the named regions with their page keys and seed zone ranges.
pub fn regions() {
    println!("{:<24} {:<30} SEED ZONES", "KEY", "NAME");
    println!("{}", "-".repeat(70));
    for region in RegionLabel::NAMED {
        let range = region
            .seed_zone_range()
            .map_or_else(String::new, |r| format!("{}-{}", r.start, r.end - 1));
        println!("{:<24} {:<30} {range}", region.key(), region.label());
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Classification {
    input: String,
    zone_id: ZoneId,
    region: RegionLabel,
}

/// Classifies raw seed zone ids given on the command line.
///
/// # Errors
///
/// Returns an error if JSON output fails to serialize.
pub fn classify(zones: &[String], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<Classification> = zones
        .iter()
        .map(|input| {
            let zone_id = parse_zone_id(Some(&serde_json::Value::String(input.clone())));
            Classification {
                input: input.clone(),
                region: zone_id.region(),
                zone_id,
            }
        })
        .collect();

    if json {
        return Ok(print_json(&rows)?);
    }

    println!("{:<12} {:<12} REGION", "INPUT", "ZONE");
    println!("{}", "-".repeat(50));
    for row in &rows {
        println!("{:<12} {:<12} {}", row.input, row.zone_id.to_string(), row.region);
    }

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryReport<'a> {
    dataset: &'a str,
    regions: &'a RegionSummaries,
    scale: GlobalScale,
}

/// Prints per-region summaries and the global scale.
///
/// # Errors
///
/// Returns an error if JSON output fails to serialize.
pub fn summarize(
    dataset: &Dataset,
    summaries: &RegionSummaries,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scale = normalize(summaries);

    if json {
        return Ok(print_json(&SummaryReport {
            dataset: &dataset.config.id,
            regions: summaries,
            scale,
        })?);
    }

    println!(
        "{:<28} {:>6} {:>12} {:>7} {:>10} {:>10} {:>10} {:>9}",
        "REGION", "ZONES", "AREA KM²", "FIRES", "FIRES/100", "BURN/100", "RARE %", "PRECIP"
    );
    println!("{}", "-".repeat(100));
    for (region, summary) in summaries {
        println!(
            "{:<28} {:>6} {:>12.1} {:>7} {:>10.4} {:>10.4} {:>10.2} {:>9.1}",
            region.label(),
            summary.zone_count,
            summary.total_area_km2,
            summary.total_fire_count,
            summary.fire_density,
            summary.burned_density,
            summary.mean_percent_rare_veg,
            summary.mean_precipitation_mm,
        );
    }

    println!();
    println!("Global maxima:");
    for metric in Metric::iter() {
        println!("  {:<30} {:.4}", metric.caption(), scale.max_for(metric));
    }

    Ok(())
}

/// Prints regions ranked by one metric, with bars scaled to the global
/// maximum.
///
/// # Errors
///
/// Returns an error if JSON output fails to serialize.
pub fn rank(
    summaries: &RegionSummaries,
    metric: Metric,
    order: Order,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scale = normalize(summaries);
    let ranked = rank_regions(summaries, &scale, metric, order);

    if json {
        return Ok(print_json(&ranked)?);
    }

    println!("{}", metric.caption());
    println!("{}", "-".repeat(80));
    for entry in &ranked {
        println!(
            "{:>2}. {:<28} {:>10.4} {}",
            entry.rank,
            entry.region.label(),
            entry.value,
            bar(entry.fraction_of_max)
        );
    }

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ZoneRow<'a> {
    zone_id: &'a ZoneId,
    region: RegionLabel,
    fire_density: Option<f64>,
    fire_class: Option<&'a str>,
    precipitation_mm: f64,
    precipitation_class: Option<&'a str>,
}

fn zone_rows(dataset: &Dataset, region: Option<RegionLabel>) -> Vec<ZoneRow<'_>> {
    let classes = &dataset.config.classes;

    group_zones(&dataset.records)
        .into_iter()
        .filter(|(label, _)| region.is_none_or(|wanted| wanted == *label))
        .flat_map(|(label, members)| {
            members.into_iter().map(move |zone| {
                let fire_density = zone.fire_density();
                ZoneRow {
                    zone_id: &zone.zone_id,
                    region: label,
                    fire_density,
                    fire_class: fire_density
                        .and_then(|density| classes.fire_density.label_for(density)),
                    precipitation_mm: zone.precipitation_mm,
                    precipitation_class: classes.precipitation.label_for(zone.precipitation_mm),
                }
            })
        })
        .collect()
}

/// Lists zones with their region and per-zone classes.
///
/// # Errors
///
/// Returns an error if JSON output fails to serialize.
pub fn zones(
    dataset: &Dataset,
    region: Option<RegionLabel>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = zone_rows(dataset, region);

    if json {
        return Ok(print_json(&rows)?);
    }

    if rows.is_empty() {
        println!("No zones found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<28} {:>10} {:<10} {:>9} {:<10}",
        "ZONE", "REGION", "FIRES/100", "CLASS", "PRECIP", "CLASS"
    );
    println!("{}", "-".repeat(82));
    for row in &rows {
        println!(
            "{:<10} {:<28} {:>10} {:<10} {:>9.1} {:<10}",
            row.zone_id.to_string(),
            row.region.label(),
            row.fire_density
                .map_or_else(|| "-".to_string(), |density| format!("{density:.4}")),
            row.fire_class.unwrap_or("-"),
            row.precipitation_mm,
            row.precipitation_class.unwrap_or("-"),
        );
    }

    Ok(())
}

/// Applies a fire multiplier to one region and prints the baseline and
/// adjusted densities.
///
/// # Errors
///
/// Returns an error if the region has no zones, the multiplier is
/// invalid, or JSON output fails to serialize.
pub fn scenario(
    summaries: &RegionSummaries,
    region: RegionLabel,
    multiplier: f64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let baseline = region_scenario(summaries, region, 1.0)?;
    let adjusted = region_scenario(summaries, region, multiplier)?;

    if json {
        return Ok(print_json(&adjusted)?);
    }

    println!("{region} at {multiplier}x fire activity");
    println!("{}", "-".repeat(50));
    println!(
        "  {:<24} {:>10.4} -> {:.4}",
        Metric::FireDensity.caption(),
        baseline.fire_density,
        adjusted.fire_density
    );
    println!(
        "  {:<24} {:>10.4} -> {:.4}",
        Metric::BurnedDensity.caption(),
        baseline.burned_density,
        adjusted.burned_density
    );

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Legends {
    fire_density: Vec<ClassRange>,
    precipitation: Vec<ClassRange>,
}

fn print_legend(title: &str, breaks: &ClassBreaks) {
    println!("{title}");
    for row in breaks.legend() {
        println!("  {:<12} {}", row.label, range_text(row.lower, row.upper));
    }
}

/// Prints the legend rows of the configured class breaks.
///
/// # Errors
///
/// Returns an error if JSON output fails to serialize.
pub fn classes(config: &DatasetConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        return Ok(print_json(&Legends {
            fire_density: config.classes.fire_density.legend(),
            precipitation: config.classes.precipitation.legend(),
        })?);
    }

    print_legend(Metric::FireDensity.caption(), &config.classes.fire_density);
    println!();
    print_legend(Metric::Precipitation.caption(), &config.classes.precipitation);

    Ok(())
}
