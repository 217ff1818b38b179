//! Interactive menu for the firescape CLI.
//!
//! Provides a menu-driven interface using `dialoguer` so the analytics
//! can be explored without memorizing subcommands and flags.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};
use firescape_analytics_models::Order;
use firescape_cli_utils::MultiProgress;
use firescape_region_models::{Metric, RegionLabel};
use strum::IntoEnumIterator as _;

use crate::commands;

/// Default dataset file name, as published alongside the site.
const DEFAULT_GEOJSON: &str = "final_combined_data.geojson";

/// Top-level actions available in the interactive menu.
enum Action {
    Summarize,
    Rank,
    Zones,
    Scenario,
    Regions,
    Classes,
}

impl Action {
    const ALL: &[Self] = &[
        Self::Summarize,
        Self::Rank,
        Self::Zones,
        Self::Scenario,
        Self::Regions,
        Self::Classes,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Summarize => "Summarize regions",
            Self::Rank => "Rank regions by a metric",
            Self::Zones => "List zones",
            Self::Scenario => "Fire multiplier scenario",
            Self::Regions => "List regions",
            Self::Classes => "Show class legends",
        }
    }
}

/// Runs the interactive menu, prompting for an action and its inputs.
///
/// # Errors
///
/// Returns an error if a prompt fails or the selected operation fails.
pub fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    println!("Firescape: wildfire statistics by physiographic region");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Action::ALL[idx] {
        Action::Regions => commands::regions(),
        Action::Classes => commands::classes(&commands::config(None)?, false)?,
        Action::Summarize => {
            let data = commands::load(multi, &prompt_geojson()?, None)?;
            let summaries = commands::summaries(&data, prompt_exclude_unknown()?)?;
            commands::summarize(&data, &summaries, false)?;
        }
        Action::Rank => {
            let data = commands::load(multi, &prompt_geojson()?, None)?;
            let summaries = commands::summaries(&data, prompt_exclude_unknown()?)?;
            let metric = prompt_metric()?;
            let ascending = Confirm::new()
                .with_prompt("Lowest first?")
                .default(false)
                .interact()?;
            let order = if ascending {
                Order::Ascending
            } else {
                Order::Descending
            };
            commands::rank(&summaries, metric, order, false)?;
        }
        Action::Zones => {
            let data = commands::load(multi, &prompt_geojson()?, None)?;
            let region = prompt_region(true)?;
            commands::zones(&data, region, false)?;
        }
        Action::Scenario => {
            let data = commands::load(multi, &prompt_geojson()?, None)?;
            let summaries = commands::summaries(&data, false)?;
            let Some(region) = prompt_region(false)? else {
                return Ok(());
            };
            let multiplier: f64 = Input::new()
                .with_prompt("Fire multiplier")
                .default(1.0)
                .validate_with(|value: &f64| check_multiplier(*value))
                .interact_text()?;
            commands::scenario(&summaries, region, multiplier, false)?;
        }
    }

    Ok(())
}

/// Accepts multipliers the scenario can apply: finite and not negative.
fn check_multiplier(value: f64) -> Result<(), &'static str> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err("Enter a finite number of 0 or more")
    }
}

fn prompt_geojson() -> Result<PathBuf, dialoguer::Error> {
    let path: String = Input::new()
        .with_prompt("Seed zone GeoJSON file")
        .default(DEFAULT_GEOJSON.to_string())
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}

fn prompt_exclude_unknown() -> Result<bool, dialoguer::Error> {
    Confirm::new()
        .with_prompt("Exclude zones that match no region?")
        .default(false)
        .interact()
}

fn prompt_metric() -> Result<Metric, dialoguer::Error> {
    let metrics: Vec<Metric> = Metric::iter().collect();
    let labels: Vec<&str> = metrics.iter().map(|metric| metric.caption()).collect();

    let idx = Select::new()
        .with_prompt("Metric")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(metrics[idx])
}

/// Prompts for a named region. With `allow_all`, the first choice is
/// "All regions" and maps to `None`.
fn prompt_region(allow_all: bool) -> Result<Option<RegionLabel>, dialoguer::Error> {
    let mut labels: Vec<&str> = Vec::with_capacity(RegionLabel::NAMED.len() + 1);
    if allow_all {
        labels.push("All regions");
    }
    labels.extend(RegionLabel::NAMED.iter().map(|region| region.label()));

    let idx = Select::new()
        .with_prompt("Region")
        .items(&labels)
        .default(0)
        .interact()?;

    let offset = usize::from(allow_all);
    Ok(idx
        .checked_sub(offset)
        .and_then(|i| RegionLabel::NAMED.get(i))
        .copied())
}
