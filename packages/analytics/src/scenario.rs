//! The "what if fires were N times as frequent" scenario.

use firescape_analytics_models::ScenarioDensities;
use firescape_region_models::{RegionLabel, RegionSummaries, RegionSummary};

use crate::AnalyticsError;

/// Scales a region's fire and burned densities by `multiplier`.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidMultiplier`] if the multiplier is
/// negative or not finite.
pub fn apply_fire_multiplier(
    summary: &RegionSummary,
    multiplier: f64,
) -> Result<ScenarioDensities, AnalyticsError> {
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(AnalyticsError::InvalidMultiplier { multiplier });
    }

    Ok(ScenarioDensities {
        multiplier,
        fire_density: summary.fire_density * multiplier,
        burned_density: summary.burned_density * multiplier,
    })
}

/// Looks up `region` and applies the multiplier to its summary.
///
/// # Errors
///
/// Returns [`AnalyticsError::RegionNotFound`] if the region has no
/// summary, or [`AnalyticsError::InvalidMultiplier`] as for
/// [`apply_fire_multiplier`].
pub fn region_scenario(
    summaries: &RegionSummaries,
    region: RegionLabel,
    multiplier: f64,
) -> Result<ScenarioDensities, AnalyticsError> {
    let summary = summaries
        .get(&region)
        .ok_or(AnalyticsError::RegionNotFound { region })?;
    apply_fire_multiplier(summary, multiplier)
}
