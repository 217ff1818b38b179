//! Cross-region maxima for shared chart and map domains.

use firescape_region_models::{GlobalScale, RegionLabel, RegionSummaries};

/// Computes the per-metric maxima across all summaries.
///
/// Every maximum is floored at zero, so an empty map yields an all-zero
/// scale. Pure: calling it twice on the same input gives the same value.
#[must_use]
pub fn normalize(summaries: &RegionSummaries) -> GlobalScale {
    summaries
        .values()
        .fold(GlobalScale::default(), |scale, summary| GlobalScale {
            max_fire_density: scale.max_fire_density.max(summary.fire_density),
            max_burned_density: scale.max_burned_density.max(summary.burned_density),
            max_rare_veg_density: scale.max_rare_veg_density.max(summary.rare_veg_density),
            max_percent_rare_veg: scale.max_percent_rare_veg.max(summary.mean_percent_rare_veg),
            max_precipitation_mm: scale.max_precipitation_mm.max(summary.mean_precipitation_mm),
        })
}

/// Drops the [`RegionLabel::Unknown`] summary, for callers that want the
/// scale computed over named regions only.
#[must_use]
pub fn without_unknown(mut summaries: RegionSummaries) -> RegionSummaries {
    if let Some(unknown) = summaries.remove(&RegionLabel::Unknown) {
        log::info!(
            "Excluding {} unclassified zone(s) from region statistics",
            unknown.zone_count
        );
    }
    summaries
}
