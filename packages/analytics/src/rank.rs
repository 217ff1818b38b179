//! Ranks regions by a single metric.

use std::cmp::Ordering;

use firescape_analytics_models::{Order, RankedRegion};
use firescape_region_models::{GlobalScale, Metric, RegionLabel, RegionSummaries};

/// Returns `value / max` clamped to `[0, 1]`, or 0 when `max` is not
/// positive.
#[must_use]
pub fn fraction_of_max(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Ranks every summarized region by `metric`.
///
/// Ties keep region order. Each entry carries its share of the global
/// maximum for that metric, which is what bar lengths are scaled by.
#[must_use]
pub fn rank_regions(
    summaries: &RegionSummaries,
    scale: &GlobalScale,
    metric: Metric,
    order: Order,
) -> Vec<RankedRegion> {
    let max = scale.max_for(metric);

    let mut entries: Vec<(RegionLabel, f64)> = summaries
        .iter()
        .map(|(region, summary)| (*region, metric.value_of(summary)))
        .collect();

    entries.sort_by(|(region_a, a), (region_b, b)| {
        let by_value: Ordering = match order {
            Order::Descending => b.total_cmp(a),
            Order::Ascending => a.total_cmp(b),
        };
        by_value.then_with(|| region_a.cmp(region_b))
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (region, value))| RankedRegion {
            rank: i + 1,
            region,
            metric,
            value,
            fraction_of_max: fraction_of_max(value, max),
        })
        .collect()
}
