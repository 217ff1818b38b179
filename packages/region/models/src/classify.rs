//! Seed zone to physiographic region classification.
//!
//! Classification is a total function: every input resolves to a
//! [`RegionLabel`], with [`RegionLabel::Unknown`] for ids outside all
//! ranges and for values that are not finite numbers.

use crate::region::{RegionLabel, SEED_ZONE_RANGES};

/// Maps a seed zone number to its physiographic region.
#[must_use]
pub fn classify(zone_id: i64) -> RegionLabel {
    SEED_ZONE_RANGES
        .iter()
        .find(|(range, _)| range.contains(&zone_id))
        .map_or(RegionLabel::Unknown, |(_, region)| *region)
}

/// Classifies a seed zone id that arrived as a floating point number.
///
/// The value is floored before the range lookup. All range bounds are
/// integers, so `floor(x)` falls in `[a, b)` exactly when `x` does.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn classify_number(value: f64) -> RegionLabel {
    if !value.is_finite() {
        return RegionLabel::Unknown;
    }

    // Saturating cast: out-of-range magnitudes land on i64::MIN/MAX, which
    // are outside every range.
    classify(value.floor() as i64)
}
