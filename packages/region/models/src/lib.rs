#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Seed zone and physiographic region types.
//!
//! A seed zone is the finest spatial unit of the wildfire dataset. Zones
//! are grouped into nine physiographic regions by numeric range (see
//! [`classify`]), and per-region statistics are summarized into
//! [`RegionSummary`] values. [`GlobalScale`] carries the cross-region
//! maxima that charts and maps use as their common domain.

pub mod classify;
pub mod region;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub use classify::{classify, classify_number};
pub use region::{ParseRegionError, RegionLabel, SEED_ZONE_RANGES};

/// Per-region summaries keyed by region, in classification order.
pub type RegionSummaries = BTreeMap<RegionLabel, RegionSummary>;

/// A seed zone identifier as read from the source data.
///
/// Ids that could be read as a number are [`ZoneId::Seed`]. Anything else
/// is kept verbatim as [`ZoneId::Malformed`] and always classifies as
/// [`RegionLabel::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneId {
    /// A numeric seed zone.
    Seed(i64),
    /// The raw text of an id that failed numeric coercion.
    Malformed(String),
}

impl ZoneId {
    /// Returns the region this zone belongs to.
    #[must_use]
    pub fn region(&self) -> RegionLabel {
        match self {
            Self::Seed(id) => classify(*id),
            Self::Malformed(_) => RegionLabel::Unknown,
        }
    }
}

impl From<i64> for ZoneId {
    fn from(id: i64) -> Self {
        Self::Seed(id)
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seed(id) => write!(f, "{id}"),
            Self::Malformed(raw) => write!(f, "{raw:?}"),
        }
    }
}

/// Raw statistics for one seed zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    /// Seed zone number.
    pub zone_id: ZoneId,
    /// Zone area in km². Must be positive for aggregation.
    pub area_km2: f64,
    /// Number of recorded fire events.
    pub fire_count: u64,
    /// Cumulative burned area in km².
    pub burned_area_km2: f64,
    /// Area covered by rare or sensitive vegetation, in km².
    #[serde(default)]
    pub rare_veg_area_km2: f64,
    /// Share of the zone covered by rare vegetation, 0-100.
    #[serde(default)]
    pub percent_rare_veg: f64,
    /// Average precipitation in mm.
    pub precipitation_mm: f64,
}

impl ZoneRecord {
    /// Creates a record with the given id and area and every statistic
    /// set to zero.
    #[must_use]
    pub fn new(zone_id: impl Into<ZoneId>, area_km2: f64) -> Self {
        Self {
            zone_id: zone_id.into(),
            area_km2,
            fire_count: 0,
            burned_area_km2: 0.0,
            rare_veg_area_km2: 0.0,
            percent_rare_veg: 0.0,
            precipitation_mm: 0.0,
        }
    }

    /// Returns the region this zone belongs to.
    #[must_use]
    pub fn region(&self) -> RegionLabel {
        self.zone_id.region()
    }

    /// Fires per 100 km² for this zone alone, or `None` when the area is
    /// not positive.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fire_density(&self) -> Option<f64> {
        (self.area_km2 > 0.0).then(|| self.fire_count as f64 / self.area_km2 * 100.0)
    }
}

/// Aggregated statistics for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    /// Number of member zones.
    pub zone_count: usize,
    /// Sum of member zone areas, km².
    pub total_area_km2: f64,
    /// Sum of member fire counts.
    pub total_fire_count: u64,
    /// Sum of member burned areas, km².
    pub total_burned_area_km2: f64,
    /// Sum of member rare vegetation areas, km².
    pub total_rare_veg_area_km2: f64,
    /// Fires per 100 km².
    pub fire_density: f64,
    /// Burned km² per 100 km².
    pub burned_density: f64,
    /// Rare vegetation km² per 100 km².
    pub rare_veg_density: f64,
    /// Arithmetic mean of member `percent_rare_veg`.
    pub mean_percent_rare_veg: f64,
    /// Area-weighted mean of member precipitation, mm.
    pub mean_precipitation_mm: f64,
}

/// Cross-region maxima used as the shared domain for charts and maps.
///
/// All fields are zero when computed over no regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalScale {
    /// Largest [`RegionSummary::fire_density`].
    pub max_fire_density: f64,
    /// Largest [`RegionSummary::burned_density`].
    pub max_burned_density: f64,
    /// Largest [`RegionSummary::rare_veg_density`].
    pub max_rare_veg_density: f64,
    /// Largest [`RegionSummary::mean_percent_rare_veg`].
    pub max_percent_rare_veg: f64,
    /// Largest [`RegionSummary::mean_precipitation_mm`].
    pub max_precipitation_mm: f64,
}

impl GlobalScale {
    /// Returns the maximum for the given metric.
    #[must_use]
    pub const fn max_for(&self, metric: Metric) -> f64 {
        match metric {
            Metric::FireDensity => self.max_fire_density,
            Metric::BurnedDensity => self.max_burned_density,
            Metric::RareVegDensity => self.max_rare_veg_density,
            Metric::PercentRareVeg => self.max_percent_rare_veg,
            Metric::Precipitation => self.max_precipitation_mm,
        }
    }
}

/// A per-region statistic that can be ranked or scaled.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Metric {
    /// Fires per 100 km².
    FireDensity,
    /// Burned km² per 100 km².
    BurnedDensity,
    /// Rare vegetation km² per 100 km².
    RareVegDensity,
    /// Mean share of rare vegetation, percent.
    PercentRareVeg,
    /// Area-weighted mean precipitation, mm.
    Precipitation,
}

impl Metric {
    /// Reads this metric from a region summary.
    #[must_use]
    pub const fn value_of(self, summary: &RegionSummary) -> f64 {
        match self {
            Self::FireDensity => summary.fire_density,
            Self::BurnedDensity => summary.burned_density,
            Self::RareVegDensity => summary.rare_veg_density,
            Self::PercentRareVeg => summary.mean_percent_rare_veg,
            Self::Precipitation => summary.mean_precipitation_mm,
        }
    }

    /// Axis/legend caption used by the charts.
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Self::FireDensity => "Fires per 100 km²",
            Self::BurnedDensity => "Burned km² per 100 km²",
            Self::RareVegDensity => "Rare Veg km² per 100 km²",
            Self::PercentRareVeg => "% of Region Rare Vegetation",
            Self::Precipitation => "Avg Precipitation (mm)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_id_region() {
        assert_eq!(ZoneId::Seed(95).region(), RegionLabel::NorthCoastRedwood);
        assert_eq!(
            ZoneId::Malformed("garbage".to_string()).region(),
            RegionLabel::Unknown
        );
    }

    #[test]
    fn zone_id_display() {
        assert_eq!(ZoneId::Seed(523).to_string(), "523");
        assert_eq!(ZoneId::Malformed("n/a".to_string()).to_string(), "\"n/a\"");
    }

    #[test]
    fn zone_id_orders_numeric_before_malformed() {
        assert!(ZoneId::Seed(999) < ZoneId::Malformed("0".to_string()));
        assert!(ZoneId::Seed(-5) < ZoneId::Seed(3));
    }

    #[test]
    fn zone_record_optional_fields_default_to_zero() {
        let record: ZoneRecord = serde_json::from_str(
            r#"{"zoneId":961,"areaKm2":120.0,"fireCount":4,"burnedAreaKm2":1.5,"precipitationMm":80.0}"#,
        )
        .unwrap();
        assert_eq!(record.zone_id, ZoneId::Seed(961));
        assert!(record.rare_veg_area_km2.abs() < f64::EPSILON);
        assert!(record.percent_rare_veg.abs() < f64::EPSILON);
        assert_eq!(record.region(), RegionLabel::CentralValley);
    }

    #[test]
    fn zone_fire_density() {
        let record = ZoneRecord {
            fire_count: 3,
            ..ZoneRecord::new(520, 60.0)
        };
        assert!((record.fire_density().unwrap() - 5.0).abs() < 1e-12);
        assert_eq!(ZoneRecord::new(520, 0.0).fire_density(), None);
    }

    #[test]
    fn metric_parses_kebab_case() {
        assert_eq!("fire-density".parse::<Metric>(), Ok(Metric::FireDensity));
        assert_eq!(Metric::PercentRareVeg.to_string(), "percent-rare-veg");
        assert!("heat".parse::<Metric>().is_err());
    }

    #[test]
    fn empty_scale_is_zero() {
        let scale = GlobalScale::default();
        for metric in [
            Metric::FireDensity,
            Metric::BurnedDensity,
            Metric::RareVegDensity,
            Metric::PercentRareVeg,
            Metric::Precipitation,
        ] {
            assert!(scale.max_for(metric).abs() < f64::EPSILON);
        }
    }
}
