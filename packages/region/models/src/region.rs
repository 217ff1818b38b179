//! The nine physiographic regions of California and their seed zone ranges.
//!
//! Every region owns one half-open range of seed zone numbers. Labels are
//! the human-readable names shown in legends and tooltips; keys are the
//! slugs the site uses for region pages (`central-coast`, ...).

use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator as _;
use strum_macros::{Display, EnumCount, EnumIter, IntoStaticStr};
use thiserror::Error;

/// A physiographic region, or [`RegionLabel::Unknown`] for seed zones that
/// fall outside every known range.
///
/// Variants are declared in classification order, which is also their
/// [`Ord`] order.
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
    IntoStaticStr,
    EnumIter,
    EnumCount,
)]
pub enum RegionLabel {
    /// Seed zones 90-99.
    #[serde(rename = "North Coast Redwood")]
    #[strum(serialize = "North Coast Redwood")]
    NorthCoastRedwood,
    /// Seed zones 100-199.
    #[serde(rename = "Central Coast")]
    #[strum(serialize = "Central Coast")]
    CentralCoast,
    /// Seed zones 300-399.
    #[serde(rename = "North Coast Interior")]
    #[strum(serialize = "North Coast Interior")]
    NorthCoastInterior,
    /// Seed zones 500-599.
    #[serde(
        rename = "West Slope Cascades-Sierra",
        alias = "West Slope Cascades\u{2013}Sierra"
    )]
    #[strum(serialize = "West Slope Cascades-Sierra")]
    WestSlopeCascadesSierra,
    /// Seed zones 700-799.
    #[serde(
        rename = "East Slope Cascades-Sierra",
        alias = "East Slope Cascades\u{2013}Sierra"
    )]
    #[strum(serialize = "East Slope Cascades-Sierra")]
    EastSlopeCascadesSierra,
    /// Seed zones 950-959.
    #[serde(rename = "Great Basin")]
    #[strum(serialize = "Great Basin")]
    GreatBasin,
    /// Seed zones 960-969.
    #[serde(rename = "Central Valley")]
    #[strum(serialize = "Central Valley")]
    CentralValley,
    /// Seed zones 980-989.
    #[serde(rename = "SoCal Desert")]
    #[strum(serialize = "SoCal Desert")]
    SocalDesert,
    /// Seed zones 990-999.
    #[serde(rename = "SoCal Mountains")]
    #[strum(serialize = "SoCal Mountains")]
    SocalMountains,
    /// Any seed zone outside the ranges above, including ids that could
    /// not be read as a number.
    #[serde(rename = "Unknown")]
    #[strum(serialize = "Unknown")]
    Unknown,
}

/// Seed zone ranges in classification order. First match wins.
pub const SEED_ZONE_RANGES: &[(Range<i64>, RegionLabel)] = &[
    (90..100, RegionLabel::NorthCoastRedwood),
    (100..200, RegionLabel::CentralCoast),
    (300..400, RegionLabel::NorthCoastInterior),
    (500..600, RegionLabel::WestSlopeCascadesSierra),
    (700..800, RegionLabel::EastSlopeCascadesSierra),
    (950..960, RegionLabel::GreatBasin),
    (960..970, RegionLabel::CentralValley),
    (980..990, RegionLabel::SocalDesert),
    (990..1000, RegionLabel::SocalMountains),
];

impl RegionLabel {
    /// The nine named regions, excluding [`RegionLabel::Unknown`].
    pub const NAMED: &[Self] = &[
        Self::NorthCoastRedwood,
        Self::CentralCoast,
        Self::NorthCoastInterior,
        Self::WestSlopeCascadesSierra,
        Self::EastSlopeCascadesSierra,
        Self::GreatBasin,
        Self::CentralValley,
        Self::SocalDesert,
        Self::SocalMountains,
    ];

    /// Returns the display label (e.g. `"Great Basin"`).
    #[must_use]
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Returns the page slug for this region (e.g. `"great-basin"`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NorthCoastRedwood => "north-coast-redwood",
            Self::CentralCoast => "central-coast",
            Self::NorthCoastInterior => "north-coast-interior",
            Self::WestSlopeCascadesSierra => "west-slope-sierra",
            Self::EastSlopeCascadesSierra => "east-slope-sierra",
            Self::GreatBasin => "great-basin",
            Self::CentralValley => "central-valley",
            Self::SocalDesert => "socal-desert",
            Self::SocalMountains => "socal-mountains",
            Self::Unknown => "unknown",
        }
    }

    /// Looks up a region by its page slug. Exact match only.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::iter().find(|region| region.key() == key)
    }

    /// Returns the half-open seed zone range of a named region, or `None`
    /// for [`RegionLabel::Unknown`].
    #[must_use]
    pub fn seed_zone_range(self) -> Option<Range<i64>> {
        SEED_ZONE_RANGES
            .iter()
            .find(|(_, region)| *region == self)
            .map(|(range, _)| range.clone())
    }
}

/// Error returned when text matches neither a region label nor a key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown region '{value}': expected a region name or key such as 'great-basin'")]
pub struct ParseRegionError {
    /// The text that failed to parse.
    pub value: String,
}

impl FromStr for RegionLabel {
    type Err = ParseRegionError;

    /// Accepts labels or keys, ignoring ASCII case and surrounding
    /// whitespace. The en-dash spelling of "Cascades–Sierra" found in the
    /// source data is accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().replace('\u{2013}', "-");

        Self::iter()
            .find(|region| {
                region.label().eq_ignore_ascii_case(&needle)
                    || region.key().eq_ignore_ascii_case(&needle)
            })
            .ok_or_else(|| ParseRegionError {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount as _;

    #[test]
    fn nine_named_regions_plus_unknown() {
        assert_eq!(RegionLabel::NAMED.len(), 9);
        assert_eq!(RegionLabel::COUNT, 10);
        assert!(!RegionLabel::NAMED.contains(&RegionLabel::Unknown));
    }

    #[test]
    fn every_named_region_has_a_range() {
        for region in RegionLabel::NAMED {
            assert!(
                region.seed_zone_range().is_some(),
                "no seed zone range for {region}"
            );
        }
        assert_eq!(RegionLabel::Unknown.seed_zone_range(), None);
    }

    #[test]
    fn ranges_are_disjoint() {
        for (i, (a, _)) in SEED_ZONE_RANGES.iter().enumerate() {
            for (b, _) in &SEED_ZONE_RANGES[i + 1..] {
                assert!(
                    a.end <= b.start || b.end <= a.start,
                    "overlapping ranges {a:?} and {b:?}"
                );
            }
        }
    }

    #[test]
    fn key_roundtrip() {
        for region in RegionLabel::iter() {
            assert_eq!(RegionLabel::from_key(region.key()), Some(region));
        }
        assert_eq!(RegionLabel::from_key("atlantis"), None);
    }

    #[test]
    fn parses_labels_and_keys() {
        assert_eq!(
            "central valley".parse::<RegionLabel>(),
            Ok(RegionLabel::CentralValley)
        );
        assert_eq!(
            " socal-desert ".parse::<RegionLabel>(),
            Ok(RegionLabel::SocalDesert)
        );
        assert_eq!(
            "East Slope Cascades\u{2013}Sierra".parse::<RegionLabel>(),
            Ok(RegionLabel::EastSlopeCascadesSierra)
        );
        assert!("Atlantis".parse::<RegionLabel>().is_err());
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(
            RegionLabel::WestSlopeCascadesSierra.to_string(),
            "West Slope Cascades-Sierra"
        );
        assert_eq!(RegionLabel::Unknown.label(), "Unknown");
    }

    #[test]
    fn serde_accepts_en_dash_alias() {
        let region: RegionLabel =
            serde_json::from_str("\"West Slope Cascades\u{2013}Sierra\"").unwrap();
        assert_eq!(region, RegionLabel::WestSlopeCascadesSierra);
        assert_eq!(
            serde_json::to_string(&RegionLabel::SocalMountains).unwrap(),
            "\"SoCal Mountains\""
        );
    }
}
