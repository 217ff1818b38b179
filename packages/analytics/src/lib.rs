#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region analytics over seed zone records.
//!
//! The pipeline is three pure steps: [`aggregate::aggregate`] groups zone
//! records by physiographic region and reduces them to
//! [`RegionSummary`](firescape_region_models::RegionSummary) values,
//! [`normalize::normalize`] derives the cross-region
//! [`GlobalScale`](firescape_region_models::GlobalScale), and the ranking
//! and scenario helpers read both without modifying them.

pub mod aggregate;
pub mod normalize;
pub mod rank;
pub mod scenario;

pub use aggregate::{aggregate, group_zones};
pub use normalize::{normalize, without_unknown};
pub use rank::{fraction_of_max, rank_regions};
pub use scenario::{apply_fire_multiplier, region_scenario};

use firescape_region_models::{RegionLabel, ZoneId};
use thiserror::Error;

/// Errors that can occur during region analytics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// A zone has zero, negative or non-finite area, so densities for its
    /// region are undefined.
    #[error("Zone {zone_id} has no usable area ({area_km2} km²); densities would be undefined")]
    ZeroArea {
        /// The offending zone.
        zone_id: ZoneId,
        /// The area it reported.
        area_km2: f64,
    },

    /// A zone statistic is negative or not finite.
    #[error("Zone {zone_id} has an invalid {field} ({value}); expected a finite value >= 0")]
    InvalidStatistic {
        /// The offending zone.
        zone_id: ZoneId,
        /// Name of the offending field.
        field: &'static str,
        /// The value it reported.
        value: f64,
    },

    /// A region's totals overflowed to a non-finite value.
    #[error("Totals for region '{region}' are not finite")]
    NonFiniteTotal {
        /// The affected region.
        region: RegionLabel,
    },

    /// A scenario multiplier is negative or not finite.
    #[error("Invalid fire multiplier {multiplier}: expected a finite value >= 0")]
    InvalidMultiplier {
        /// The rejected multiplier.
        multiplier: f64,
    },

    /// The requested region has no zones in the dataset.
    #[error("No zones found for region '{region}'")]
    RegionNotFound {
        /// The requested region.
        region: RegionLabel,
    },
}
