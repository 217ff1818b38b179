#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading of seed zone datasets.
//!
//! A dataset is a `GeoJSON` `FeatureCollection` with one feature per seed
//! zone. [`config`] describes which property holds which statistic,
//! [`zones`] turns the features into [`ZoneRecord`] values and [`coerce`]
//! handles the loosely typed property values along the way.
//!
//! [`ZoneRecord`]: firescape_region_models::ZoneRecord

pub mod coerce;
pub mod config;
pub mod progress;
pub mod zones;

use std::path::PathBuf;

use thiserror::Error;

pub use config::{default_config, load_config, parse_config};
pub use zones::{load_zones, parse_feature_collection};

/// Errors raised while loading a dataset or its configuration.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid `GeoJSON`.
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The input is valid `GeoJSON` but not a `FeatureCollection`.
    #[error("expected a GeoJSON FeatureCollection")]
    NotFeatureCollection,

    /// A required property is absent or `null`.
    #[error("feature {feature}: missing required property '{property}'")]
    MissingProperty {
        /// Index of the feature in the collection.
        feature: usize,
        /// Source property name.
        property: String,
    },

    /// A property value is present but unusable.
    #[error("feature {feature}: property '{property}' = {value}: {reason}")]
    InvalidProperty {
        /// Index of the feature in the collection.
        feature: usize,
        /// Source property name.
        property: String,
        /// The offending value, as JSON.
        value: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Two features share the same numeric seed zone id.
    #[error("seed zone {zone_id} appears more than once")]
    DuplicateZone {
        /// The repeated id.
        zone_id: i64,
    },

    /// The dataset configuration does not match the expected schema.
    #[error("invalid dataset config: {0}")]
    Config(#[from] toml::de::Error),

    /// The dataset configuration has invalid class breaks.
    #[error("invalid class breaks: {0}")]
    ClassBreaks(#[from] firescape_analytics_models::ClassBreaksError),
}
