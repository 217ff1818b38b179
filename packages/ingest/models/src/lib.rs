#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset configuration types.
//!
//! Defines the TOML schema that tells the loader which `GeoJSON` feature
//! properties hold each seed zone statistic, plus the class breaks used
//! to bin per-zone values for legends.

use firescape_analytics_models::ClassBreaks;
use serde::{Deserialize, Serialize};

/// A seed zone dataset definition, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Unique dataset identifier (e.g., `"final_combined"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Feature property names for each zone statistic.
    pub properties: PropertyMapping,
    /// Class breaks for per-zone values.
    #[serde(default)]
    pub classes: DatasetClasses,
}

/// Names of the `GeoJSON` feature properties holding each statistic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMapping {
    /// Seed zone number (e.g., `"SEED_ZONE"`).
    pub zone_id: String,
    /// Zone area in km². Required.
    pub area_km2: String,
    /// Fire event count. Required.
    pub fire_count: String,
    /// Burned area in km². Required.
    pub burned_area_km2: String,
    /// Rare vegetation area in km². Defaults to 0 when absent.
    pub rare_veg_area_km2: String,
    /// Percent of the zone covered by rare vegetation. Defaults to 0 when
    /// absent.
    pub percent_rare_veg: String,
    /// Average precipitation in mm. Required.
    pub precipitation_mm: String,
}

/// Class breaks for the per-zone choropleths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetClasses {
    /// Fires per 100 km².
    #[serde(default = "ClassBreaks::fire_density")]
    pub fire_density: ClassBreaks,
    /// Average precipitation, mm.
    #[serde(default = "ClassBreaks::precipitation")]
    pub precipitation: ClassBreaks,
}

impl Default for DatasetClasses {
    fn default() -> Self {
        Self {
            fire_density: ClassBreaks::fire_density(),
            precipitation: ClassBreaks::precipitation(),
        }
    }
}
