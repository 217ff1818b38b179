//! Reads seed zone records from a `GeoJSON` `FeatureCollection`.
//!
//! Each feature's property bag is mapped to a [`ZoneRecord`] through the
//! dataset's [`PropertyMapping`]. Optional fields resolve to 0 here, once,
//! so nothing downstream has to deal with missing values.

use std::collections::BTreeSet;
use std::path::Path;

use firescape_ingest_models::{DatasetConfig, PropertyMapping};
use firescape_region_models::{ZoneId, ZoneRecord};
use geojson::{GeoJson, JsonObject};
use serde_json::Value;

use crate::IngestError;
use crate::coerce::{coerce_number, parse_zone_id};
use crate::progress::ProgressCallback;

/// Reads and parses a `GeoJSON` file into zone records.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be read, otherwise as
/// for [`parse_feature_collection`].
pub fn load_zones(
    path: &Path,
    config: &DatasetConfig,
    progress: &dyn ProgressCallback,
) -> Result<Vec<ZoneRecord>, IngestError> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Reading seed zones from {}", path.display());
    parse_feature_collection(&text, config, progress)
}

/// Parses `GeoJSON` text into one [`ZoneRecord`] per feature.
///
/// # Errors
///
/// Returns [`IngestError`] if the text is not a `FeatureCollection`, a
/// feature lacks a required property, a value is out of range, or two
/// features share a numeric seed zone id.
pub fn parse_feature_collection(
    text: &str,
    config: &DatasetConfig,
    progress: &dyn ProgressCallback,
) -> Result<Vec<ZoneRecord>, IngestError> {
    let GeoJson::FeatureCollection(collection) = text.parse::<GeoJson>()? else {
        return Err(IngestError::NotFeatureCollection);
    };

    progress.set_total(collection.features.len() as u64);
    progress.set_message(format!("Reading {} features", collection.features.len()));

    let empty = JsonObject::new();
    let mut seen = BTreeSet::new();
    let mut records = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.iter().enumerate() {
        let properties = feature.properties.as_ref().unwrap_or(&empty);
        let record = parse_properties(index, properties, &config.properties)?;

        if let ZoneId::Seed(id) = record.zone_id
            && !seen.insert(id)
        {
            return Err(IngestError::DuplicateZone { zone_id: id });
        }

        records.push(record);
        progress.inc(1);
    }

    let malformed = records
        .iter()
        .filter(|record| matches!(record.zone_id, ZoneId::Malformed(_)))
        .count();
    if malformed > 0 {
        log::warn!("{malformed} feature(s) have a non-numeric seed zone id");
    }

    progress.finish(format!("Read {} seed zones", records.len()));
    log::info!("Parsed {} seed zone records", records.len());

    Ok(records)
}

/// Maps one feature's properties to a [`ZoneRecord`].
fn parse_properties<'a>(
    feature: usize,
    properties: &'a JsonObject,
    mapping: &'a PropertyMapping,
) -> Result<ZoneRecord, IngestError> {
    let field = |name: &'a str| Field::new(feature, properties, name);

    let percent = field(mapping.percent_rare_veg.as_str());
    let percent_rare_veg = percent.optional()?;
    if percent_rare_veg > 100.0 {
        return Err(percent.invalid("must be between 0 and 100"));
    }

    Ok(ZoneRecord {
        zone_id: parse_zone_id(properties.get(&mapping.zone_id)),
        area_km2: field(mapping.area_km2.as_str()).required()?,
        fire_count: field(mapping.fire_count.as_str()).count()?,
        burned_area_km2: field(mapping.burned_area_km2.as_str()).required()?,
        rare_veg_area_km2: field(mapping.rare_veg_area_km2.as_str()).optional()?,
        percent_rare_veg,
        precipitation_mm: field(mapping.precipitation_mm.as_str()).required()?,
    })
}

/// A single property lookup, carrying enough context for error messages.
struct Field<'a> {
    feature: usize,
    name: &'a str,
    value: Option<&'a Value>,
}

impl<'a> Field<'a> {
    fn new(feature: usize, properties: &'a JsonObject, name: &'a str) -> Self {
        Self {
            feature,
            name,
            value: properties.get(name),
        }
    }

    /// A non-negative number that must be present and non-null.
    fn required(&self) -> Result<f64, IngestError> {
        match self.value {
            None | Some(Value::Null) => Err(IngestError::MissingProperty {
                feature: self.feature,
                property: self.name.to_string(),
            }),
            Some(value) => self.non_negative(value),
        }
    }

    /// A non-negative number that defaults to 0 when absent or null.
    fn optional(&self) -> Result<f64, IngestError> {
        match self.value {
            None | Some(Value::Null) => Ok(0.0),
            Some(value) => self.non_negative(value),
        }
    }

    /// A required non-negative whole number.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn count(&self) -> Result<u64, IngestError> {
        let number = self.required()?;
        if number.fract() != 0.0 {
            return Err(self.invalid("must be a whole number"));
        }
        // u64::MAX rounds up to 2^64, the first value that does not fit.
        if number >= u64::MAX as f64 {
            return Err(self.invalid("out of range"));
        }
        Ok(number as u64)
    }

    fn non_negative(&self, value: &Value) -> Result<f64, IngestError> {
        let number = coerce_number(value).ok_or_else(|| self.invalid("not a number"))?;
        if number < 0.0 {
            return Err(self.invalid("must not be negative"));
        }
        Ok(number)
    }

    fn invalid(&self, reason: &'static str) -> IngestError {
        IngestError::InvalidProperty {
            feature: self.feature,
            property: self.name.to_string(),
            value: self.value.map_or_else(String::new, ToString::to_string),
            reason,
        }
    }
}
