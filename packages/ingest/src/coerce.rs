//! Lenient conversion of raw feature property values.
//!
//! Property bags in the published seed zone files are loosely typed: the
//! same field can be a number in one file and a string in another. These
//! helpers accept what a browser's `Number(...)` would accept and report
//! everything else as missing rather than failing.

use firescape_region_models::ZoneId;
use serde_json::Value;

/// Converts a property value to a finite number.
///
/// Numbers pass through, strings are trimmed and parsed (an empty string
/// is 0), booleans become 1/0 and `null` becomes 0. Arrays, objects,
/// unparseable strings and non-finite results give `None`.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                0.0
            } else {
                text.parse::<f64>().ok()?
            }
        }
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => return None,
    };

    number.is_finite().then_some(number)
}

/// Reads a seed zone id.
///
/// Numeric values (including numeric strings) become [`ZoneId::Seed`],
/// floored when fractional. Missing, `null` and non-numeric ids are kept
/// as [`ZoneId::Malformed`] and logged, so the zone still counts toward
/// the `Unknown` region instead of being silently dropped.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_zone_id(value: Option<&Value>) -> ZoneId {
    let raw = match value {
        None | Some(Value::Null) => {
            log::warn!("Feature has no seed zone id; classifying as Unknown");
            return ZoneId::Malformed(String::new());
        }
        Some(raw) => raw,
    };

    if let Some(number) = coerce_number(raw) {
        if number.fract() != 0.0 {
            log::debug!("Fractional seed zone id {number}; using {}", number.floor());
        }
        return ZoneId::Seed(number.floor() as i64);
    }

    let text = match raw {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    log::warn!("Seed zone id {text:?} is not numeric; classifying as Unknown");
    ZoneId::Malformed(text)
}
