//! Dataset configuration loading.
//!
//! The default configuration is embedded at compile time from
//! `config/default.toml` and describes the property names of the combined
//! seed zone dataset. A different file can be supplied at runtime for
//! datasets exported with other column names.

use std::path::Path;

use firescape_ingest_models::DatasetConfig;

use crate::IngestError;

/// Embedded default dataset definition.
const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Returns the embedded default dataset configuration.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse or validate. Since it is a
/// compile-time constant, a failure indicates a development error and is
/// caught by the tests.
#[must_use]
pub fn default_config() -> DatasetConfig {
    parse_config(DEFAULT_CONFIG_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded default dataset config: {e}"))
}

/// Parses and validates a dataset configuration from TOML text.
///
/// # Errors
///
/// Returns [`IngestError::Config`] if the TOML does not match the schema,
/// or [`IngestError::ClassBreaks`] if either set of class breaks is
/// invalid.
pub fn parse_config(text: &str) -> Result<DatasetConfig, IngestError> {
    let config: DatasetConfig = toml::from_str(text)?;

    config.classes.fire_density.validate()?;
    config.classes.precipitation.validate()?;

    Ok(config)
}

/// Reads a dataset configuration file.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be read, otherwise as
/// for [`parse_config`].
pub fn load_config(path: &Path) -> Result<DatasetConfig, IngestError> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&text)?;
    log::info!("Loaded dataset config '{}' from {}", config.id, path.display());

    Ok(config)
}
