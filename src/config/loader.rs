//! Settings loading from disk.

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::config::schema::ConnectorConfig;
use crate::config::validation::{validate_settings, ConfigError};

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ConfigError),
}

/// Read raw settings from a file.
///
/// `.toml` files are parsed as TOML and converted to JSON values, anything
/// else is parsed as JSON (the usual `datasource.json`).
pub fn load_settings(path: &Path) -> Result<Value, LoadError> {
    let content = fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let settings = if is_toml {
        let table: toml::Value = toml::from_str(&content)?;
        serde_json::to_value(table)?
    } else {
        serde_json::from_str(&content)?
    };

    tracing::debug!(path = %path.display(), "Settings loaded");
    Ok(settings)
}

/// Load and validate settings from a file.
pub fn load_config(path: &Path) -> Result<ConnectorConfig, LoadError> {
    let settings = load_settings(path)?;
    Ok(validate_settings(&settings)?)
}
