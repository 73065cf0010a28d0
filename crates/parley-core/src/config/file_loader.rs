//! File-based configuration loading

use crate::config::model::ParleyConfig;
use crate::error::{ParleyError, ParleyResult};
use std::fs;
use std::path::Path;

/// Load configuration from a file
///
/// The format follows the extension: `.toml`, `.yaml`/`.yml`, anything else
/// is read as JSON. A missing file yields the defaults.
pub fn load_from_file(path: &Path) -> ParleyResult<ParleyConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(ParleyConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ParleyError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let parse_error = |format: &str, e: String| {
        ParleyError::config_with_context(
            format!("Failed to parse {} config: {}", format, e),
            format!("Deserializing {} configuration from '{}'", format, path.display()),
        )
    };

    match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string())),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string()))
        }
        _ => serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string())),
    }
}
