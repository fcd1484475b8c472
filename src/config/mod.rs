//! Configuration file loading
//!
//! This module provides functionality to:
//! - Detect the configuration format from the file extension
//! - Decode YAML, TOML or JSON into the configuration model
//! - Preserve declaration order of dependencies and features

mod raw;

use crate::domain::Configuration;
use crate::error::ConfigError;
use raw::RawConfig;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "dependencies-config.yml";

/// Supported configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML (`.yml`, `.yaml`)
    Yaml,
    /// TOML (`.toml`)
    Toml,
    /// JSON (`.json`)
    Json,
}

impl ConfigFormat {
    /// Detects the format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yml" | "yaml" => Some(ConfigFormat::Yaml),
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Yaml => write!(f, "YAML"),
            ConfigFormat::Toml => write!(f, "TOML"),
            ConfigFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Reads and decodes a configuration file
pub fn load_configuration(path: &Path) -> Result<Configuration, ConfigError> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    if !path.exists() {
        return Err(ConfigError::not_found(path));
    }

    info!("Loading dependency configuration from: {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

    let config = parse_configuration(&content, format, path)?;
    debug!(
        "Loaded {} dependencies and {} features ({})",
        config.dependencies.len(),
        config.features.len(),
        format
    );
    Ok(config)
}

/// Decodes configuration text; `path` is only used for error messages
pub fn parse_configuration(
    content: &str,
    format: ConfigFormat,
    path: &Path,
) -> Result<Configuration, ConfigError> {
    let raw: RawConfig = match format {
        ConfigFormat::Yaml => {
            // An empty YAML document is an empty configuration
            if content.trim().is_empty() {
                RawConfig::default()
            } else {
                serde_yaml_ng::from_str(content)
                    .map_err(|e| ConfigError::yaml_parse_error(path, e.to_string()))?
            }
        }
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::toml_parse_error(path, e.to_string()))?
        }
        ConfigFormat::Json => serde_json::from_str(content)
            .map_err(|e| ConfigError::json_parse_error(path, e.to_string()))?,
    };
    raw.into_configuration()
}
