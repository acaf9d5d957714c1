//! Configuration handling for SchemaCompare

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::report::ReportFormat;

/// Load configuration from a TOML file
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|e| {
        Error::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;

    Ok(config)
}

/// Represents the complete SchemaCompare configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub parse: ParseConfig,
    pub diff: DiffConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Parser behaviour configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ParseConfig {
    /// Log skipped lines at `warn` instead of `debug`
    pub warn_on_skipped_lines: bool,
}

/// Comparison behaviour configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DiffConfig {
    pub sort_within_kind: bool,
    /// Tables of the reference schema that are not checked
    pub ignore_tables: Vec<String>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            sort_within_kind: true,
            ignore_tables: Vec::new(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: ReportFormat,
    /// Exit with a failure status when any difference is found
    pub fail_on_diff: bool,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub format: String,
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            format: "text".to_string(),
            stdout: false,
        }
    }
}
