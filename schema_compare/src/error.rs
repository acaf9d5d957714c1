//! Error types for SchemaCompare

use std::path::PathBuf;

use thiserror::Error;

/// Result type for SchemaCompare operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for SchemaCompare
///
/// Parsing and comparing are total over their input, so every variant here
/// belongs to the surrounding boundary: reading files, loading configuration,
/// installing the log subscriber and serializing reports.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to read schema file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

/// Convert Serde JSON errors to SchemaCompare errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert Serde YAML errors to SchemaCompare errors
impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert TOML deserialization errors to SchemaCompare errors
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}
