//! Logging utilities for SchemaCompare
//!
//! This module provides logging setup and configuration.

use std::fs::File;
use std::path::Path;

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Parse a level name, falling back to `WARN` for anything unknown
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Initialize logging based on configuration
///
/// Logs go to the configured file if any, otherwise to stdout when
/// `stdout` is set, otherwise to stderr so reports on stdout stay clean.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_level(&config.level);
    let directive = format!("schema_compare={}", level)
        .parse()
        .map_err(|e| Error::LoggingError(format!("Invalid log directive: {}", e)))?;
    let env_filter = EnvFilter::from_default_env().add_directive(directive);
    let json = config.format.eq_ignore_ascii_case("json");

    let builder = fmt::Subscriber::builder().with_env_filter(env_filter);

    let result = match (&config.file, config.stdout) {
        (Some(file_path), _) => {
            if let Some(parent) = Path::new(file_path).parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = File::create(file_path)?;
            let builder = builder.with_writer(file).with_ansi(false);
            if json {
                tracing::subscriber::set_global_default(builder.json().finish())
            } else {
                tracing::subscriber::set_global_default(builder.finish())
            }
        }
        (None, true) => {
            if json {
                tracing::subscriber::set_global_default(builder.json().finish())
            } else {
                tracing::subscriber::set_global_default(builder.finish())
            }
        }
        (None, false) => {
            let builder = builder.with_writer(std::io::stderr);
            if json {
                tracing::subscriber::set_global_default(builder.json().finish())
            } else {
                tracing::subscriber::set_global_default(builder.finish())
            }
        }
    };

    result.map_err(|e| Error::LoggingError(e.to_string()))
}

/// Emit a `tracing` event at a level chosen at runtime
#[macro_export]
macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {{
        let level: tracing::Level = $level;
        if level == tracing::Level::ERROR {
            tracing::error!($($arg)+)
        } else if level == tracing::Level::WARN {
            tracing::warn!($($arg)+)
        } else if level == tracing::Level::INFO {
            tracing::info!($($arg)+)
        } else if level == tracing::Level::DEBUG {
            tracing::debug!($($arg)+)
        } else {
            tracing::trace!($($arg)+)
        }
    }};
}
