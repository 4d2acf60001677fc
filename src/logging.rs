//! Logging System
//!
//! Structured logging using the `tracing` crate. Logs never go to stdout,
//! which carries the command report; the destination is stderr or a file.
//!
//! Priority order (highest to lowest):
//! 1. CLI flags (`--log-level`, `--log-format`, ...)
//! 2. Environment variables (`FIXITY_LOG`, `FIXITY_LOG_FORMAT`)
//! 3. Configuration file `[logging]` section
//! 4. Defaults

use crate::config::project_dirs;
use crate::error::FixityError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit logs at all. Off unless `--verbose` is given.
    #[serde(default)]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file"); defaults to the platform data dir
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format on stderr only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

impl LoggingConfig {
    /// Validate format and output values
    pub fn validate(&self) -> Result<(), String> {
        if self.format != "json" && self.format != "text" {
            return Err(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.format
            ));
        }
        if self.output != "stderr" && self.output != "file" {
            return Err(format!(
                "Invalid log output: {} (must be 'stderr' or 'file')",
                self.output
            ));
        }
        Ok(())
    }

    /// Log file location: explicit path, else `<data dir>/fixity.log`
    pub fn resolved_file(&self) -> Option<PathBuf> {
        self.file.clone().or_else(|| {
            project_dirs().map(|dirs| dirs.data_local_dir().join("fixity.log"))
        })
    }
}

/// Initialize the logging system
///
/// Does nothing when logging is disabled.
pub fn init_logging(config: &LoggingConfig) -> Result<(), FixityError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    config.validate().map_err(FixityError::ConfigError)?;

    let base_subscriber = Registry::default().with(filter);

    let result = match (format.as_str(), config.output.as_str()) {
        ("json", "file") => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(Mutex::new(open_log_file(config)?)),
            )
            .try_init(),
        ("json", _) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        (_, "file") => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(Mutex::new(open_log_file(config)?)),
            )
            .try_init(),
        _ => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| FixityError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, FixityError> {
    let log_file = config.resolved_file().ok_or_else(|| {
        FixityError::ConfigError("No log file path and no platform data directory".to_string())
    })?;

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            FixityError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            FixityError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e))
        })
}

/// Build environment filter from `FIXITY_LOG` or the configured level
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, FixityError> {
    if let Ok(filter) = EnvFilter::try_from_env("FIXITY_LOG") {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level)
        .map_err(|e| FixityError::ConfigError(format!("Invalid log level {:?}: {}", config.level, e)))
}

/// Determine output format from environment or config
fn determine_format(config: &LoggingConfig) -> Result<String, FixityError> {
    if let Ok(format) = std::env::var("FIXITY_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    Ok(config.format.clone())
}
