//! Configuration System
//!
//! Layered configuration built with the `config` crate. Precedence, lowest to
//! highest:
//!
//! 1. Built-in defaults
//! 2. Global file `$XDG_CONFIG_HOME/fixity/config.toml`, or an explicit `--config` file
//! 3. Environment variables `FIXITY_<SECTION>__<KEY>` (e.g. `FIXITY_SCAN__CHUNK_SIZE`)
//!
//! The resolved [`ScanConfig`] is handed to the custodian explicitly; nothing
//! reads configuration from ambient state after startup.

use crate::error::FixityError;
use crate::logging::LoggingConfig;
use crate::manifest::DEFAULT_MANIFEST_NAME;
use crate::tree::hasher::DEFAULT_CHUNK_SIZE;
use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on the hashing chunk size (64 MiB)
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "FIXITY";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixityConfig {
    /// Scan and manifest settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings injected into the walker, hasher and codec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File name of the manifest under each scanned root
    #[serde(default = "default_manifest_name")]
    pub manifest_name: String,

    /// Bytes read per chunk while hashing
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_manifest_name() -> String {
    DEFAULT_MANIFEST_NAME.to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            manifest_name: default_manifest_name(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl ScanConfig {
    /// Validate scan configuration
    pub fn validate(&self) -> Result<(), String> {
        let name = self.manifest_name.as_str();
        if name.is_empty() {
            return Err("Manifest name cannot be empty".to_string());
        }
        if name == "." || name == ".." || name.contains(['/', '\0']) {
            return Err(format!(
                "Manifest name must be a plain file name, got {:?}",
                name
            ));
        }
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(format!(
                "Chunk size must be between 1 and {} bytes, got {}",
                MAX_CHUNK_SIZE, self.chunk_size
            ));
        }
        Ok(())
    }
}

impl FixityConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), FixityError> {
        self.scan
            .validate()
            .map_err(|e| FixityError::ConfigError(format!("scan: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| FixityError::ConfigError(format!("logging: {}", e)))
    }
}

/// Platform directories for fixity (config file, default log file)
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "fixity")
}

/// Loads [`FixityConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Path of the optional global config file
    pub fn global_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load defaults, the global config file if present, then environment overrides
    pub fn load() -> Result<FixityConfig, FixityError> {
        Self::build(Self::global_config_path().as_deref(), false)
    }

    /// Load defaults, the given file (which must exist), then environment overrides
    pub fn load_from_file(path: &Path) -> Result<FixityConfig, FixityError> {
        Self::build(Some(path), true)
    }

    fn build(file: Option<&Path>, required: bool) -> Result<FixityConfig, FixityError> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: FixityConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
