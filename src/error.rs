//! Error types for the fixity manifest reconciliation engine.
//!
//! Two families: [`FixityError`] aborts the current operation, [`ScanIssue`]
//! describes a single path that could not be fingerprinted and is collected
//! alongside the scan result.

use crate::tree::path::PathRejection;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal errors. Each one ends the operation with exit status 1.
#[derive(Debug, Error)]
pub enum FixityError {
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Manifest already exists: {}", .0.display())]
    ManifestAlreadyExists(PathBuf),

    #[error("Manifest not found: {}. Run `fixity create` first.", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Failed to write manifest {}: {source}", path.display())]
    ManifestWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to render report: {0}")]
    ReportRender(#[from] serde_json::Error),
}

impl From<config::ConfigError> for FixityError {
    fn from(err: config::ConfigError) -> Self {
        FixityError::ConfigError(err.to_string())
    }
}

/// Per-item failures recorded during a scan. The scan keeps going.
#[derive(Debug, Error)]
pub enum ScanIssue {
    #[error("Cannot traverse {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    #[error("Failed to hash {}: {source}", path.display())]
    HashingFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Skipping {}: {reason}", path.display())]
    UnrepresentablePath { path: PathBuf, reason: PathRejection },
}

impl ScanIssue {
    /// Filesystem path the issue refers to
    pub fn path(&self) -> &Path {
        match self {
            ScanIssue::Walk { path, .. }
            | ScanIssue::HashingFailed { path, .. }
            | ScanIssue::UnrepresentablePath { path, .. } => path,
        }
    }
}
