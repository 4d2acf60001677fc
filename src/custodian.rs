//! Operation orchestrator: create, verify and update
//!
//! Each operation checks that the root is a directory before touching the
//! filesystem, then composes the fingerprint builder, manifest codec and
//! reconciler. Only `create` and `update` write, and they always write the
//! whole manifest.

use crate::config::ScanConfig;
use crate::error::{FixityError, ScanIssue};
use crate::manifest;
use crate::reconcile::{reconcile, Reconciliation};
use crate::tree::builder::{FingerprintBuilder, Scan};
use crate::tree::walker::{opaque_bundle, EntryFilter, WalkerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Process exit status for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Success, or verification found no differences
    Clean,
    /// Setup, argument or write failure
    Fatal,
    /// Verification found differences
    Differences,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Clean => 0,
            ExitStatus::Fatal => 1,
            ExitStatus::Differences => 2,
        }
    }
}

/// Result of `create`
#[derive(Debug)]
pub struct CreateReport {
    pub manifest_path: PathBuf,
    pub entry_count: usize,
    pub issues: Vec<ScanIssue>,
}

/// Result of `verify`
#[derive(Debug)]
pub struct VerifyReport {
    pub manifest_path: PathBuf,
    pub reconciliation: Reconciliation,
    pub issues: Vec<ScanIssue>,
}

impl VerifyReport {
    /// Clean when nothing differs, Differences otherwise
    pub fn exit_status(&self) -> ExitStatus {
        if self.reconciliation.is_clean() {
            ExitStatus::Clean
        } else {
            ExitStatus::Differences
        }
    }
}

/// Result of `update`
#[derive(Debug)]
pub struct UpdateReport {
    pub manifest_path: PathBuf,
    pub reconciliation: Reconciliation,
    pub entry_count: usize,
    pub issues: Vec<ScanIssue>,
}

impl UpdateReport {
    /// Update succeeds regardless of what it found
    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus::Clean
    }
}

/// Runs manifest operations against directory roots
#[derive(Debug, Clone)]
pub struct Custodian {
    config: ScanConfig,
    prune: EntryFilter,
}

impl Custodian {
    /// Create a custodian with the platform's default bundle policy
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            prune: opaque_bundle,
        }
    }

    /// Replace the directory prune predicate
    pub fn with_entry_filter(mut self, prune: EntryFilter) -> Self {
        self.prune = prune;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Manifest location for `root`
    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        manifest::manifest_path(root, &self.config.manifest_name)
    }

    /// Record the current state of `root` in a new manifest
    ///
    /// Fails without scanning if a manifest already exists.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn create(&self, root: &Path) -> Result<CreateReport, FixityError> {
        ensure_directory(root)?;
        let manifest_path = self.manifest_path(root);
        if manifest_exists(&manifest_path) {
            return Err(FixityError::ManifestAlreadyExists(manifest_path));
        }

        let scan = self.scan(root);
        manifest::write(&manifest_path, &scan.fingerprints)?;
        info!(entry_count = scan.fingerprints.len(), "Manifest created");

        Ok(CreateReport {
            manifest_path,
            entry_count: scan.fingerprints.len(),
            issues: scan.issues,
        })
    }

    /// Compare `root` against its manifest without writing anything
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn verify(&self, root: &Path) -> Result<VerifyReport, FixityError> {
        ensure_directory(root)?;
        let manifest_path = self.manifest_path(root);
        if !manifest_exists(&manifest_path) {
            return Err(FixityError::ManifestNotFound(manifest_path));
        }

        let recorded = manifest::load(&manifest_path);
        let scan = self.scan(root);
        let reconciliation = reconcile(&recorded, &scan.fingerprints);
        info!(
            differences = reconciliation.difference_count(),
            "Verification completed"
        );

        Ok(VerifyReport {
            manifest_path,
            reconciliation,
            issues: scan.issues,
        })
    }

    /// Report differences, then rewrite the manifest from the fresh scan
    ///
    /// An absent manifest counts as an empty one.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn update(&self, root: &Path) -> Result<UpdateReport, FixityError> {
        ensure_directory(root)?;
        let manifest_path = self.manifest_path(root);

        let recorded = manifest::load(&manifest_path);
        let scan = self.scan(root);
        let reconciliation = reconcile(&recorded, &scan.fingerprints);
        manifest::write(&manifest_path, &scan.fingerprints)?;
        info!(
            differences = reconciliation.difference_count(),
            entry_count = scan.fingerprints.len(),
            "Manifest updated"
        );

        Ok(UpdateReport {
            manifest_path,
            reconciliation,
            entry_count: scan.fingerprints.len(),
            issues: scan.issues,
        })
    }

    fn scan(&self, root: &Path) -> Scan {
        FingerprintBuilder::new(root.to_path_buf())
            .with_walker_config(WalkerConfig {
                manifest_name: self.config.manifest_name.clone(),
                prune: self.prune,
            })
            .with_chunk_size(self.config.chunk_size)
            .compute_entries()
    }
}

fn ensure_directory(root: &Path) -> Result<(), FixityError> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        _ => Err(FixityError::NotADirectory(root.to_path_buf())),
    }
}

/// A dangling symlink in the manifest's place still counts as present
fn manifest_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
