//! Fingerprint set builder: walker + hasher
//!
//! Owns relative-path derivation. A file that cannot be hashed or named is left
//! out of the set and reported as an issue; the scan always runs to completion.

use crate::error::ScanIssue;
use crate::fingerprint::FingerprintSet;
use crate::tree::hasher::{self, DEFAULT_CHUNK_SIZE};
use crate::tree::path;
use crate::tree::walker::{Walk, Walker, WalkerConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument, trace, warn};

/// Outcome of scanning a root
#[derive(Debug, Default)]
pub struct Scan {
    pub fingerprints: FingerprintSet,
    pub issues: Vec<ScanIssue>,
}

/// Builds the current fingerprint set of a directory tree
pub struct FingerprintBuilder {
    root: PathBuf,
    walker_config: WalkerConfig,
    chunk_size: usize,
}

impl FingerprintBuilder {
    /// Create a new builder for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            walker_config: WalkerConfig::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set walker config (manifest name, prune predicate)
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the read chunk size used while hashing
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Walk the root and hash every regular file
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn compute_entries(&self) -> Scan {
        let start = Instant::now();
        info!("Starting scan");

        let walk = Walker::with_config(self.root.clone(), self.walker_config.clone()).walk();
        let scan = self.fingerprint_walk(walk);

        info!(
            entry_count = scan.fingerprints.len(),
            issue_count = scan.issues.len(),
            duration_ms = start.elapsed().as_millis(),
            "Scan completed"
        );

        scan
    }

    /// Hash the files of a finished walk
    ///
    /// Files can change between the walk and the read; one that fails is
    /// reported and the rest are still hashed.
    pub fn fingerprint_walk(&self, walk: Walk) -> Scan {
        let mut scan = Scan {
            fingerprints: FingerprintSet::new(),
            issues: walk.issues,
        };

        for file_path in walk.files {
            let rel = match path::relative_path(&self.root, &file_path) {
                Ok(rel) => rel,
                Err(reason) => {
                    warn!(path = %file_path.display(), %reason, "Path cannot be recorded");
                    scan.issues.push(ScanIssue::UnrepresentablePath {
                        path: file_path,
                        reason,
                    });
                    continue;
                }
            };

            match hasher::hash_file(&file_path, self.chunk_size) {
                Ok(hash) => {
                    trace!(path = %rel, hash = %hasher::to_hex(&hash), "Hashed file");
                    scan.fingerprints.insert(rel, hash);
                }
                Err(issue) => {
                    warn!("{}", issue);
                    scan.issues.push(issue);
                }
            }
        }

        scan
    }
}
