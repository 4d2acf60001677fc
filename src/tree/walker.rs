//! Filesystem walker for enumerating tracked files
//!
//! Yields every regular file under the root. Symlinks are never followed and
//! never yielded; FIFOs, sockets and device nodes are skipped. The manifest and
//! any temporary siblings left by an interrupted write are not tracked. Errors on
//! individual entries are collected and traversal continues with siblings.

use crate::error::ScanIssue;
use crate::manifest::{self, DEFAULT_MANIFEST_NAME};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Predicate over directory entries. Returning true prunes the directory:
/// its contents are not enumerated.
pub type EntryFilter = fn(&DirEntry) -> bool;

/// Package-style directory extensions treated as opaque on macOS
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
const BUNDLE_EXTENSIONS: &[&str] = &[
    "app",
    "bundle",
    "framework",
    "kext",
    "photoslibrary",
    "pkg",
    "plugin",
    "xcarchive",
];

/// Default prune predicate: skip opaque bundles the host treats as packages
#[cfg(target_os = "macos")]
pub fn opaque_bundle(entry: &DirEntry) -> bool {
    entry
        .path()
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| {
            BUNDLE_EXTENSIONS
                .iter()
                .any(|bundle| ext.eq_ignore_ascii_case(bundle))
        })
        .unwrap_or(false)
}

/// Default prune predicate: no directory is a package on this platform
#[cfg(not(target_os = "macos"))]
pub fn opaque_bundle(_entry: &DirEntry) -> bool {
    false
}

/// Prune predicate that descends into everything
pub fn descend_all(_entry: &DirEntry) -> bool {
    false
}

/// Filesystem walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// File name excluded at every depth (the manifest itself)
    pub manifest_name: String,
    /// Directories for which this returns true are not descended into
    pub prune: EntryFilter,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            prune: opaque_bundle,
        }
    }
}

/// Result of a walk: regular files found plus per-entry failures
#[derive(Debug, Default)]
pub struct Walk {
    pub files: Vec<PathBuf>,
    pub issues: Vec<ScanIssue>,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the filesystem and collect regular files
    ///
    /// Enumeration order is whatever the filesystem returns; callers must not
    /// depend on it.
    pub fn walk(&self) -> Walk {
        let mut walk = Walk::default();
        let prune = self.config.prune;
        let manifest_name = OsStr::new(&self.config.manifest_name);

        let entries = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !(entry.depth() > 0 && entry.file_type().is_dir() && prune(entry)));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    warn!(path = %path.display(), error = %e, "Failed to read directory entry");
                    walk.issues.push(ScanIssue::Walk {
                        path,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                debug!(path = %entry.path().display(), "Skipping non-regular entry");
                continue;
            }
            if entry.file_name() == manifest_name {
                trace!(path = %entry.path().display(), "Skipping manifest file");
                continue;
            }
            if entry
                .file_name()
                .to_str()
                .is_some_and(|name| manifest::is_temp_sibling(name, &self.config.manifest_name))
            {
                debug!(path = %entry.path().display(), "Skipping leftover manifest temp file");
                continue;
            }

            walk.files.push(entry.into_path());
        }

        walk
    }
}
