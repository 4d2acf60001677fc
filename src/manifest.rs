//! Manifest codec
//!
//! The manifest is a UTF-8 text file at the scan root, one entry per line:
//!
//! ```text
//! <64 hex digest><two spaces><relative path>
//! ```
//!
//! Lines are sorted by relative path and every line ends with `\n`, so the
//! file is a deterministic function of the fingerprint set. Loading is
//! tolerant: blank, malformed and non-UTF-8 lines are skipped one at a time.
//! Writing replaces the file atomically via a temporary sibling
//! (`<name>.tmp.<pid>`) and a rename.

use crate::error::FixityError;
use crate::fingerprint::FingerprintSet;
use crate::tree::{hasher, path};
use crate::types::Hash;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default manifest file name, placed directly under the scanned root
pub const DEFAULT_MANIFEST_NAME: &str = ".fixity";

/// Infix between the manifest name and the writer's pid in temp siblings
const TEMP_INFIX: &str = ".tmp.";

/// Location of the manifest for `root`
pub fn manifest_path(root: &Path, manifest_name: &str) -> PathBuf {
    root.join(manifest_name)
}

/// Whether `file_name` is a temporary sibling of the manifest `manifest_name`
///
/// A writer that dies before its rename leaves one of these behind.
pub fn is_temp_sibling(file_name: &str, manifest_name: &str) -> bool {
    file_name
        .strip_prefix(manifest_name)
        .and_then(|rest| rest.strip_prefix(TEMP_INFIX))
        .is_some_and(|pid| !pid.is_empty() && pid.bytes().all(|b| b.is_ascii_digit()))
}

fn temp_file_name(manifest_name: &str) -> String {
    format!("{}{}{}", manifest_name, TEMP_INFIX, std::process::id())
}

/// Parse one manifest line
///
/// The line is trimmed, then split on the first run of whitespace. Later
/// whitespace belongs to the path.
pub fn parse_line(line: &str) -> Option<(String, Hash)> {
    let line = line.trim();
    let split = line.find(char::is_whitespace)?;
    let (digest, rest) = line.split_at(split);
    let rel = rest.trim_start();

    if !path::is_valid_relative_path(rel) {
        return None;
    }
    let hash = hasher::from_hex(digest)?;
    Some((rel.to_string(), hash))
}

/// Parse manifest text into a fingerprint set, skipping unusable lines
pub fn parse(contents: &str) -> FingerprintSet {
    parse_bytes(contents.as_bytes())
}

/// Parse raw manifest bytes line by line
///
/// A line that is not valid UTF-8 is skipped on its own; the rest of the
/// manifest still loads.
pub fn parse_bytes(contents: &[u8]) -> FingerprintSet {
    let mut set = FingerprintSet::new();
    let entries = contents
        .split(|&b| b == b'\n')
        .filter_map(|line| std::str::from_utf8(line).ok())
        .filter_map(parse_line);
    for (rel, hash) in entries {
        // Last occurrence of a duplicated path wins
        set.insert(rel, hash);
    }
    set
}

/// Render a fingerprint set as manifest text
pub fn render(set: &FingerprintSet) -> String {
    let mut out = String::with_capacity(set.len() * 96);
    for (rel, hash) in set {
        out.push_str(&hasher::to_hex(hash));
        out.push_str("  ");
        out.push_str(rel);
        out.push('\n');
    }
    out
}

/// Load the manifest at `path`
///
/// A missing or unreadable manifest loads as an empty set.
pub fn load(path: &Path) -> FingerprintSet {
    match fs::read(path) {
        Ok(contents) => parse_bytes(&contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => FingerprintSet::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read manifest, treating as empty");
            FingerprintSet::new()
        }
    }
}

/// Write `set` to `path`, replacing any previous manifest atomically
pub fn write(path: &Path, set: &FingerprintSet) -> Result<(), FixityError> {
    write_atomic(path, render(set).as_bytes()).map_err(|source| FixityError::ManifestWriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), entry_count = set.len(), "Wrote manifest");
    Ok(())
}

/// Write to a temporary sibling, flush it to disk, then rename over `path`
///
/// On failure the temporary file is removed and `path` is left as it was.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "manifest path has no file name")
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let temp_path = dir.join(temp_file_name(&file_name.to_string_lossy()));

    let result = (|| -> io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp_path, path)
    })();

    if let Err(e) = result {
        // Clean up temp file on error
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    sync_dir(&dir);
    Ok(())
}

/// Persist the rename itself. Not every platform can fsync a directory.
fn sync_dir(dir: &Path) {
    #[cfg(unix)]
    if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
        debug!(dir = %dir.display(), error = %e, "Directory fsync failed");
    }
    #[cfg(not(unix))]
    let _ = dir;
}
