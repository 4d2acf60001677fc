//! Relative-path derivation and validation
//!
//! Relative paths are the identity of a tracked file: root-relative, joined
//! with `/`, and representable on a single manifest line.

use std::path::{Component, Path};
use thiserror::Error;

/// Why a filesystem path cannot be recorded in a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathRejection {
    #[error("path is outside the scan root")]
    OutsideRoot,
    #[error("path is not valid UTF-8")]
    NotUtf8,
    #[error("path contains a line break")]
    LineBreak,
    #[error("path has leading or trailing whitespace")]
    EdgeWhitespace,
}

/// Derive the manifest key for `path` relative to `root`
///
/// `path` must be `root` joined with zero or more components. The root itself
/// maps to `"."`.
pub fn relative_path(root: &Path, path: &Path) -> Result<String, PathRejection> {
    let rel = path
        .strip_prefix(root)
        .map_err(|_| PathRejection::OutsideRoot)?;

    let mut segments = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(name) => {
                segments.push(name.to_str().ok_or(PathRejection::NotUtf8)?);
            }
            Component::CurDir => {}
            _ => return Err(PathRejection::OutsideRoot),
        }
    }

    if segments.is_empty() {
        return Ok(".".to_string());
    }

    let joined = segments.join("/");
    if joined.contains(['\n', '\r']) {
        return Err(PathRejection::LineBreak);
    }
    if joined.trim() != joined {
        return Err(PathRejection::EdgeWhitespace);
    }
    Ok(joined)
}

/// Check that a manifest key is a well-formed relative path
///
/// Non-empty, not absolute, no empty, `.` or `..` segments, no line breaks.
pub fn is_valid_relative_path(rel: &str) -> bool {
    if rel.is_empty() || rel.starts_with('/') || rel.contains(['\n', '\r']) {
        return false;
    }
    rel.split('/')
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}
