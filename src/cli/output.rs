//! CLI output: error mapping from domain errors to the stable stderr surface.

use crate::error::{FixityError, ScanIssue};

/// Map a fatal error to its stderr line.
pub fn map_error(e: &FixityError) -> String {
    format!("ERROR: {}", e)
}

/// Map a per-item scan issue to its stderr line.
pub fn format_issue(issue: &ScanIssue) -> String {
    format!("ERROR: {}", issue)
}
