//! CLI presentation: text and JSON rendering of operation reports.

use crate::custodian::{CreateReport, ExitStatus, UpdateReport, VerifyReport};
use crate::error::{FixityError, ScanIssue};
use crate::reconcile::{Counts, Reconciliation};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write;

const CLEAN_LINE: &str = "Verification: CLEAN (no differences).";
const DIRTY_LINE: &str = "Verification: differences detected.";

/// `Created manifest <path> with N entries.`
pub fn format_create_text(report: &CreateReport) -> String {
    format!(
        "Created manifest {} with {} entries.",
        report.manifest_path.display(),
        report.entry_count
    )
}

/// Per-path lines, count summary and terminal status line
pub fn format_reconciliation_text(reconciliation: &Reconciliation, color: bool) -> String {
    let mut out = String::new();

    push_paths(&mut out, "CHANGED:", &reconciliation.changed, color, |s| {
        s.yellow().to_string()
    });
    push_paths(&mut out, "MISSING:", &reconciliation.missing, color, |s| {
        s.red().to_string()
    });
    push_paths(&mut out, "NEW:", &reconciliation.new, color, |s| {
        s.cyan().to_string()
    });

    let counts = reconciliation.counts();
    let _ = writeln!(
        out,
        "OK: {}  CHANGED: {}  MISSING: {}  NEW: {}",
        counts.ok, counts.changed, counts.missing, counts.new
    );

    if reconciliation.is_clean() {
        out.push_str(&paint(CLEAN_LINE, color, |s| s.green().to_string()));
    } else {
        out.push_str(&paint(DIRTY_LINE, color, |s| s.bold().to_string()));
    }
    out
}

pub fn format_verify_text(report: &VerifyReport, color: bool) -> String {
    format_reconciliation_text(&report.reconciliation, color)
}

pub fn format_update_text(report: &UpdateReport, color: bool) -> String {
    format!(
        "{}\nManifest updated: {} ({} entries).",
        format_reconciliation_text(&report.reconciliation, color),
        report.manifest_path.display(),
        report.entry_count
    )
}

#[derive(Serialize)]
struct ReportJson<'a> {
    command: &'static str,
    manifest: String,
    status: &'static str,
    counts: Counts,
    ok: &'a BTreeSet<String>,
    changed: &'a BTreeSet<String>,
    missing: &'a BTreeSet<String>,
    new: &'a BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<usize>,
    issues: Vec<String>,
}

impl<'a> ReportJson<'a> {
    fn new(
        command: &'static str,
        manifest: &std::path::Path,
        reconciliation: &'a Reconciliation,
        issues: &[ScanIssue],
    ) -> Self {
        Self {
            command,
            manifest: manifest.display().to_string(),
            status: if reconciliation.is_clean() {
                "clean"
            } else {
                "differences"
            },
            counts: reconciliation.counts(),
            ok: &reconciliation.ok,
            changed: &reconciliation.changed,
            missing: &reconciliation.missing,
            new: &reconciliation.new,
            entries: None,
            issues: issues.iter().map(ToString::to_string).collect(),
        }
    }
}

pub fn format_verify_json(report: &VerifyReport) -> Result<String, FixityError> {
    let doc = ReportJson::new(
        "verify",
        &report.manifest_path,
        &report.reconciliation,
        &report.issues,
    );
    to_json(&doc)
}

pub fn format_update_json(report: &UpdateReport) -> Result<String, FixityError> {
    let mut doc = ReportJson::new(
        "update",
        &report.manifest_path,
        &report.reconciliation,
        &report.issues,
    );
    doc.entries = Some(report.entry_count);
    to_json(&doc)
}

/// Label used in logs for an exit status
pub fn status_label(status: ExitStatus) -> &'static str {
    match status {
        ExitStatus::Clean => "clean",
        ExitStatus::Fatal => "fatal",
        ExitStatus::Differences => "differences",
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, FixityError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn push_paths(
    out: &mut String,
    label: &str,
    paths: &BTreeSet<String>,
    color: bool,
    style: fn(&str) -> String,
) {
    let label = paint(label, color, style);
    for path in paths {
        let _ = writeln!(out, "{} {}", label, path);
    }
}

fn paint(text: &str, color: bool, style: fn(&str) -> String) -> String {
    if color {
        style(text)
    } else {
        text.to_string()
    }
}
