//! CLI route: single route table and run context. Dispatches to the custodian and presentation.

use crate::cli::help::command_name;
use crate::cli::output::format_issue;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_create_text, format_update_json, format_update_text, format_verify_json,
    format_verify_text, status_label,
};
use crate::config::ScanConfig;
use crate::custodian::{Custodian, ExitStatus};
use crate::error::{FixityError, ScanIssue};
use std::time::Instant;
use tracing::{info, info_span};

/// What a command prints and how the process should exit
#[derive(Debug)]
pub struct CommandOutput {
    /// Report for stdout
    pub stdout: String,
    /// Per-item diagnostics for stderr
    pub diagnostics: Vec<String>,
    pub status: ExitStatus,
}

/// Runtime context for CLI execution: the configured custodian and terminal capabilities.
pub struct RunContext {
    custodian: Custodian,
    color: bool,
}

impl RunContext {
    /// Create run context from resolved scan configuration.
    pub fn new(scan: ScanConfig, color: bool) -> Self {
        Self {
            custodian: Custodian::new(scan),
            color,
        }
    }

    /// Reference to the underlying custodian.
    pub fn custodian(&self) -> &Custodian {
        &self.custodian
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, FixityError> {
        let span = info_span!("command", name = command_name(command));
        let _guard = span.enter();
        let started = Instant::now();

        let output = self.execute_inner(command)?;
        info!(
            status = status_label(output.status),
            duration_ms = started.elapsed().as_millis(),
            "Command finished"
        );
        Ok(output)
    }

    fn execute_inner(&self, command: &Commands) -> Result<CommandOutput, FixityError> {
        match command {
            Commands::Create { directory } => {
                let report = self.custodian.create(directory)?;
                Ok(CommandOutput {
                    stdout: format_create_text(&report),
                    diagnostics: diagnostics(&report.issues),
                    status: ExitStatus::Clean,
                })
            }
            Commands::Verify { directory, format } => {
                let report = self.custodian.verify(directory)?;
                let stdout = if format == "json" {
                    format_verify_json(&report)?
                } else {
                    format_verify_text(&report, self.color)
                };
                Ok(CommandOutput {
                    stdout,
                    diagnostics: diagnostics(&report.issues),
                    status: report.exit_status(),
                })
            }
            Commands::Update { directory, format } => {
                let report = self.custodian.update(directory)?;
                let stdout = if format == "json" {
                    format_update_json(&report)?
                } else {
                    format_update_text(&report, self.color)
                };
                Ok(CommandOutput {
                    stdout,
                    diagnostics: diagnostics(&report.issues),
                    status: report.exit_status(),
                })
            }
        }
    }
}

fn diagnostics(issues: &[ScanIssue]) -> Vec<String> {
    issues.iter().map(format_issue).collect()
}
