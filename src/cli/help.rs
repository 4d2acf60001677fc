//! CLI command-name contract for logging spans.

use crate::cli::parse::Commands;

/// Command name string for log records (e.g. "create", "verify").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Create { .. } => "create",
        Commands::Verify { .. } => "verify",
        Commands::Update { .. } => "update",
    }
}
