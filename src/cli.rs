//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; the route table dispatches to the custodian.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::{format_issue, map_error};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_create_text, format_reconciliation_text, format_update_json, format_update_text,
    format_verify_json, format_verify_text,
};
pub use route::{CommandOutput, RunContext};
