//! CLI parse: clap types for fixity. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fixity CLI - detect silent corruption with content-hash manifests
#[derive(Debug, Parser)]
#[command(name = "fixity", version)]
#[command(about = "Detect silent corruption and unintended modification in directory trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable logging to stderr (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fingerprint every file and write a new manifest (fails if one exists)
    Create {
        /// Directory to fingerprint
        directory: PathBuf,
    },
    /// Compare the directory against its manifest without writing
    Verify {
        /// Directory to verify
        directory: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Report differences, then rewrite the manifest from a fresh scan
    Update {
        /// Directory to update
        directory: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

impl Commands {
    /// Directory the command operates on
    pub fn directory(&self) -> &PathBuf {
        match self {
            Commands::Create { directory }
            | Commands::Verify { directory, .. }
            | Commands::Update { directory, .. } => directory,
        }
    }
}
