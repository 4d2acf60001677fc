//! Fixity CLI Binary
//!
//! Command-line interface for the fixity manifest reconciliation engine.

use clap::error::ErrorKind;
use clap::Parser;
use fixity::cli::{map_error, Cli, RunContext};
use fixity::config::{ConfigLoader, FixityConfig};
use fixity::custodian::ExitStatus;
use fixity::logging::{init_logging, LoggingConfig};
use std::io::IsTerminal;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are informational; every other parse failure is fatal.
            let status = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitStatus::Clean,
                _ => ExitStatus::Fatal,
            };
            let _ = e.print();
            process::exit(status.code());
        }
    };

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(ExitStatus::Fatal.code());
        }
    };

    // Initialize logging early
    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("{}", map_error(&e));
        process::exit(ExitStatus::Fatal.code());
    }

    info!("Fixity CLI starting");

    let context = RunContext::new(config.scan, std::io::stdout().is_terminal());

    match context.execute(&cli.command) {
        Ok(output) => {
            for line in &output.diagnostics {
                eprintln!("{}", line);
            }
            println!("{}", output.stdout);
            process::exit(output.status.code());
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(ExitStatus::Fatal.code());
        }
    }
}

fn load_config(cli: &Cli) -> Result<FixityConfig, fixity::error::FixityError> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Build logging configuration from CLI args and the loaded config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &FixityConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.verbose {
        logging.enabled = true;
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }

    logging
}
