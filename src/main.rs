//! Entry point: wires CLI → dispatcher → stdout and the exit code.
//!
//! This is the single place where failures turn into process exit codes.
//! Results and diagnostics both go to standard output; logs go to
//! standard error.

mod cli;
mod css;
mod dispatch;
mod error;
mod inliner;
mod input;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "CSSINK_LOG";

fn main() -> color_eyre::Result<ExitCode> {
    // Install color_eyre error/panic hooks for unexpected failures.
    color_eyre::install()?;

    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));
    setup_logging();

    let mut stdout = io::stdout().lock();

    if cli.version {
        writeln!(stdout, "{}", env!("CARGO_PKG_VERSION"))?;
        return Ok(ExitCode::SUCCESS);
    }

    match dispatch::execute(&cli, io::stdin().lock()) {
        Ok(output) => {
            writeln!(stdout, "{output}")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(error = ?err, "action failed");
            writeln!(stdout, "{err}")?;
            if err.shows_usage() {
                let program = cli::program_name(std::env::args_os(), Cli::command().get_name());
                write!(stdout, "{}", cli::usage(&program))?;
            }
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}

/// Logs to stderr, filtered by `CSSINK_LOG` (default: warnings only).
fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}
