//! jsonschema-guard CLI
//!
//! `convert` prints the validator tree produced from a JSON Schema;
//! `validate` checks an instance against it.

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use jsonschema_guard_core::ConvertOptions;

use cli::{Cli, Commands};

/// Exit code for I/O, parse and usage failures.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbosity_level()) {
        eprintln!("{e}");
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let options = ConvertOptions {
        max_depth: cli.max_depth,
        ..ConvertOptions::default()
    };
    tracing::debug!(?options, command = ?cli.command, "starting");

    match cli.command {
        Commands::Convert(args) => commands::handle_convert(args, &options),
        Commands::Validate(args) => commands::handle_validate(args, &options),
    }
}
