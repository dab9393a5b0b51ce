//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jsonschema_guard_core::config::DEFAULT_MAX_DEPTH;

/// Convert structured-output JSON Schemas into validators and check
/// instances against them.
#[derive(Parser, Debug)]
#[command(
    name = "jsonschema-guard",
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Schema nodes nested deeper than this accept any value
    #[arg(
        long,
        global = true,
        env = "JSONSCHEMA_GUARD_MAX_DEPTH",
        default_value_t = DEFAULT_MAX_DEPTH
    )]
    pub max_depth: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a JSON Schema and print the validator tree as JSON
    Convert(ConvertArgs),

    /// Validate a JSON instance against a JSON Schema
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Schema file, or `-` for stdin
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Print on a single line
    #[arg(long)]
    pub compact: bool,

    /// Include conversion notes alongside the validator
    #[arg(long)]
    pub notes: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file, or `-` for stdin
    #[arg(short, long, value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Instance file, or `-` for stdin
    #[arg(value_name = "INSTANCE")]
    pub instance: PathBuf,

    /// Print issues as a JSON array
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Log level implied by `-v`/`-q`.
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}
