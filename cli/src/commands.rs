//! Subcommand handlers.

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use jsonschema_guard_core::{convert_with, ConversionNote, ConvertOptions, Validator};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{ConvertArgs, ValidateArgs};

/// Exit code for an instance that fails validation.
pub const EXIT_INVALID: u8 = 1;

#[derive(Serialize)]
struct ConvertReport<'a> {
    validator: &'a Validator,
    notes: &'a [ConversionNote],
}

pub fn handle_convert(args: ConvertArgs, options: &ConvertOptions) -> Result<ExitCode> {
    let schema = read_json(&args.schema)?;
    let result = convert_with(&schema, options);
    tracing::info!(
        schema = %args.schema.display(),
        notes = result.notes.len(),
        "schema converted"
    );

    let rendered = if args.notes {
        render(
            &ConvertReport {
                validator: &result.validator,
                notes: &result.notes,
            },
            args.compact,
        )?
    } else {
        render(&result.validator, args.compact)?
    };
    println!("{rendered}");
    Ok(ExitCode::SUCCESS)
}

pub fn handle_validate(args: ValidateArgs, options: &ConvertOptions) -> Result<ExitCode> {
    if args.schema == args.instance && is_stdin(&args.schema) {
        anyhow::bail!("schema and instance cannot both be read from stdin");
    }

    let schema = read_json(&args.schema)?;
    let instance = read_json(&args.instance)?;
    let validator = convert_with(&schema, options).validator;

    match validator.validate(&instance) {
        Ok(()) => {
            tracing::info!(instance = %args.instance.display(), "instance is valid");
            if args.json {
                println!("[]");
            } else {
                println!("valid");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::info!(
                instance = %args.instance.display(),
                issues = err.issues.len(),
                "instance is invalid"
            );
            if args.json {
                println!("{}", render(&err.issues, false)?);
            } else {
                for issue in &err.issues {
                    println!("{issue}");
                }
            }
            Ok(ExitCode::from(EXIT_INVALID))
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read and parse a JSON document from a file, or stdin for `-`.
fn read_json(path: &Path) -> Result<Value> {
    let text = if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    tracing::debug!(path = %path.display(), bytes = text.len(), "read input");
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON from {}", path.display()))
}

fn render<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    text.context("failed to serialize output")
}
