//! Logging setup for the CLI.
//!
//! Logs go to stderr so stdout stays machine-readable.

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map a verbosity level to a filter: 0 error, 1 warn, 2 info, 3 debug, 4+ trace.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Directives from `var` (e.g. `jsonschema_guard_core=debug,warn`) win over
/// the verbosity flags when set and valid.
fn filter_from_env(var: &str, verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(level_for(verbosity).to_string()))
}

/// Install the global subscriber.
pub fn init_logging(verbosity: u8) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_from_env(EnvFilter::DEFAULT_ENV, verbosity))
        .with_writer(std::io::stderr)
        .with_target(verbosity > 3)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
