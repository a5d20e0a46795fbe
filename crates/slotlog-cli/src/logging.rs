//! Diagnostic logging to stderr.
//!
//! Stdout carries command output only, so logs never mix with JSON or
//! clipboard text.

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Level used when neither `--log` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::WARN;

/// Filter directives enabling `level` for this binary and the core library.
pub fn crate_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    format!(
        "{}={level},slotlog_core={level}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
    )
}

/// Install the global subscriber. `--log` wins over `RUST_LOG`.
pub fn enable_logging(log_level: Option<LevelFilter>) -> Result<()> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(crate_directives(level))?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(crate_directives(DEFAULT_LOG_LEVEL)))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
