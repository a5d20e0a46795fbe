//! Path resolution for the config file and data directory.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_data_dir, read_config, SlotlogConfig};

/// Resolve the config file path, checking SLOTLOG_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("SLOTLOG_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file if one exists.
pub(crate) fn load_config() -> anyhow::Result<Option<SlotlogConfig>> {
    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        return Ok(None);
    }
    read_config(&config_path).map(Some)
}

/// Resolve the data directory.
///
/// Order: `--data-dir` / `SLOTLOG_DIR`, then the config file, then the XDG
/// data directory.
pub fn resolve_data_dir(cli: &Cli, config: Option<&SlotlogConfig>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = cli.data_dir.as_deref() {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.storage.path));
    }
    default_data_dir()
}

/// Error message when the data directory is missing.
pub fn missing_data_message(path: &Path) -> String {
    format!("No slotlog data found at {}", path.display())
}
