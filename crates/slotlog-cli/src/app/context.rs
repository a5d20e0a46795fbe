//! Application context for the Slotlog CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use once_cell::unsync::OnceCell;
use tracing::debug;

use slotlog_core::{FileStore, Ledger};

use crate::cli::Cli;
use crate::config::SlotlogConfig;
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{load_config, missing_data_message, resolve_data_dir};

/// Application context that bundles CLI args with the config file.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<SlotlogConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file contents, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<Option<&SlotlogConfig>> {
        Ok(self.config.get_or_try_init(load_config)?.as_ref())
    }

    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        resolve_data_dir(self.cli, self.config()?)
    }

    /// Open the ledger in the resolved data directory.
    ///
    /// The directory is created by `slotlog init`; every other command
    /// requires it to exist.
    pub fn open_ledger(&self) -> anyhow::Result<Ledger<FileStore>> {
        let dir = self.data_dir()?;
        if !dir.is_dir() {
            return Err(CliError::not_found(
                missing_data_message(&dir),
                "Hint: Run `slotlog init` to create it.",
            )
            .into());
        }
        debug!(path = %dir.display(), "opening ledger");
        Ok(Ledger::open(FileStore::open(dir)?))
    }

    /// UI context for a command, honoring the global color and ASCII flags.
    pub fn ui_context(&self, json: bool) -> UiContext {
        UiContext::from_env(json, self.cli.no_color, self.cli.ascii)
    }

    /// Suggestion limit from the config file, or the built-in default.
    pub fn suggest_limit(&self) -> usize {
        match self.config() {
            Ok(Some(config)) => config.suggest.limit,
            _ => slotlog_core::suggest::DEFAULT_SUGGESTION_LIMIT,
        }
    }

    pub fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
