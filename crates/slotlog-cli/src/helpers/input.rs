//! Input handling helpers for line-oriented text and confirmations.

use std::io::{self, IsTerminal, Read};

use dialoguer::Confirm;

use crate::errors::CliError;

/// Read text from `file`, or from stdin when no file is given.
pub fn read_text_input(file: Option<&str>) -> anyhow::Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e));
    }
    if io::stdin().is_terminal() {
        eprintln!("Reading lines from stdin; finish with Ctrl-D.");
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    Ok(buffer)
}

/// Ask before a destructive action.
///
/// `--yes` skips the prompt. Without a terminal there is nobody to ask, so
/// the action is refused unless `--yes` was passed.
pub fn confirm_destructive(prompt: &str, yes: bool, quiet: bool) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    if !io::stdin().is_terminal() || quiet {
        return Err(CliError::invalid_input_with_hint(
            "Refusing to continue without confirmation",
            "Hint: Pass --yes to confirm non-interactively.",
        )
        .into());
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}
