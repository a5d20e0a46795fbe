//! How a command's output should look on this stdout.
//!
//! Every read command renders the same data three ways: a bordered slot
//! table on a terminal, one tab-separated row per slot for pipes, and the
//! `--json` document. `UiContext` picks one once per command.

use std::io::IsTerminal;

use crate::constants::TABLE_DESCRIPTION_MAX;

/// Columns a day table spends on everything but the description:
/// time, category, short id and borders.
const DAY_TABLE_FIXED_COLUMNS: usize = 40;

/// Narrowest description column before tables stop shrinking it.
const MIN_DESCRIPTION_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `--json` documents (day slots, stats buckets, receipts)
    Json,
    /// Tab-separated rows without headers, one per slot or bucket
    #[default]
    Plain,
    /// Tables, share bars and colored categories on a terminal
    Pretty,
}

impl OutputMode {
    /// `--json` always wins. Otherwise a terminal gets tables unless
    /// `TERM=dumb`, and anything else gets plain rows.
    pub fn resolve(json_flag: bool, is_tty: bool, term_is_dumb: bool) -> Self {
        match (json_flag, is_tty && !term_is_dumb) {
            (true, _) => Self::Json,
            (false, true) => Self::Pretty,
            (false, false) => Self::Plain,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Rendering decisions for one command invocation.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Category swatches and badges in color
    pub color: bool,
    /// Box-drawing borders, share-bar blocks and the filled calendar dot
    pub unicode: bool,
    /// Terminal columns
    pub width: usize,
    pub mode: OutputMode,
}

impl UiContext {
    /// Read stdout, `TERM`, `NO_COLOR` and the `--json`, `--no-color` and
    /// `--ascii` flags.
    pub fn from_env(json_flag: bool, no_color_flag: bool, ascii_flag: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();

        Self {
            color: is_tty && !no_color_flag && !no_color_env && !term_is_dumb,
            unicode: !ascii_flag,
            width: terminal_width().unwrap_or(80),
            mode: OutputMode::resolve(json_flag, is_tty, term_is_dumb),
        }
    }

    /// Character budget for a description cell. Plain rows are never cut,
    /// so scripts always see the full text.
    pub fn description_width(&self) -> Option<usize> {
        if !self.mode.is_pretty() {
            return None;
        }
        let available = self.width.saturating_sub(DAY_TABLE_FIXED_COLUMNS);
        Some(available.clamp(MIN_DESCRIPTION_WIDTH, TABLE_DESCRIPTION_MAX))
    }
}

/// `COLUMNS`, then the terminal's own size.
fn terminal_width() -> Option<usize> {
    if let Some(width) = std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.parse::<usize>().ok())
        .filter(|width| *width > 0)
    {
        return Some(width);
    }

    #[cfg(unix)]
    {
        use std::mem::MaybeUninit;

        let mut winsize = MaybeUninit::<libc::winsize>::uninit();
        // SAFETY: TIOCGWINSZ only writes into the provided winsize
        let result =
            unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, winsize.as_mut_ptr()) };
        if result == 0 {
            // SAFETY: ioctl succeeded, so winsize was initialized
            let ws = unsafe { winsize.assume_init() };
            if ws.ws_col > 0 {
                return Some(ws.ws_col as usize);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pretty(width: usize) -> UiContext {
        UiContext {
            color: false,
            unicode: true,
            width,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_mode_routing() {
        assert_eq!(OutputMode::resolve(true, true, true), OutputMode::Json);
        assert_eq!(OutputMode::resolve(false, true, true), OutputMode::Plain);
        assert_eq!(OutputMode::resolve(false, true, false), OutputMode::Pretty);
        assert_eq!(OutputMode::resolve(false, false, false), OutputMode::Plain);
    }

    #[test]
    fn test_flags_shape_context() {
        assert_eq!(UiContext::from_env(true, false, false).mode, OutputMode::Json);
        assert!(!UiContext::from_env(false, false, true).unicode);
        assert!(!UiContext::from_env(false, true, false).color);
        assert!(UiContext::from_env(false, false, false).width > 0);
    }

    #[test]
    fn test_description_width_follows_terminal() {
        assert_eq!(pretty(80).description_width(), Some(40));
        assert_eq!(pretty(200).description_width(), Some(TABLE_DESCRIPTION_MAX));
        assert_eq!(pretty(30).description_width(), Some(MIN_DESCRIPTION_WIDTH));

        let plain = UiContext {
            mode: OutputMode::Plain,
            ..pretty(30)
        };
        assert_eq!(plain.description_width(), None);
    }
}
