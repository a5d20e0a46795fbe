//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying slots, entries
//! and summaries in JSON or as text.

mod json;
mod text;

pub use json::{calendar_json, comparison_json, day_json, entry_json, settings_json};
pub use text::{
    entry_receipt, print_calendar, print_comparison, print_day, print_settings, print_summary,
};
