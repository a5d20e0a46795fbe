//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Reading line-oriented input and confirming destructive actions (`input`)
//! - Date, slot time, month and entry ID parsing (`parsing`)

mod input;
mod parsing;

pub use input::{confirm_destructive, read_text_input};
pub use parsing::{parse_date, parse_month, parse_slot_time, resolve_entry_id, slot_timestamp};
