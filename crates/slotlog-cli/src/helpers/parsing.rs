//! Parsing helpers for dates, slot times, months and entry IDs.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike};

use slotlog_core::grid::SLOT_MINUTES;
use slotlog_core::time::resolve_local;
use slotlog_core::{EntryId, EntryStore, KeyValueStore};

use crate::errors::CliError;

/// Parse a date argument: `today`, `yesterday` or `YYYY-MM-DD`.
pub fn parse_date(value: Option<&str>, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let Some(value) = value else {
        return Ok(today);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| {
            anyhow::Error::from(CliError::invalid_input_with_hint(
                format!("Invalid date: {}", value),
                "Hint: Use YYYY-MM-DD, `today` or `yesterday`.",
            ))
        }),
    }
}

/// Parse an `HH:MM` slot start. Minutes must fall on a quarter hour.
pub fn parse_slot_time(value: &str) -> anyhow::Result<NaiveTime> {
    let invalid = || {
        CliError::invalid_input_with_hint(
            format!("Invalid slot time: {}", value),
            "Hint: Slots start on the quarter hour, e.g. 09:00, 09:15, 09:30, 09:45.",
        )
    };
    let time = NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| invalid())?;
    if i64::from(time.minute()) % SLOT_MINUTES != 0 {
        return Err(invalid().into());
    }
    Ok(time)
}

/// Epoch milliseconds of `time` on `date` in `tz`.
pub fn slot_timestamp<Tz: TimeZone>(date: NaiveDate, time: NaiveTime, tz: &Tz) -> i64 {
    resolve_local(tz, date.and_time(time)).timestamp_millis()
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Parse a `YYYY-MM` month.
pub fn parse_month(value: &str) -> anyhow::Result<Month> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map(Month::of)
        .map_err(|_| {
            anyhow::Error::from(CliError::invalid_input(format!(
                "Invalid month (expected YYYY-MM): {}",
                value
            )))
        })
}

/// Resolve a full entry ID or a unique ID prefix to an entry ID.
///
/// IDs are opaque strings: an exact match wins, then a case-insensitive
/// prefix match that must be unique.
pub fn resolve_entry_id<S: KeyValueStore>(
    store: &EntryStore<S>,
    value: &str,
) -> anyhow::Result<EntryId> {
    let needle = value.trim();
    if needle.is_empty() {
        return Err(CliError::invalid_input("Entry ID cannot be empty").into());
    }
    if let Some(entry) = store.get(needle) {
        return Ok(entry.id.clone());
    }

    let needle = needle.to_lowercase();
    let matches: Vec<&EntryId> = store
        .entries()
        .map(|entry| &entry.id)
        .filter(|id| id.to_lowercase().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [id] => Ok((*id).clone()),
        [] => Err(CliError::not_found(
            format!("Entry not found: {}", value),
            "Hint: Run `slotlog day --json` to see entry IDs.",
        )
        .into()),
        _ => Err(CliError::invalid_input_with_hint(
            format!("Entry ID prefix is ambiguous: {}", value),
            "Hint: Use more characters of the ID.",
        )
        .into()),
    }
}
