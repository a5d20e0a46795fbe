//! JSON output formatting.
//!
//! Keys are snake_case. Slot times are rendered in the local zone next to
//! the raw epoch milliseconds.

use chrono::{NaiveDate, TimeZone};
use serde_json::{json, Value};

use slotlog_core::stats::Comparison;
use slotlog_core::{AppSettings, DailyNote, DaySlot, LogEntry};

use crate::ui::format_slot_time;

/// Convert an entry to JSON for output.
pub fn entry_json<Tz: TimeZone>(entry: &LogEntry, tz: &Tz) -> Value {
    json!({
        "id": entry.id,
        "timestamp": entry.timestamp,
        "time": format_slot_time(entry.timestamp, tz),
        "description": entry.description,
        "category": entry.category,
    })
}

/// One day: every grid slot with its entry (or null) and the day's note.
pub fn day_json<Tz: TimeZone>(
    date: NaiveDate,
    slots: &[DaySlot<'_>],
    note: Option<&DailyNote>,
    tz: &Tz,
) -> Value {
    let slots: Vec<Value> = slots
        .iter()
        .map(|slot| {
            json!({
                "time": format_slot_time(slot.timestamp, tz),
                "timestamp": slot.timestamp,
                "entry": slot.entry.map(|entry| entry_json(entry, tz)),
            })
        })
        .collect();
    json!({
        "date": date.to_string(),
        "slots": slots,
        "note": note.map(|n| n.text.as_str()),
    })
}

/// Both summaries plus the per-category minute difference.
pub fn comparison_json(comparison: &Comparison) -> Value {
    let deltas: Vec<Value> = super::text::comparison_rows(comparison)
        .into_iter()
        .map(|(name, first, second)| {
            json!({
                "name": name,
                "first_minutes": first,
                "second_minutes": second,
                "delta_minutes": i64::from(second) - i64::from(first),
            })
        })
        .collect();
    json!({
        "first": comparison.first,
        "second": comparison.second,
        "categories": deltas,
    })
}

pub fn calendar_json(dates: &[NaiveDate]) -> Value {
    json!({
        "dates": dates.iter().map(NaiveDate::to_string).collect::<Vec<_>>(),
    })
}

pub fn settings_json(settings: &AppSettings, tags: &[String]) -> Value {
    json!({
        "start_hour": settings.start_hour,
        "end_hour": settings.end_hour,
        "categories": settings.resolved_categories(),
        "recent_tags": tags,
    })
}
