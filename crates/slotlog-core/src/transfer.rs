//! Plain-text import and clipboard export.
//!
//! Both directions use one line per slot: `HH:mm <description>`. On import an
//! inline `#word` becomes the entry's category and is removed from the text.

use chrono::{NaiveTime, TimeZone, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::grid::SLOT_MINUTES;
use crate::storage::LogEntry;

/// Clipboard text for a day without entries.
pub const EMPTY_DAY_PLACEHOLDER: &str = "No entries logged for this day.";

static IMPORT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2}):(\d{2})\s+(\S.*?)\s*$").expect("IMPORT_LINE should compile")
});

static INLINE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)#(\w+)").expect("INLINE_TAG should compile"));

/// One parsed import line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLine {
    /// Start of the slot containing the written time
    pub time: NaiveTime,
    pub description: String,
    pub category: Option<String>,
}

/// Parse every `HH:mm <description>` line of `text`.
///
/// Lines that do not match, or whose time is out of range, are skipped. Times
/// are floored to the start of their 15-minute slot.
pub fn parse_import(text: &str) -> Vec<ImportLine> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let parsed = parse_line(line);
            if parsed.is_none() && !line.trim().is_empty() {
                debug!(line = index + 1, "skipping unrecognized import line");
            }
            parsed
        })
        .collect()
}

fn parse_line(line: &str) -> Option<ImportLine> {
    let captures = IMPORT_LINE.captures(line)?;
    let hour: u32 = captures[1].parse().ok()?;
    let minute: u32 = captures[2].parse().ok()?;
    let floored = minute - minute % SLOT_MINUTES as u32;
    let time = NaiveTime::from_hms_opt(hour, floored, 0).filter(|_| minute < 60)?;

    let (description, category) = extract_tag(&captures[3]);
    Some(ImportLine {
        time,
        description,
        category,
    })
}

/// Split the first `#word` off `text`. The remaining words are rejoined with
/// single spaces.
pub fn extract_tag(text: &str) -> (String, Option<String>) {
    match INLINE_TAG.captures(text) {
        Some(captures) => {
            let (Some(whole), Some(tag)) = (captures.get(0), captures.get(1)) else {
                return (text.trim().to_string(), None);
            };
            let mut remaining = String::with_capacity(text.len());
            remaining.push_str(&text[..whole.start()]);
            remaining.push(' ');
            remaining.push_str(&text[whole.end()..]);
            let description = remaining.split_whitespace().collect::<Vec<_>>().join(" ");
            (description, Some(tag.as_str().to_string()))
        }
        None => (text.trim().to_string(), None),
    }
}

/// Render a day's entries as clipboard text, one `HH:mm <description>` line
/// per entry in the order given.
pub fn format_day<'a, I, Tz>(entries: I, tz: &Tz) -> String
where
    I: IntoIterator<Item = &'a LogEntry>,
    Tz: TimeZone,
{
    let lines: Vec<String> = entries
        .into_iter()
        .filter_map(|entry| {
            let time = entry.local_time(tz)?;
            let line = format!(
                "{:02}:{:02} {}",
                time.hour(),
                time.minute(),
                entry.trimmed_description()
            );
            Some(line.trim_end().to_string())
        })
        .collect();

    if lines.is_empty() {
        EMPTY_DAY_PLACEHOLDER.to_string()
    } else {
        lines.join("\n")
    }
}
