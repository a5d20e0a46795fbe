//! String formatting utilities for UI rendering.

use chrono::{TimeZone, Timelike};

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Short form of an entry ID (first 8 characters).
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Wall-clock `HH:MM` of `timestamp` in `tz`.
pub fn format_slot_time<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String {
    match tz.timestamp_millis_opt(timestamp).single() {
        Some(dt) => format!("{:02}:{:02}", dt.hour(), dt.minute()),
        None => "--:--".to_string(),
    }
}

/// Minutes as "45m", "2h" or "1h 15m".
pub fn format_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

/// Signed minute difference, e.g. "+30m" or "-1h 15m".
pub fn format_delta(minutes: i64) -> String {
    let magnitude = u32::try_from(minutes.unsigned_abs()).unwrap_or(u32::MAX);
    match minutes.signum() {
        1 => format!("+{}", format_minutes(magnitude)),
        -1 => format!("-{}", format_minutes(magnitude)),
        _ => "0m".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 3), "hel");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("7a2e3c0b-1234-5678-9abc-def012345678"), "7a2e3c0b");
        assert_eq!(short_id("42"), "42");
    }

    #[test]
    fn test_format_slot_time() {
        let ts = 9 * 3_600_000 + 15 * 60_000;
        assert_eq!(format_slot_time(ts, &Utc), "09:15");
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_slot_time(ts, &plus_two), "11:15");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(75), "1h 15m");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(30), "+30m");
        assert_eq!(format_delta(-75), "-1h 15m");
        assert_eq!(format_delta(0), "0m");
    }

    #[test]
    fn test_format_percent_and_single_line() {
        assert_eq!(format_percent(60.0), "60.0%");
        assert_eq!(format_percent(33.333), "33.3%");
        assert_eq!(single_line("a\nb\r"), "a b");
    }
}
