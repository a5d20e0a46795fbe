//! Wall-clock helpers: local midnights, day and week ranges.
//!
//! Timestamps are epoch milliseconds. Calendar math happens in whatever
//! `TimeZone` the caller passes (usually `chrono::Local`); nothing converts
//! between zones.

use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
};
use serde::{Deserialize, Serialize};

pub const MILLIS_PER_MINUTE: i64 = 60_000;
pub const MILLIS_PER_HOUR: i64 = 3_600_000;
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Inclusive range of epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Resolve a wall-clock time in `tz`.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// DST gap are pushed forward by an hour.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

/// Epoch milliseconds of local midnight starting `date`.
pub fn day_start<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    resolve_local(tz, date.and_time(NaiveTime::MIN)).timestamp_millis()
}

/// Local calendar date containing `timestamp`.
pub fn date_of<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(timestamp)
        .single()
        .map(|dt| dt.date_naive())
}

/// Local midnight to the last millisecond before the next local midnight.
pub fn day_range<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> TimeRange {
    span_range(date, 1, tz)
}

/// Monday that starts the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Monday-start 7-day window containing `date`.
pub fn week_range<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> TimeRange {
    span_range(week_start(date), 7, tz)
}

fn span_range<Tz: TimeZone>(first: NaiveDate, days: u64, tz: &Tz) -> TimeRange {
    let start = day_start(first, tz);
    let end = match first.checked_add_days(Days::new(days)) {
        Some(next) => day_start(next, tz) - 1,
        None => start + MILLIS_PER_DAY * days as i64 - 1,
    };
    TimeRange::new(start, end)
}
