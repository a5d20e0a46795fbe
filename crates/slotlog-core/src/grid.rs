//! Slot grid generation.
//!
//! A day is cut into 15-minute slots between the configured start and end
//! hour. When `end_hour <= start_hour` the range runs overnight into the next
//! calendar day; equal hours therefore mean a full 24-hour grid.

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone};

use crate::time::{resolve_local, TimeRange, MILLIS_PER_MINUTE};

/// Length of one slot in minutes.
pub const SLOT_MINUTES: i64 = 15;
/// Length of one slot in milliseconds.
pub const SLOT_MILLIS: i64 = SLOT_MINUTES * MILLIS_PER_MINUTE;
/// Slots in one hour.
pub const SLOTS_PER_HOUR: usize = 4;

/// Number of slots between `start_hour` and `end_hour`, wrapping past midnight.
pub fn slot_count(start_hour: u8, end_hour: u8) -> usize {
    let (start, end) = (i64::from(start_hour), i64::from(end_hour));
    let hours = if end > start { end - start } else { end - start + 24 };
    usize::try_from(hours).unwrap_or(0) * SLOTS_PER_HOUR
}

/// Whether `timestamp` is the start instant of a slot.
pub fn is_slot_aligned(timestamp: i64) -> bool {
    timestamp.rem_euclid(SLOT_MILLIS) == 0
}

/// Start of the slot containing `timestamp`.
pub fn floor_to_slot(timestamp: i64) -> i64 {
    timestamp - timestamp.rem_euclid(SLOT_MILLIS)
}

/// Ordered slot-start timestamps for one configured day.
///
/// The grid is a value: iterating it twice yields the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    first: i64,
    len: usize,
}

impl SlotGrid {
    /// Grid for `day` starting at `start_hour:00` local time in `tz`.
    pub fn for_day<Tz: TimeZone>(day: NaiveDate, start_hour: u8, end_hour: u8, tz: &Tz) -> Self {
        let start = day.and_time(NaiveTime::MIN) + Duration::hours(i64::from(start_hour));
        Self {
            first: resolve_local(tz, start).timestamp_millis(),
            len: slot_count(start_hour, end_hour),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn first(&self) -> Option<i64> {
        (!self.is_empty()).then_some(self.first)
    }

    pub fn last(&self) -> Option<i64> {
        self.len
            .checked_sub(1)
            .map(|offset| self.first + offset as i64 * SLOT_MILLIS)
    }

    /// Inclusive range from the first to the last slot start.
    pub fn range(&self) -> Option<TimeRange> {
        Some(TimeRange::new(self.first()?, self.last()?))
    }

    /// Whether `timestamp` is one of the grid's slot starts.
    pub fn contains(&self, timestamp: i64) -> bool {
        self.range().is_some_and(|range| {
            range.contains(timestamp) && (timestamp - self.first) % SLOT_MILLIS == 0
        })
    }

    pub fn iter(&self) -> Slots {
        Slots {
            next: self.first,
            remaining: self.len,
        }
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.iter().collect()
    }
}

impl IntoIterator for SlotGrid {
    type Item = i64;
    type IntoIter = Slots;

    fn into_iter(self) -> Slots {
        self.iter()
    }
}

impl IntoIterator for &SlotGrid {
    type Item = i64;
    type IntoIter = Slots;

    fn into_iter(self) -> Slots {
        self.iter()
    }
}

/// Iterator over the slot starts of a `SlotGrid`.
#[derive(Debug, Clone)]
pub struct Slots {
    next: i64,
    remaining: usize,
}

impl Iterator for Slots {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.next += SLOT_MILLIS;
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Slots {
    fn next_back(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.next + self.remaining as i64 * SLOT_MILLIS)
    }
}

impl ExactSizeIterator for Slots {}
