//! Per-category time statistics.
//!
//! Each entry is one slot, so it contributes exactly 15 minutes to the bucket
//! of its category. Categories are matched by their current configured name;
//! anything else (missing, renamed, deleted, free text) lands in
//! `Uncategorized`.

use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::grid::SLOT_MINUTES;
use crate::storage::{Category, LogEntry};
use crate::time::{day_range, week_range, TimeRange};

/// Reserved bucket for entries without a configured category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Task label for entries without a description.
pub const UNTITLED_TASK: &str = "(untitled)";

/// Colors handed out by output position to buckets without a configured color.
pub const FALLBACK_PALETTE: [&str; 8] = [
    "#64748b", "#0ea5e9", "#14b8a6", "#84cc16", "#eab308", "#f97316", "#ec4899", "#a855f7",
];

/// Minutes spent on one description inside a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskTime {
    pub description: String,
    pub minutes: u32,
}

/// One category's share of the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub name: String,
    pub minutes: u32,
    pub percentage: f64,
    pub color: String,
    pub tasks: Vec<TaskTime>,
}

/// Aggregation result for a time range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub range: TimeRange,
    pub total_minutes: u32,
    pub buckets: Vec<CategoryStat>,
}

impl Summary {
    pub fn bucket(&self, name: &str) -> Option<&CategoryStat> {
        self.buckets.iter().find(|b| b.name == name)
    }
}

/// Two single days aggregated independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub first: Summary,
    pub second: Summary,
}

/// Which calendar window a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsRange {
    /// Local midnight to midnight
    Day(NaiveDate),
    /// Monday-start week containing the date
    Week(NaiveDate),
}

impl StatsRange {
    pub fn resolve<Tz: TimeZone>(&self, tz: &Tz) -> TimeRange {
        match *self {
            Self::Day(date) => day_range(date, tz),
            Self::Week(date) => week_range(date, tz),
        }
    }
}

struct Bucket {
    name: String,
    color: Option<String>,
    minutes: u32,
    tasks: Vec<TaskTime>,
    task_index: HashMap<String, usize>,
}

impl Bucket {
    fn new(name: &str, color: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            color: color
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            minutes: 0,
            tasks: Vec::new(),
            task_index: HashMap::new(),
        }
    }

    fn add(&mut self, description: &str, minutes: u32) {
        self.minutes += minutes;
        let label = if description.is_empty() {
            UNTITLED_TASK
        } else {
            description
        };
        match self.task_index.get(label) {
            Some(&i) => self.tasks[i].minutes += minutes,
            None => {
                self.task_index.insert(label.to_string(), self.tasks.len());
                self.tasks.push(TaskTime {
                    description: label.to_string(),
                    minutes,
                });
            }
        }
    }
}

/// Bucket the entries inside `range` by category.
///
/// Buckets without minutes are dropped; the rest are sorted by minutes,
/// largest first, keeping configured order for ties with `Uncategorized` last.
pub fn aggregate<'a, I>(entries: I, range: TimeRange, categories: &[Category]) -> Summary
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let mut buckets: Vec<Bucket> = Vec::with_capacity(categories.len() + 1);
    let mut by_name: HashMap<&str, usize> = HashMap::new();
    for category in categories {
        if !by_name.contains_key(category.name.as_str()) {
            by_name.insert(category.name.as_str(), buckets.len());
            buckets.push(Bucket::new(&category.name, Some(&category.color)));
        }
    }
    let uncategorized = buckets.len();
    buckets.push(Bucket::new(UNCATEGORIZED, None));

    let slot_minutes = SLOT_MINUTES as u32;
    let mut total_minutes = 0u32;
    for entry in entries.into_iter().filter(|e| range.contains(e.timestamp)) {
        let index = entry
            .category
            .as_deref()
            .and_then(|name| by_name.get(name).copied())
            .unwrap_or(uncategorized);
        buckets[index].add(entry.trimmed_description(), slot_minutes);
        total_minutes += slot_minutes;
    }

    buckets.retain(|b| b.minutes > 0);
    buckets.sort_by(|a, b| b.minutes.cmp(&a.minutes));

    let buckets = buckets
        .into_iter()
        .enumerate()
        .map(|(position, bucket)| {
            let percentage = if total_minutes == 0 {
                0.0
            } else {
                f64::from(bucket.minutes) / f64::from(total_minutes) * 100.0
            };
            let color = bucket.color.unwrap_or_else(|| {
                FALLBACK_PALETTE[position % FALLBACK_PALETTE.len()].to_string()
            });
            let mut tasks = bucket.tasks;
            tasks.sort_by(|a, b| b.minutes.cmp(&a.minutes));
            CategoryStat {
                name: bucket.name,
                minutes: bucket.minutes,
                percentage,
                color,
                tasks,
            }
        })
        .collect();

    Summary {
        range,
        total_minutes,
        buckets,
    }
}
