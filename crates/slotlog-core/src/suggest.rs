//! Recency-weighted autocomplete ranking.
//!
//! Every use of a description adds a weight that decays with age. Scores are
//! recomputed from the full entry collection on each call.

use std::collections::HashMap;

use serde::Serialize;

use crate::storage::LogEntry;
use crate::time::MILLIS_PER_HOUR;

/// Number of suggestions returned when the caller has no preference.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// A ranked description and its accumulated score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub description: String,
    pub score: f64,
}

/// Weight of one use of a description that is `age_hours` old.
pub fn recency_multiplier(age_hours: f64) -> f64 {
    match age_hours {
        a if a <= 48.0 => 1.0,
        a if a <= 72.0 => 0.8,
        a if a <= 168.0 => 0.2,
        a if a <= 336.0 => 0.1,
        a if a <= 4320.0 => 0.1,
        _ => 0.0,
    }
}

/// Score every distinct non-empty description, highest first.
///
/// Ties keep the order in which descriptions were first seen. Descriptions
/// whose score is zero (nothing used within six months) are left out.
pub fn score<'a, I>(entries: I, now: i64) -> Vec<Suggestion>
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let mut ranked: Vec<Suggestion> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for entry in entries {
        let description = entry.trimmed_description();
        if description.is_empty() {
            continue;
        }
        let age_hours = (now - entry.timestamp) as f64 / MILLIS_PER_HOUR as f64;
        let weight = recency_multiplier(age_hours);
        let position = *positions.entry(description).or_insert_with(|| {
            ranked.push(Suggestion {
                description: description.to_string(),
                score: 0.0,
            });
            ranked.len() - 1
        });
        ranked[position].score += weight;
    }

    ranked.retain(|s| s.score > 0.0);
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Top `limit` descriptions by recency-weighted frequency.
pub fn rank<'a, I>(entries: I, now: i64, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    score(entries, now)
        .into_iter()
        .take(limit)
        .map(|s| s.description)
        .collect()
}

/// Ranked descriptions containing `query` (case-insensitive), excluding the
/// query itself. An empty query behaves like `rank`.
pub fn complete<'a, I>(query: &str, entries: I, now: i64, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let needle = query.trim().to_lowercase();
    score(entries, now)
        .into_iter()
        .map(|s| s.description)
        .filter(|description| {
            let candidate = description.to_lowercase();
            needle.is_empty() || (candidate.contains(&needle) && candidate != needle)
        })
        .take(limit)
        .collect()
}
