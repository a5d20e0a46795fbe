//! Category inference from recent history.

use crate::storage::LogEntry;
use crate::time::MILLIS_PER_DAY;

/// How far back the categorizer looks, in days.
pub const LOOKBACK_DAYS: i64 = 30;

/// Category of the most recent entry whose description matches `text`.
///
/// Matching ignores case and surrounding whitespace. `entries` must be in
/// ascending timestamp order: the scan walks backwards and stops at the first
/// entry older than the lookback window.
pub fn infer_category<'a, I>(text: &str, entries: I, now: i64) -> Option<String>
where
    I: IntoIterator<Item = &'a LogEntry>,
    I::IntoIter: DoubleEndedIterator,
{
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let horizon = LOOKBACK_DAYS * MILLIS_PER_DAY;

    for entry in entries.into_iter().rev() {
        if now - entry.timestamp > horizon {
            break;
        }
        if !entry.has_description() {
            continue;
        }
        let Some(category) = entry.category_name() else {
            continue;
        };
        if entry.trimmed_description().to_lowercase() == needle {
            return Some(category.to_string());
        }
    }
    None
}
