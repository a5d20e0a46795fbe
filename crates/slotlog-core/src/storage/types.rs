//! Core data types for the persisted model.
//!
//! Field names are serialized in camelCase; this is the shape of the `logs`
//! and `notes` documents and of backup files.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque entry identifier.
///
/// Fresh entries get a UUID v4 string. Ids read back from storage or a backup
/// are kept verbatim whatever their shape; numeric JSON ids become their
/// decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank ids are never assigned; a stored one is replaced on load.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Deref for EntryId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

/// One activity record occupying a single 15-minute slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Stable identifier, assigned at creation
    pub id: EntryId,

    /// Slot start instant in epoch milliseconds (natural key)
    pub timestamp: i64,

    /// Free-text description; may be empty
    #[serde(default)]
    pub description: String,

    /// Category name, or raw text used as a category key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl LogEntry {
    /// Trimmed description.
    pub fn trimmed_description(&self) -> &str {
        self.description.trim()
    }

    /// Whether the entry carries text worth indexing for suggestions.
    pub fn has_description(&self) -> bool {
        !self.trimmed_description().is_empty()
    }

    /// Category name if present and not blank.
    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Slot start as a wall-clock time in `tz`.
    pub fn local_time<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Builder for entries passed to `EntryStore::upsert`.
///
/// Leaving `id` unset means "this is a new record": a fresh id is generated
/// even when the upsert replaces an existing entry at the same timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub id: Option<EntryId>,
    pub timestamp: i64,
    pub description: String,
    pub category: Option<String>,
}

impl NewEntry {
    pub fn new(timestamp: i64, description: impl Into<String>) -> Self {
        Self {
            id: None,
            timestamp,
            description: description.into(),
            category: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<EntryId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category.filter(|c| !c.trim().is_empty());
        self
    }

    pub(crate) fn into_entry(self) -> LogEntry {
        LogEntry {
            id: self
                .id
                .filter(|id| !id.is_blank())
                .unwrap_or_else(EntryId::generate),
            timestamp: self.timestamp,
            description: self.description,
            category: self.category,
        }
    }
}

impl From<LogEntry> for NewEntry {
    fn from(entry: LogEntry) -> Self {
        Self {
            id: Some(entry.id),
            timestamp: entry.timestamp,
            description: entry.description,
            category: entry.category,
        }
    }
}

/// Direct field edit of an existing entry.
///
/// `category: Some(None)` clears the category; `None` leaves it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub description: Option<String>,
    pub category: Option<Option<String>>,
}

impl EntryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(Some(category.into()));
        self
    }

    pub fn clear_category(mut self) -> Self {
        self.category = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.category.is_none()
    }
}

/// A user-defined category. Entries reference categories by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Categories used when none are configured.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("work", "Work", "#3b82f6"),
        Category::new("meetings", "Meetings", "#8b5cf6"),
        Category::new("personal", "Personal", "#10b981"),
        Category::new("exercise", "Exercise", "#f59e0b"),
        Category::new("learning", "Learning", "#ef4444"),
    ]
}

/// Freeform note attached to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyNote {
    /// Calendar date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub text: String,
    /// Last update instant in epoch milliseconds
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_entry_builder() {
        let id = EntryId::generate();
        let entry = NewEntry::new(900_000, "standup")
            .with_id(id.clone())
            .with_category(Some("Meetings".to_string()))
            .into_entry();

        assert_eq!(entry.id, id);
        assert_eq!(entry.timestamp, 900_000);
        assert_eq!(entry.category.as_deref(), Some("Meetings"));
    }

    #[test]
    fn test_blank_category_is_dropped() {
        let entry = NewEntry::new(0, "x")
            .with_category(Some("   ".to_string()))
            .into_entry();
        assert!(entry.category.is_none());
    }

    #[test]
    fn test_entry_without_description_deserializes() {
        let id = EntryId::generate();
        let entry: LogEntry =
            serde_json::from_value(json!({"id": id, "timestamp": 0})).unwrap();
        assert_eq!(entry.description, "");
        assert!(!entry.has_description());
        assert!(entry.category_name().is_none());
    }

    #[test]
    fn test_generated_ids_are_uuids() {
        let id = EntryId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, EntryId::generate());
    }

    #[test]
    fn test_foreign_ids_are_kept_verbatim() {
        let entry: LogEntry =
            serde_json::from_value(json!({"id": "1710000000000", "timestamp": 0})).unwrap();
        assert_eq!(entry.id.as_str(), "1710000000000");

        let entry: LogEntry =
            serde_json::from_value(json!({"id": 1710000000000_i64, "timestamp": 0})).unwrap();
        assert_eq!(entry.id, EntryId::from("1710000000000"));
        assert_eq!(serde_json::to_value(&entry).unwrap()["id"], json!("1710000000000"));
    }

    #[test]
    fn test_blank_id_is_regenerated() {
        let entry = NewEntry::new(0, "x").with_id("  ").into_entry();
        assert!(!entry.id.is_blank());
    }

    #[test]
    fn test_note_date_format() {
        let note = DailyNote {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            text: "quiet day".to_string(),
            updated_at: 1,
        };
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["date"], json!("2024-03-05"));
        assert_eq!(value["updatedAt"], json!(1));
    }

    #[test]
    fn test_patch_builder() {
        let patch = EntryPatch::new().description("review").clear_category();
        assert_eq!(patch.description.as_deref(), Some("review"));
        assert_eq!(patch.category, Some(None));
        assert!(EntryPatch::new().is_empty());
    }
}
