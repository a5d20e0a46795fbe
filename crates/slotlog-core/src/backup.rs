//! Backup documents: the full persisted state as one JSON object.
//!
//! ```json
//! { "logs": [...], "settings": {...}, "tags": [...], "notes": [...] }
//! ```
//!
//! `logs` is required. The other fields are optional; a restore leaves the
//! current value in place for any field the document omits.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SlotlogError};
use crate::grid::is_slot_aligned;
use crate::notes::validate_note;
use crate::settings::AppSettings;
use crate::storage::{DailyNote, LogEntry, LOGS_KEY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub logs: Vec<LogEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<AppSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<DailyNote>>,
}

impl BackupDocument {
    /// Decode and validate a backup.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::Validation` if the text is not a JSON object,
    /// `logs` is missing, or any part of the document is invalid.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| SlotlogError::Validation(format!("backup is not valid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Same as `parse`, starting from an already decoded value.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = &value else {
            return Err(SlotlogError::Validation(
                "backup must be a JSON object".to_string(),
            ));
        };
        match map.get(LOGS_KEY) {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(SlotlogError::Validation(
                    "backup field `logs` must be an array".to_string(),
                ))
            }
            None => {
                return Err(SlotlogError::Validation(
                    "backup is missing the `logs` array".to_string(),
                ))
            }
        }
        let document: Self = serde_json::from_value(value)
            .map_err(|e| SlotlogError::Validation(format!("invalid backup: {}", e)))?;
        document.validate()?;
        Ok(document)
    }

    /// Semantic checks that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::Validation` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let mut timestamps = HashSet::with_capacity(self.logs.len());
        let mut ids = HashSet::with_capacity(self.logs.len());
        for (index, entry) in self.logs.iter().enumerate() {
            if !is_slot_aligned(entry.timestamp) {
                return Err(SlotlogError::Validation(format!(
                    "log {} has a timestamp that is not a slot start: {}",
                    index, entry.timestamp
                )));
            }
            if !timestamps.insert(entry.timestamp) {
                return Err(SlotlogError::Validation(format!(
                    "log {} repeats timestamp {}",
                    index, entry.timestamp
                )));
            }
            if entry.id.is_blank() {
                return Err(SlotlogError::Validation(format!("log {} has a blank id", index)));
            }
            if !ids.insert(entry.id.as_str()) {
                return Err(SlotlogError::Validation(format!(
                    "log {} repeats id {}",
                    index, entry.id
                )));
            }
        }
        if let Some(settings) = &self.settings {
            settings.validate()?;
        }
        if let Some(notes) = &self.notes {
            for note in notes {
                validate_note(&note.text)?;
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "logs": [
                { "id": "6f1c1c36-8a55-4a3c-9a52-0e2f4f2a2a01", "timestamp": 900000, "description": "a", "category": "Work" },
                { "id": "6f1c1c36-8a55-4a3c-9a52-0e2f4f2a2a02", "timestamp": 1800000, "description": "b" }
            ],
            "tags": ["Work"]
        })
    }

    #[test]
    fn test_parses_minimal_document() {
        let document = BackupDocument::from_value(valid()).unwrap();
        assert_eq!(document.logs.len(), 2);
        assert_eq!(document.tags, Some(vec!["Work".to_string()]));
        assert!(document.settings.is_none());
        assert!(document.notes.is_none());
    }

    #[test]
    fn test_missing_logs_is_rejected() {
        let err = BackupDocument::from_value(json!({ "tags": [] })).unwrap_err();
        assert!(matches!(err, SlotlogError::Validation(_)));

        let err = BackupDocument::from_value(json!({ "logs": {} })).unwrap_err();
        assert!(matches!(err, SlotlogError::Validation(_)));

        assert!(BackupDocument::parse("[]").is_err());
        assert!(BackupDocument::parse("not json").is_err());
    }

    #[test]
    fn test_invalid_log_is_rejected() {
        let mut doc = valid();
        doc["logs"][1]["timestamp"] = json!(1800001);
        assert!(BackupDocument::from_value(doc).is_err());

        let mut doc = valid();
        doc["logs"][1]["id"] = json!(" ");
        assert!(BackupDocument::from_value(doc).is_err());

        let mut doc = valid();
        doc["logs"][1]["id"] = doc["logs"][0]["id"].clone();
        assert!(BackupDocument::from_value(doc).is_err());

        let mut doc = valid();
        doc["logs"][1]["timestamp"] = json!(900000);
        assert!(BackupDocument::from_value(doc).is_err());
    }

    #[test]
    fn test_ids_need_not_be_uuids() {
        let document = BackupDocument::parse(
            r#"{"logs":[{"id":"1710000000000","timestamp":900000,"description":"standup","category":"Meetings"},{"id":42,"timestamp":1800000}]}"#,
        )
        .unwrap();
        assert_eq!(document.logs[0].id.as_str(), "1710000000000");
        assert_eq!(document.logs[1].id.as_str(), "42");
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let mut doc = valid();
        doc["settings"] = json!({ "startHour": 30 });
        assert!(BackupDocument::from_value(doc).is_err());
    }

    #[test]
    fn test_optional_fields_are_omitted_when_absent() {
        let document = BackupDocument::from_value(valid()).unwrap();
        let text = document.to_json_pretty().unwrap();
        assert!(!text.contains("settings"));
        assert!(!text.contains("notes"));
    }
}
