//! Freeform daily notes, one per calendar date.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{Result, SlotlogError};
use crate::storage::DailyNote;

/// Maximum note length in characters.
pub const MAX_NOTE_CHARS: usize = 2000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteBook {
    notes: BTreeMap<NaiveDate, DailyNote>,
}

impl NoteBook {
    /// Later notes for the same date replace earlier ones.
    pub fn from_vec(notes: Vec<DailyNote>) -> Self {
        Self {
            notes: notes.into_iter().map(|note| (note.date, note)).collect(),
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyNote> {
        self.notes.get(&date)
    }

    /// Create or replace the note for `date`.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::Validation` when `text` exceeds 2000 characters.
    pub fn upsert(&mut self, date: NaiveDate, text: &str, now: i64) -> Result<DailyNote> {
        validate_note(text)?;
        let note = DailyNote {
            date,
            text: text.to_string(),
            updated_at: now,
        };
        self.notes.insert(date, note.clone());
        Ok(note)
    }

    pub fn remove(&mut self, date: NaiveDate) -> bool {
        self.notes.remove(&date).is_some()
    }

    /// Notes in date order.
    pub fn iter(&self) -> impl Iterator<Item = &DailyNote> {
        self.notes.values()
    }

    pub fn to_vec(&self) -> Vec<DailyNote> {
        self.notes.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

pub(crate) fn validate_note(text: &str) -> Result<()> {
    let chars = text.chars().count();
    if chars > MAX_NOTE_CHARS {
        return Err(SlotlogError::Validation(format!(
            "note is {} characters, the limit is {}",
            chars, MAX_NOTE_CHARS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_upsert_replaces_by_date() {
        let mut notes = NoteBook::default();
        notes.upsert(date(5), "first", 1).unwrap();
        let note = notes.upsert(date(5), "second", 2).unwrap();

        assert_eq!(notes.len(), 1);
        assert_eq!(note.updated_at, 2);
        assert_eq!(notes.get(date(5)).unwrap().text, "second");
    }

    #[test]
    fn test_length_limit_counts_characters() {
        let mut notes = NoteBook::default();
        assert!(notes.upsert(date(1), &"é".repeat(MAX_NOTE_CHARS), 0).is_ok());
        let err = notes
            .upsert(date(2), &"x".repeat(MAX_NOTE_CHARS + 1), 0)
            .unwrap_err();
        assert!(matches!(err, SlotlogError::Validation(_)));
        assert!(notes.get(date(2)).is_none());
    }

    #[test]
    fn test_remove_and_order() {
        let mut notes = NoteBook::default();
        notes.upsert(date(9), "b", 0).unwrap();
        notes.upsert(date(3), "a", 0).unwrap();
        let dates: Vec<NaiveDate> = notes.iter().map(|n| n.date).collect();
        assert_eq!(dates, vec![date(3), date(9)]);

        assert!(notes.remove(date(3)));
        assert!(!notes.remove(date(3)));
    }
}
