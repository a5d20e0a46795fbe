//! Entry store: at most one entry per slot timestamp.
//!
//! Entries live in a `BTreeMap` keyed by timestamp, so chronological order is
//! structural and upsert/delete are O(log n). An id index makes delete-by-id
//! and edits cheap. After every mutation the whole collection is written to the
//! `logs` key as an array sorted ascending by timestamp.

use std::collections::btree_map::Values;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::TimeZone;
use tracing::{debug, error, info, warn};

use crate::error::{Result, SlotlogError};
use crate::grid::{is_slot_aligned, SlotGrid, SLOT_MILLIS};
use crate::storage::{
    load_or_default, persist, EntryId, EntryPatch, KeyValueStore, LogEntry, NewEntry, LOGS_KEY,
};
use crate::time::{date_of, day_start};

/// Result of an upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    /// The entry now stored at the timestamp
    pub entry: LogEntry,
    /// The entry it replaced, if the slot was occupied
    pub replaced: Option<LogEntry>,
}

/// One row of a day view: a grid slot and whatever occupies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySlot<'a> {
    pub timestamp: i64,
    pub entry: Option<&'a LogEntry>,
}

/// Entry collection persisted through a `KeyValueStore`.
pub struct EntryStore<S: KeyValueStore> {
    storage: S,
    entries: BTreeMap<i64, LogEntry>,
    ids: HashMap<EntryId, i64>,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Load the entry collection from `storage`.
    ///
    /// A missing or unreadable collection starts the store empty.
    pub fn open(storage: S) -> Self {
        let stored: Vec<LogEntry> = load_or_default(&storage, LOGS_KEY);
        let mut store = Self {
            storage,
            entries: BTreeMap::new(),
            ids: HashMap::new(),
        };
        for mut entry in stored {
            if entry.id.is_blank() {
                warn!(timestamp = entry.timestamp, "stored entry has a blank id, assigning one");
                entry.id = EntryId::generate();
            }
            store.insert_indexed(entry);
        }
        debug!(entries = store.len(), "entry store loaded");
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ascending by timestamp.
    pub fn entries(&self) -> Values<'_, i64, LogEntry> {
        self.entries.values()
    }

    pub fn get(&self, id: &str) -> Option<&LogEntry> {
        self.ids.get(id).and_then(|ts| self.entries.get(ts))
    }

    /// Entry occupying the slot starting at `timestamp`.
    pub fn at(&self, timestamp: i64) -> Option<&LogEntry> {
        self.entries.get(&timestamp)
    }

    /// Insert `entry`, or replace the entry already stored at its timestamp.
    ///
    /// If the caller carries an id that currently lives at another timestamp,
    /// that older record moves here, keeping ids unique.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::Validation` if the timestamp is not a slot start.
    pub fn upsert(&mut self, entry: NewEntry) -> Result<Upserted> {
        if !is_slot_aligned(entry.timestamp) {
            return Err(SlotlogError::Validation(format!(
                "timestamp {} is not the start of a 15-minute slot",
                entry.timestamp
            )));
        }
        let entry = entry.into_entry();
        let timestamp = entry.timestamp;
        let replaced = self.insert_indexed(entry);
        debug!(timestamp, replaced = replaced.is_some(), "entry upserted");
        self.flush();

        let entry = self.entries.get(&timestamp).cloned().ok_or_else(|| {
            SlotlogError::NotFound(format!("entry at {} after upsert", timestamp))
        })?;
        Ok(Upserted { entry, replaced })
    }

    /// Upsert one entry per non-blank line, starting at `start` and moving
    /// forward one slot per line. Every line gets the same `category`.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::Validation` if `start` is not a slot start.
    pub fn upsert_lines(
        &mut self,
        start: i64,
        text: &str,
        category: Option<&str>,
    ) -> Result<Vec<LogEntry>> {
        if !is_slot_aligned(start) {
            return Err(SlotlogError::Validation(format!(
                "timestamp {} is not the start of a 15-minute slot",
                start
            )));
        }
        let mut saved = Vec::new();
        let mut timestamp = start;
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let new_entry =
                NewEntry::new(timestamp, line).with_category(category.map(str::to_string));
            saved.push(self.upsert(new_entry)?.entry);
            timestamp += SLOT_MILLIS;
        }
        Ok(saved)
    }

    /// Edit fields of the entry with `id` in place.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::NotFound` if no entry has that id.
    pub fn edit(&mut self, id: &str, patch: EntryPatch) -> Result<LogEntry> {
        let timestamp = *self
            .ids
            .get(id)
            .ok_or_else(|| SlotlogError::NotFound(format!("entry {}", id)))?;
        let entry = self
            .entries
            .get_mut(&timestamp)
            .ok_or_else(|| SlotlogError::NotFound(format!("entry {}", id)))?;
        if let Some(description) = patch.description {
            entry.description = description;
        }
        if let Some(category) = patch.category {
            entry.category = category.filter(|c| !c.trim().is_empty());
        }
        let updated = entry.clone();
        debug!(%id, "entry edited");
        self.flush();
        Ok(updated)
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(timestamp) = self.ids.remove(id) else {
            return false;
        };
        self.entries.remove(&timestamp);
        debug!(%id, timestamp, "entry deleted");
        self.flush();
        true
    }

    /// Entries with `start <= timestamp <= end`, ascending.
    pub fn query_range(&self, start: i64, end: i64) -> Vec<&LogEntry> {
        if start > end {
            return Vec::new();
        }
        self.entries.range(start..=end).map(|(_, e)| e).collect()
    }

    /// Local-midnight instants of every day holding at least one entry.
    pub fn activity_dates<Tz: TimeZone>(&self, tz: &Tz) -> Vec<i64> {
        let days: BTreeSet<i64> = self
            .entries
            .keys()
            .filter_map(|ts| date_of(*ts, tz))
            .map(|date| day_start(date, tz))
            .collect();
        days.into_iter().collect()
    }

    /// Every slot of `grid` paired with its entry. Entries outside the grid
    /// are not part of the view.
    pub fn day_view(&self, grid: &SlotGrid) -> Vec<DaySlot<'_>> {
        grid.iter()
            .map(|timestamp| DaySlot {
                timestamp,
                entry: self.entries.get(&timestamp),
            })
            .collect()
    }

    /// Replace the whole collection (backup restore).
    pub(crate) fn replace_all(&mut self, entries: Vec<LogEntry>) {
        self.entries.clear();
        self.ids.clear();
        for entry in entries {
            self.insert_indexed(entry);
        }
        info!(entries = self.len(), "entry collection replaced");
        self.flush();
    }

    /// Drop every entry and the persisted collection.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.ids.clear();
        if let Err(e) = self.storage.remove(LOGS_KEY) {
            error!(error = %e, "failed to remove persisted entries");
        }
    }

    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    pub(crate) fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Consume the store, returning the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn insert_indexed(&mut self, entry: LogEntry) -> Option<LogEntry> {
        let (id, timestamp) = (entry.id.clone(), entry.timestamp);
        if let Some(previous) = self.ids.insert(id.clone(), timestamp) {
            if previous != timestamp {
                self.entries.remove(&previous);
            }
        }
        let replaced = self.entries.insert(timestamp, entry);
        if let Some(old) = &replaced {
            if old.id != id {
                self.ids.remove(&old.id);
            }
        }
        replaced
    }

    fn flush(&mut self) -> bool {
        let ordered: Vec<&LogEntry> = self.entries.values().collect();
        persist(&mut self.storage, LOGS_KEY, &ordered)
    }
}
