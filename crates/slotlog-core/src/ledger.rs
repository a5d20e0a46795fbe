//! The ledger facade: entry store plus settings, tag history and notes.
//!
//! Every mutation persists the documents it touched before returning. All
//! documents share one `KeyValueStore`, owned by the entry store.

use chrono::{NaiveDate, TimeZone};
use tracing::{debug, error, info, warn};

use crate::backup::BackupDocument;
use crate::categorize::infer_category;
use crate::error::{Result, SlotlogError};
use crate::grid::{floor_to_slot, SlotGrid};
use crate::notes::NoteBook;
use crate::settings::AppSettings;
use crate::stats::{aggregate, Comparison, StatsRange, Summary};
use crate::storage::{
    load_or_default, persist, DailyNote, EntryPatch, KeyValueStore, LogEntry, NewEntry, ALL_KEYS,
    NOTES_KEY, SETTINGS_KEY, TAGS_KEY,
};
use crate::store::{DaySlot, EntryStore, Upserted};
use crate::suggest;
use crate::tags::TagHistory;
use crate::time::resolve_local;
use crate::transfer::{format_day, parse_import};

/// Outcome of a text import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: Vec<LogEntry>,
    /// Non-blank lines that were not `HH:mm <description>`
    pub skipped: usize,
}

pub struct Ledger<S: KeyValueStore> {
    store: EntryStore<S>,
    settings: AppSettings,
    tags: TagHistory,
    notes: NoteBook,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load every document from `storage`. Missing or unreadable documents
    /// start from their defaults.
    pub fn open(storage: S) -> Self {
        let mut settings: AppSettings = load_or_default(&storage, SETTINGS_KEY);
        if let Err(e) = settings.validate() {
            warn!(error = %e, "stored settings are invalid, using defaults");
            settings = AppSettings::default();
        }
        let tags = TagHistory::from_vec(load_or_default(&storage, TAGS_KEY));
        let notes = NoteBook::from_vec(load_or_default(&storage, NOTES_KEY));
        Self {
            store: EntryStore::open(storage),
            settings,
            tags,
            notes,
        }
    }

    pub fn store(&self) -> &EntryStore<S> {
        &self.store
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_slice()
    }

    pub fn notes(&self) -> &NoteBook {
        &self.notes
    }

    pub fn note(&self, date: NaiveDate) -> Option<&DailyNote> {
        self.notes.get(date)
    }

    /// Slot grid for `date` under the current day bounds.
    pub fn grid<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> SlotGrid {
        SlotGrid::for_day(date, self.settings.start_hour, self.settings.end_hour, tz)
    }

    pub fn day_view<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Vec<DaySlot<'_>> {
        self.store.day_view(&self.grid(date, tz))
    }

    /// Save one entry. Without a category, one is inferred from recent
    /// history; whichever category ends up on the entry joins the tag history.
    pub fn submit(&mut self, entry: NewEntry, now: i64) -> Result<Upserted> {
        let entry = if entry.category.is_none() {
            let inferred = infer_category(&entry.description, self.store.entries(), now);
            if let Some(category) = &inferred {
                debug!(%category, "category inferred from history");
            }
            entry.with_category(inferred)
        } else {
            entry
        };
        let upserted = self.store.upsert(entry)?;
        if let Some(category) = upserted.entry.category_name() {
            self.record_tag(category);
        }
        Ok(upserted)
    }

    /// Save one entry per non-blank line of `text`, starting at `start`.
    /// `category` applies to every line; nothing is inferred.
    pub fn submit_bulk(
        &mut self,
        start: i64,
        text: &str,
        category: Option<&str>,
    ) -> Result<Vec<LogEntry>> {
        let saved = self.store.upsert_lines(start, text, category)?;
        if let Some(category) = saved.first().and_then(LogEntry::category_name) {
            let category = category.to_string();
            self.record_tag(&category);
        }
        Ok(saved)
    }

    pub fn edit(&mut self, id: &str, patch: EntryPatch) -> Result<LogEntry> {
        if patch.is_empty() {
            return Err(SlotlogError::InvalidInput(
                "nothing to change: pass a description or a category".to_string(),
            ));
        }
        let edited = self.store.edit(id, patch)?;
        if let Some(category) = edited.category_name() {
            self.record_tag(category);
        }
        Ok(edited)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.store.delete(id)
    }

    /// Ranked descriptions; with a non-empty `query`, only those containing it.
    pub fn suggestions(&self, query: Option<&str>, now: i64, limit: usize) -> Vec<String> {
        match query {
            Some(query) => suggest::complete(query, self.store.entries(), now, limit),
            None => suggest::rank(self.store.entries(), now, limit),
        }
    }

    pub fn infer_category(&self, text: &str, now: i64) -> Option<String> {
        infer_category(text, self.store.entries(), now)
    }

    pub fn stats<Tz: TimeZone>(&self, range: StatsRange, tz: &Tz) -> Summary {
        let range = range.resolve(tz);
        aggregate(
            self.store.query_range(range.start, range.end),
            range,
            &self.settings.resolved_categories(),
        )
    }

    /// Two days aggregated independently.
    pub fn compare<Tz: TimeZone>(&self, first: NaiveDate, second: NaiveDate, tz: &Tz) -> Comparison {
        Comparison {
            first: self.stats(StatsRange::Day(first), tz),
            second: self.stats(StatsRange::Day(second), tz),
        }
    }

    /// Import `HH:mm <description>` lines onto `date`.
    ///
    /// A `#word` tag is matched against configured categories ignoring case;
    /// unknown tags are kept as written. Lines without a tag are not
    /// auto-categorized.
    pub fn import_text<Tz: TimeZone>(
        &mut self,
        date: NaiveDate,
        text: &str,
        tz: &Tz,
    ) -> Result<ImportReport> {
        let lines = parse_import(text);
        let candidates = text.lines().filter(|l| !l.trim().is_empty()).count();
        let skipped = candidates.saturating_sub(lines.len());

        let mut imported = Vec::with_capacity(lines.len());
        for line in lines {
            let local = resolve_local(tz, date.and_time(line.time));
            let timestamp = floor_to_slot(local.timestamp_millis());
            let category = line.category.map(|tag| match self.settings.find_category(&tag) {
                Some(configured) => configured.name,
                None => tag,
            });
            if let Some(category) = &category {
                self.record_tag(category);
            }
            let entry = NewEntry::new(timestamp, line.description).with_category(category);
            imported.push(self.store.upsert(entry)?.entry);
        }
        info!(imported = imported.len(), skipped, %date, "text import finished");
        Ok(ImportReport { imported, skipped })
    }

    /// Clipboard text for `date`: every entry of the local calendar day.
    pub fn clipboard_text<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> String {
        let range = StatsRange::Day(date).resolve(tz);
        format_day(self.store.query_range(range.start, range.end), tz)
    }

    pub fn export(&self) -> BackupDocument {
        BackupDocument {
            logs: self.store.entries().cloned().collect(),
            settings: Some(self.settings.clone()),
            tags: Some(self.tags.as_slice().to_vec()),
            notes: Some(self.notes.to_vec()),
        }
    }

    /// Replace state with `document`. Entries are replaced wholesale; fields
    /// the document omits keep their current values.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::Validation` without touching anything if the
    /// document is invalid.
    pub fn restore(&mut self, document: BackupDocument) -> Result<()> {
        document.validate()?;
        let BackupDocument {
            logs,
            settings,
            tags,
            notes,
        } = document;

        self.store.replace_all(logs);
        if let Some(settings) = settings {
            self.settings = settings;
            persist(self.store.storage_mut(), SETTINGS_KEY, &self.settings);
        }
        if let Some(tags) = tags {
            self.tags = TagHistory::from_vec(tags);
            persist(self.store.storage_mut(), TAGS_KEY, &self.tags);
        }
        if let Some(notes) = notes {
            self.notes = NoteBook::from_vec(notes);
            self.flush_notes();
        }
        info!(entries = self.store.len(), "backup restored");
        Ok(())
    }

    /// Apply `change` to a copy of the settings; persist it if it validates.
    pub fn update_settings<F>(&mut self, change: F) -> Result<&AppSettings>
    where
        F: FnOnce(&mut AppSettings) -> Result<()>,
    {
        let mut updated = self.settings.clone();
        change(&mut updated)?;
        updated.validate()?;
        self.settings = updated;
        persist(self.store.storage_mut(), SETTINGS_KEY, &self.settings);
        Ok(&self.settings)
    }

    pub fn set_note(&mut self, date: NaiveDate, text: &str, now: i64) -> Result<DailyNote> {
        let note = self.notes.upsert(date, text, now)?;
        self.flush_notes();
        Ok(note)
    }

    pub fn remove_note(&mut self, date: NaiveDate) -> bool {
        let removed = self.notes.remove(date);
        if removed {
            self.flush_notes();
        }
        removed
    }

    /// Remove every persisted document and return to defaults.
    pub fn factory_reset(&mut self) {
        self.store.clear();
        let storage = self.store.storage_mut();
        for key in ALL_KEYS {
            if let Err(e) = storage.remove(key) {
                error!(key, error = %e, "failed to remove document during reset");
            }
        }
        self.settings = AppSettings::default();
        self.tags = TagHistory::default();
        self.notes = NoteBook::default();
        info!("factory reset complete");
    }

    pub fn into_storage(self) -> S {
        self.store.into_storage()
    }

    fn record_tag(&mut self, tag: &str) {
        if self.tags.record(tag) {
            persist(self.store.storage_mut(), TAGS_KEY, &self.tags);
        }
    }

    fn flush_notes(&mut self) {
        let notes = self.notes.to_vec();
        persist(self.store.storage_mut(), NOTES_KEY, &notes);
    }
}
