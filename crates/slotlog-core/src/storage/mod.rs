//! Storage seam and persisted data model.
//!
//! - **traits**: the `KeyValueStore` collaborator interface
//! - **file**: one JSON file per key inside a data directory
//! - **memory**: map-backed store for tests and throwaway sessions
//! - **types**: entries, categories, notes
//!
//! Reads degrade to defaults and writes are best-effort: a failed read is
//! logged and replaced by the documented default, a failed write is logged and
//! otherwise ignored. Callers never see storage errors through these helpers.

mod file;
mod memory;
mod traits;
pub mod types;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, warn};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
pub use types::{
    default_categories, Category, DailyNote, EntryId, EntryPatch, LogEntry, NewEntry,
};

/// Key of the entry collection (array sorted ascending by timestamp).
pub const LOGS_KEY: &str = "logs";
/// Key of the application settings document.
pub const SETTINGS_KEY: &str = "settings";
/// Key of the tag history (most recent first).
pub const TAGS_KEY: &str = "tags";
/// Key of the daily notes array.
pub const NOTES_KEY: &str = "notes";

/// Every key the ledger writes. Factory reset removes all of them.
pub const ALL_KEYS: [&str; 4] = [LOGS_KEY, SETTINGS_KEY, TAGS_KEY, NOTES_KEY];

/// Read and decode the document under `key`, falling back to `T::default()`.
pub fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match store.get(key) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(key, error = %e, "stored document has an unexpected shape, using default");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "storage read failed, using default");
            T::default()
        }
    }
}

/// Encode and write `value` under `key`. Returns whether the write succeeded.
pub fn persist<T, S>(store: &mut S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let document = match serde_json::to_value(value) {
        Ok(document) => document,
        Err(e) => {
            error!(key, error = %e, "failed to encode document");
            return false;
        }
    };
    match store.set(key, &document) {
        Ok(()) => true,
        Err(e) => {
            error!(key, error = %e, "storage write failed");
            false
        }
    }
}
