//! Key-value storage trait definition.
//!
//! The core never talks to a disk or database directly. Every persisted piece
//! of state (entries, settings, tag history, notes) is one JSON document stored
//! under a fixed key through `KeyValueStore`.

use serde_json::Value;

use crate::error::Result;

/// Storage collaborator holding whole JSON documents by key.
///
/// Implementations must ensure:
/// - `set` replaces the full document (no partial writes are observable)
/// - `get` on a key that was never written returns `Ok(None)`
/// - `remove` on a missing key is not an error
pub trait KeyValueStore {
    /// Read the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::Storage` if the backend cannot be read, or
    /// `SlotlogError::Serialization` if the stored bytes are not valid JSON.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `SlotlogError::Storage` if the write fails.
    fn set(&mut self, key: &str, value: &Value) -> Result<()>;

    /// Remove the document stored under `key`.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
