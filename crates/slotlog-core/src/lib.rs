//! # Slotlog Core
//!
//! Core library for Slotlog - a personal activity ledger that splits each day
//! into 15-minute slots and records at most one entry per slot.
//!
//! This crate provides the domain logic, storage abstractions, and data models
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **grid**: Slot grid generation from day bounds (overnight aware)
//! - **store**: Entry store keyed by slot timestamp
//! - **suggest**: Recency-weighted autocomplete ranking
//! - **categorize**: 30-day lookback category inference
//! - **stats**: Per-category aggregation for days, weeks and comparisons
//! - **backup**: Export and restore of the full persisted state
//! - **transfer**: `HH:mm <description>` text import and clipboard export
//! - **ledger**: Facade tying the store to settings, tags and notes
//! - **storage**: Key-value storage seam and persisted types

pub mod backup;
pub mod categorize;
pub mod error;
pub mod fs;
pub mod grid;
pub mod ledger;
pub mod notes;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod store;
pub mod suggest;
pub mod tags;
pub mod time;
pub mod transfer;

pub use backup::BackupDocument;
pub use error::{Result, SlotlogError};
pub use grid::SlotGrid;
pub use ledger::{ImportReport, Ledger};
pub use settings::AppSettings;
pub use stats::{Comparison, StatsRange, Summary};
pub use storage::{
    Category, DailyNote, EntryId, EntryPatch, FileStore, KeyValueStore, LogEntry, MemoryStore,
    NewEntry,
};
pub use store::{DaySlot, EntryStore, Upserted};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
