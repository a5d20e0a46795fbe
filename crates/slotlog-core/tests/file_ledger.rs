use std::fs;

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use tempfile::TempDir;

use slotlog_core::grid::SLOT_MILLIS;
use slotlog_core::stats::{StatsRange, UNCATEGORIZED};
use slotlog_core::time::{day_start, MILLIS_PER_HOUR};
use slotlog_core::{BackupDocument, FileStore, Ledger, NewEntry};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date")
}

fn at(hour: i64) -> i64 {
    day_start(day(), &Utc) + hour * MILLIS_PER_HOUR
}

fn open(dir: &TempDir) -> Ledger<FileStore> {
    Ledger::open(FileStore::open(dir.path()).expect("open should succeed"))
}

#[test]
fn test_entries_survive_reopen() {
    let dir = TempDir::new().expect("tempdir should succeed");
    {
        let mut ledger = open(&dir);
        ledger
            .submit(
                NewEntry::new(at(9), "standup").with_category(Some("Meetings".to_string())),
                at(12),
            )
            .expect("submit should succeed");
        ledger
            .submit_bulk(at(10), "code\ncode\nreview", Some("Work"))
            .expect("bulk should succeed");
        ledger
            .set_note(day(), "shipped the release", at(12))
            .expect("note should succeed");
    }

    let ledger = open(&dir);
    assert_eq!(ledger.store().len(), 4);
    assert_eq!(ledger.tags(), ["Work", "Meetings"]);
    assert_eq!(
        ledger.note(day()).map(|n| n.text.as_str()),
        Some("shipped the release")
    );

    let summary = ledger.stats(StatsRange::Day(day()), &Utc);
    assert_eq!(summary.total_minutes, 60);
    assert_eq!(summary.buckets[0].name, "Work");
    assert!(summary.bucket(UNCATEGORIZED).is_none());
}

#[test]
fn test_logs_document_is_sorted_on_disk() {
    let dir = TempDir::new().expect("tempdir should succeed");
    let mut ledger = open(&dir);
    for hour in [15, 9, 12] {
        ledger
            .submit(NewEntry::new(at(hour), format!("task {}", hour)), at(16))
            .expect("submit should succeed");
    }

    let raw = fs::read_to_string(dir.path().join("logs.json")).expect("logs.json should exist");
    let logs: Value = serde_json::from_str(&raw).expect("logs.json should be JSON");
    let timestamps: Vec<i64> = logs
        .as_array()
        .expect("logs should be an array")
        .iter()
        .filter_map(|entry| entry["timestamp"].as_i64())
        .collect();
    assert_eq!(timestamps, vec![at(9), at(12), at(15)]);
}

#[test]
fn test_corrupt_document_falls_back_to_default() {
    let dir = TempDir::new().expect("tempdir should succeed");
    fs::write(dir.path().join("logs.json"), "{not json").expect("write should succeed");
    fs::write(dir.path().join("settings.json"), r#"{"startHour": 99}"#)
        .expect("write should succeed");

    let mut ledger = open(&dir);
    assert!(ledger.store().is_empty());
    assert_eq!(ledger.settings().start_hour, 8);

    // The next mutation overwrites the corrupt document
    ledger
        .submit(NewEntry::new(at(9), "recover"), at(10))
        .expect("submit should succeed");
    let reopened = open(&dir);
    assert_eq!(reopened.store().len(), 1);
}

#[test]
fn test_backup_restores_into_fresh_directory() {
    let source_dir = TempDir::new().expect("tempdir should succeed");
    let mut source = open(&source_dir);
    source
        .import_text(day(), "09:00 plan #work\n09:15 email\n09:30 walk #exercise", &Utc)
        .expect("import should succeed");
    source
        .update_settings(|s| s.set_hours(7, 19))
        .expect("settings should update");
    let text = source
        .export()
        .to_json_pretty()
        .expect("export should encode");

    let target_dir = TempDir::new().expect("tempdir should succeed");
    let mut target = open(&target_dir);
    let document = BackupDocument::parse(&text).expect("backup should parse");
    target.restore(document).expect("restore should succeed");
    drop(target);

    let restored = open(&target_dir);
    assert_eq!(restored.store().len(), 3);
    assert_eq!(restored.settings().start_hour, 7);
    assert_eq!(restored.tags(), ["Exercise", "Work"]);
    assert_eq!(
        restored.clipboard_text(day(), &Utc),
        "09:00 plan\n09:15 email\n09:30 walk"
    );
    assert_eq!(
        restored
            .store()
            .at(at(9) + 2 * SLOT_MILLIS)
            .and_then(|e| e.category.as_deref()),
        Some("Exercise")
    );
}

#[test]
fn test_factory_reset_clears_directory() {
    let dir = TempDir::new().expect("tempdir should succeed");
    let mut ledger = open(&dir);
    ledger
        .submit(NewEntry::new(at(9), "x").with_category(Some("Work".to_string())), at(10))
        .expect("submit should succeed");
    ledger.factory_reset();

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .expect("read_dir should succeed")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert!(leftovers.is_empty());
}
