use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const DAY: &str = "2024-03-15";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_slotlog"))
}

/// Isolated data directory and XDG homes for one test.
struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("config")).expect("create config home");
        std::fs::create_dir_all(root.path().join("share")).expect("create data home");
        Self { root }
    }

    fn data_dir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(bin());
        cmd.args(args)
            .env("SLOTLOG_DIR", self.data_dir())
            .env("XDG_CONFIG_HOME", self.root.path().join("config"))
            .env("XDG_DATA_HOME", self.root.path().join("share"))
            .env("TZ", "UTC")
            .env("NO_COLOR", "1")
            .env_remove("SLOTLOG_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("run slotlog")
    }

    fn run_ok(&self, args: &[&str]) -> Output {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "{:?} failed: stdout={}, stderr={}",
            args,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self.run_ok(args);
        serde_json::from_slice(&output.stdout).expect("parse json output")
    }

    fn initialized() -> Self {
        let sandbox = Self::new();
        sandbox.run_ok(&["init"]);
        sandbox
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn logged_slots(day: &Value) -> Vec<&Value> {
    day["slots"]
        .as_array()
        .expect("slots array")
        .iter()
        .filter(|slot| !slot["entry"].is_null())
        .collect()
}

fn write_file(path: &Path, contents: &str) {
    std::fs::write(path, contents).expect("write fixture");
}

#[test]
fn test_cli_init_log_day_json() {
    let sandbox = Sandbox::initialized();
    assert!(sandbox.data_dir().is_dir());
    assert!(sandbox
        .path("config")
        .join("slotlog")
        .join("config.toml")
        .exists());

    sandbox.run_ok(&["log", "09:00", "standup", "-c", "Meeting", "--date", DAY]);
    sandbox.run_ok(&["log", "09:15", "code", "review", "--date", DAY]);

    let day = sandbox.json(&["day", DAY, "--json"]);
    assert_eq!(day["date"], DAY);
    // Default grid is 08:00-20:00
    assert_eq!(day["slots"].as_array().unwrap().len(), 48);
    assert_eq!(day["slots"][0]["time"], "08:00");

    let logged = logged_slots(&day);
    assert_eq!(logged.len(), 2);
    assert_eq!(logged[0]["time"], "09:00");
    assert_eq!(logged[0]["entry"]["description"], "standup");
    assert_eq!(logged[0]["entry"]["category"], "Meeting");
    assert_eq!(logged[1]["entry"]["description"], "code review");
    assert!(logged[1]["entry"]["category"].is_null());
}

#[test]
fn test_cli_log_replaces_occupied_slot() {
    let sandbox = Sandbox::initialized();
    let first = sandbox.json(&["log", "10:30", "draft", "--date", DAY, "--json"]);
    assert!(first["replaced"].is_null());

    let second = sandbox.json(&["log", "10:30", "final", "--date", DAY, "--json"]);
    assert_eq!(second["replaced"], first["id"]);

    let day = sandbox.json(&["day", DAY, "--json"]);
    let logged = logged_slots(&day);
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0]["entry"]["description"], "final");
}

#[test]
fn test_cli_infers_category_from_recent_history() {
    let sandbox = Sandbox::initialized();
    sandbox.run_ok(&["log", "09:00", "deep", "work", "-c", "Work"]);
    let entry = sandbox.json(&["log", "09:15", "Deep", "Work", "--json"]);
    assert_eq!(entry["category"], "Work");

    let suggestions = sandbox.json(&["suggest", "deep", "--json"]);
    let suggestions = suggestions.as_array().unwrap();
    assert!(!suggestions.is_empty());
    assert!(suggestions[0]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("deep"));
}

#[test]
fn test_cli_stats_day_json() {
    let sandbox = Sandbox::initialized();
    for time in ["09:00", "09:15", "09:30"] {
        sandbox.run_ok(&["log", time, "feature", "-c", "Work", "--date", DAY]);
    }
    sandbox.run_ok(&["log", "09:45", "inbox", "--date", DAY]);
    sandbox.run_ok(&["log", "10:00", "inbox", "--date", DAY]);

    let summary = sandbox.json(&["stats", "day", DAY, "--json"]);
    assert_eq!(summary["total_minutes"], 75);
    let buckets = summary["buckets"].as_array().unwrap();
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0]["name"], "Work");
    assert_eq!(buckets[0]["minutes"], 45);
    assert_eq!(buckets[0]["percentage"], 60.0);
    assert_eq!(buckets[1]["name"], "Uncategorized");
    assert_eq!(buckets[1]["minutes"], 30);
    assert_eq!(buckets[1]["tasks"][0]["description"], "inbox");
}

#[test]
fn test_cli_stats_compare_json() {
    let sandbox = Sandbox::initialized();
    sandbox.run_ok(&["log", "09:00", "feature", "-c", "Work", "--date", DAY]);
    sandbox.run_ok(&["log", "09:00", "run", "-c", "Exercise", "--date", "2024-03-16"]);

    let comparison = sandbox.json(&["stats", "compare", DAY, "2024-03-16", "--json"]);
    let categories = comparison["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["name"], "Work");
    assert_eq!(categories[0]["delta_minutes"], -15);
    assert_eq!(categories[1]["name"], "Exercise");
    assert_eq!(categories[1]["second_minutes"], 15);
}

#[test]
fn test_cli_copy_prints_day_lines() {
    let sandbox = Sandbox::initialized();
    sandbox.run_ok(&["log", "09:15", "code", "review", "--date", DAY]);
    sandbox.run_ok(&["log", "09:00", "standup", "--date", DAY]);

    let output = sandbox.run_ok(&["copy", DAY]);
    assert_eq!(stdout(&output), "09:00 standup\n09:15 code review\n");

    let empty = sandbox.run_ok(&["copy", "2024-03-16"]);
    assert_eq!(stdout(&empty), "No entries logged for this day.\n");
}

#[test]
fn test_cli_bulk_from_file() {
    let sandbox = Sandbox::initialized();
    let file = sandbox.path("bulk.txt");
    write_file(&file, "plan\n\nwrite\nreview\n");

    let saved = sandbox.json(&[
        "bulk",
        "13:00",
        "--date",
        DAY,
        "-c",
        "Work",
        "--file",
        file.to_str().unwrap(),
        "--json",
    ]);
    let saved = saved.as_array().unwrap();
    assert_eq!(saved.len(), 3);
    assert_eq!(saved[0]["time"], "13:00");
    assert_eq!(saved[1]["description"], "write");
    assert_eq!(saved[1]["time"], "13:15");
    assert_eq!(saved[2]["time"], "13:30");
    assert!(saved.iter().all(|e| e["category"] == "Work"));
}

#[test]
fn test_cli_import_text_with_tags() {
    let sandbox = Sandbox::initialized();
    let file = sandbox.path("import.txt");
    write_file(
        &file,
        "09:00 standup #WORK\n09:20 fix login bug\nnot a line\n",
    );

    let report = sandbox.json(&[
        "import",
        file.to_str().unwrap(),
        "--date",
        DAY,
        "--json",
    ]);
    assert_eq!(report["skipped"], 1);
    let imported = report["imported"].as_array().unwrap();
    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0]["description"], "standup");
    assert_eq!(imported[0]["category"], "Work");
    // Minutes floor to the slot start
    assert_eq!(imported[1]["time"], "09:15");
}

#[test]
fn test_cli_edit_and_delete_by_prefix() {
    let sandbox = Sandbox::initialized();
    let entry = sandbox.json(&["log", "11:00", "typo", "--date", DAY, "--json"]);
    let id = entry["id"].as_str().unwrap().to_string();
    let prefix = &id[..8];

    let edited = sandbox.json(&[
        "edit",
        prefix,
        "--description",
        "fixed",
        "--category",
        "Work",
        "--json",
    ]);
    assert_eq!(edited["id"], id.as_str());
    assert_eq!(edited["description"], "fixed");
    assert_eq!(edited["category"], "Work");

    sandbox.run_ok(&["delete", prefix]);
    let day = sandbox.json(&["day", DAY, "--json"]);
    assert!(logged_slots(&day).is_empty());

    let missing = sandbox.run(&["delete", prefix]);
    assert_eq!(missing.status.code(), Some(3));
}

#[test]
fn test_cli_export_reset_restore() {
    let sandbox = Sandbox::initialized();
    sandbox.run_ok(&["log", "09:00", "standup", "-c", "Meeting", "--date", DAY]);
    sandbox.run_ok(&["note", DAY, "--set", "short day"]);

    let backup = sandbox.path("backup.json");
    sandbox.run_ok(&["export", "-o", backup.to_str().unwrap()]);
    let document: Value =
        serde_json::from_str(&std::fs::read_to_string(&backup).unwrap()).unwrap();
    assert_eq!(document["logs"].as_array().unwrap().len(), 1);

    sandbox.run_ok(&["reset", "--yes"]);
    let day = sandbox.json(&["day", DAY, "--json"]);
    assert!(logged_slots(&day).is_empty());
    assert!(day["note"].is_null());

    sandbox.run_ok(&["restore", backup.to_str().unwrap(), "--yes"]);
    let day = sandbox.json(&["day", DAY, "--json"]);
    assert_eq!(logged_slots(&day).len(), 1);
    assert_eq!(day["note"], "short day");
}

#[test]
fn test_cli_restore_rejects_invalid_backup() {
    let sandbox = Sandbox::initialized();
    sandbox.run_ok(&["log", "09:00", "keep me", "--date", DAY]);
    let bad = sandbox.path("bad.json");
    write_file(&bad, r#"{"logs": [{"id": "legacy-1", "timestamp": 1}]}"#);

    let output = sandbox.run(&["restore", bad.to_str().unwrap(), "--yes"]);
    assert_eq!(output.status.code(), Some(4));

    let day = sandbox.json(&["day", DAY, "--json"]);
    assert_eq!(logged_slots(&day).len(), 1);
}

#[test]
fn test_cli_restore_keeps_foreign_ids() {
    let sandbox = Sandbox::initialized();
    let backup = sandbox.path("legacy.json");
    write_file(
        &backup,
        r#"{"logs": [{"id": "1710000000000", "timestamp": 1710493200000, "description": "standup", "category": "Meetings"}]}"#,
    );
    sandbox.run_ok(&["restore", backup.to_str().unwrap(), "--yes"]);

    let day = sandbox.json(&["day", DAY, "--json"]);
    let logged = logged_slots(&day);
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0]["entry"]["id"], "1710000000000");
    assert_eq!(logged[0]["time"], "09:00");

    sandbox.run_ok(&["delete", "1710000000000"]);
    let day = sandbox.json(&["day", DAY, "--json"]);
    assert!(logged_slots(&day).is_empty());
}

#[test]
fn test_cli_settings_hours_shape_day() {
    let sandbox = Sandbox::initialized();
    sandbox.run_ok(&["settings", "hours", "9", "10"]);
    let day = sandbox.json(&["day", DAY, "--json"]);
    let times: Vec<&str> = day["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|slot| slot["time"].as_str().unwrap())
        .collect();
    assert_eq!(times, vec!["09:00", "09:15", "09:30", "09:45"]);

    let invalid = sandbox.run(&["settings", "hours", "25", "10"]);
    assert_eq!(invalid.status.code(), Some(4));
}

#[test]
fn test_cli_settings_categories() {
    let sandbox = Sandbox::initialized();
    sandbox.run_ok(&["settings", "add-category", "Reading", "--color", "#aabbcc"]);
    let settings = sandbox.json(&["settings", "show", "--json"]);
    let names: Vec<&str> = settings["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Reading"));

    let duplicate = sandbox.run(&["settings", "add-category", "reading"]);
    assert_eq!(duplicate.status.code(), Some(4));

    let missing = sandbox.run(&["settings", "remove-category", "Nope"]);
    assert_eq!(missing.status.code(), Some(3));
}

#[test]
fn test_cli_calendar_lists_active_days() {
    let sandbox = Sandbox::initialized();
    sandbox.run_ok(&["log", "09:00", "a", "--date", "2024-03-15"]);
    sandbox.run_ok(&["log", "09:00", "b", "--date", "2024-04-02"]);

    let all = sandbox.json(&["calendar", "--json"]);
    assert_eq!(all["dates"], serde_json::json!(["2024-03-15", "2024-04-02"]));

    let march = sandbox.json(&["calendar", "--month", "2024-03", "--json"]);
    assert_eq!(march["dates"], serde_json::json!(["2024-03-15"]));
}

#[test]
fn test_cli_missing_data_dir_message() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["day"]);

    assert_eq!(output.status.code(), Some(3));
    let err = stderr(&output);
    assert!(err.contains("No slotlog data found at"));
    assert!(err.contains(&*sandbox.data_dir().to_string_lossy()));
    assert!(err.contains("slotlog init"));
}

#[test]
fn test_cli_rejects_off_slot_time() {
    let sandbox = Sandbox::initialized();
    let output = sandbox.run(&["log", "09:10", "standup"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Invalid slot time"));
}

#[test]
fn test_cli_reset_requires_confirmation_without_tty() {
    let sandbox = Sandbox::initialized();
    sandbox.run_ok(&["log", "09:00", "standup", "--date", DAY]);

    let output = sandbox.run(&["reset"]);
    assert_eq!(output.status.code(), Some(4));
    let day = sandbox.json(&["day", DAY, "--json"]);
    assert_eq!(logged_slots(&day).len(), 1);
}

#[test]
fn test_cli_plain_output_is_tab_separated() {
    let sandbox = Sandbox::initialized();
    sandbox.run_ok(&["settings", "hours", "9", "10"]);
    sandbox.run_ok(&["log", "09:00", "standup", "-c", "Meeting", "--date", DAY]);

    let output = sandbox.run_ok(&["day", DAY]);
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("09:00\tMeeting\tstandup\t"));
    assert_eq!(lines[1], "09:15\t-\t-\t-");
}

#[test]
fn test_cli_quiet_init_suppresses_output() {
    let sandbox = Sandbox::new();
    let output = sandbox.run_ok(&["init", "--quiet"]);
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_cli_completions() {
    let output = Sandbox::new().run_ok(&["completions", "bash"]);
    assert!(stdout(&output).contains("slotlog"));
}
