use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("kanban-{nanos}-{file_name}"))
}

fn run(store_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kanban"))
        .args(args)
        .env("KANBAN_STORE_PATH", store_path)
        .env("KANBAN_CONFIG_PATH", store_path.with_extension("config.json"))
        .output()
        .expect("failed to run kanban")
}

fn seeded(file_name: &str) -> PathBuf {
    let store_path = temp_path(file_name);
    let output = run(&store_path, &["seed"]);
    assert!(output.status.success());
    store_path
}

fn read_store(store_path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(store_path).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn ids(list: &serde_json::Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|task| task["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn edit_backlog_item_onto_board_moves_it() {
    let store_path = seeded("cli-edit-promote.json");

    let output = run(&store_path, &["edit", "b1", "--status", "progress"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[INFO] Task moved from backlog to progress!"));

    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();
    assert!(ids(&stored["tasks"]).contains(&"b1".to_string()));
    assert!(!ids(&stored["backlog"]).contains(&"b1".to_string()));
    let promoted = stored["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|task| task["id"] == "b1")
        .unwrap();
    assert_eq!(promoted["title"], "Implement dark mode");
    assert_eq!(promoted["created"], "2024-01-10T00:00:00Z");
    assert_ne!(promoted["updated"], "2024-01-10T00:00:00Z");
}

#[test]
fn edit_keeps_unset_fields() {
    let store_path = seeded("cli-edit-title.json");

    let output = run(&store_path, &["edit", "2", "--title", "Fix mobile navigation", "--json"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    std::fs::remove_file(&store_path).ok();
    assert_eq!(value["task"]["title"], "Fix mobile navigation");
    assert_eq!(value["task"]["status"], "progress");
    assert_eq!(value["task"]["assignee"], "Alice Johnson");
    assert_eq!(value["notifications"][0]["message"], "Task updated successfully!");
}

#[test]
fn edit_board_task_into_backlog() {
    let store_path = seeded("cli-edit-demote.json");

    let output = run(&store_path, &["edit", "3", "--status", "backlog"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[INFO] Task moved to backlog!"));

    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();
    assert!(ids(&stored["backlog"]).contains(&"3".to_string()));
    assert_eq!(stored["tasks"].as_array().unwrap().len(), 4);
}

#[test]
fn edit_unknown_task_is_not_found() {
    let store_path = seeded("cli-edit-missing.json");

    let output = run(&store_path, &["edit", "nope", "--title", "x"]);

    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: not_found"));
}

#[test]
fn delete_twice_is_harmless() {
    let store_path = seeded("cli-delete-twice.json");

    let first = run(&store_path, &["delete", "1"]);
    assert!(first.status.success());
    let stdout = String::from_utf8_lossy(&first.stdout);
    assert!(stdout.contains("[SUCCESS] Task \"Implement user authentication\" deleted!"));

    let second = run(&store_path, &["delete", "1"]);
    assert!(second.status.success());
    assert!(String::from_utf8_lossy(&second.stdout).trim().is_empty());

    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();
    assert_eq!(stored["tasks"].as_array().unwrap().len(), 4);
    assert_eq!(stored["backlog"].as_array().unwrap().len(), 3);
}

#[test]
fn delete_backlog_item_uses_backlog_wording() {
    let store_path = seeded("cli-delete-backlog.json");

    let output = run(&store_path, &["delete", "b2"]);

    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[SUCCESS] Backlog item \"Add email notifications\" deleted!"));
    assert_eq!(ids(&stored["backlog"]), vec!["b1", "b3"]);
}

#[test]
fn show_prints_task_detail() {
    let store_path = seeded("cli-show.json");

    let output = run(&store_path, &["show", "b3"]);
    let missing = run(&store_path, &["show", "zzz"]);

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Database migration (b3)"));
    assert!(stdout.contains("Backlog"));
    assert!(stdout.contains("Database Admin"));

    assert!(!missing.status.success());
    assert!(String::from_utf8_lossy(&missing.stderr).contains("ERROR: not_found"));
}
