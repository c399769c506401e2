use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("kanban-{nanos}-{file_name}"))
}

fn run_interactive(input: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_kanban");
    let store_path = temp_path("cli-interactive.json");

    let mut child = Command::new(exe)
        .env("KANBAN_STORE_PATH", &store_path)
        .env("KANBAN_CONFIG_PATH", store_path.with_extension("config.json"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interactive session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    let output = child
        .wait_with_output()
        .expect("failed to read interactive output");

    std::fs::remove_file(&store_path).ok();
    output
}

#[test]
fn interactive_help_prints_usage() {
    let output = run_interactive("help\nexit\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
}

#[test]
fn interactive_invalid_command_reports_error_and_continues() {
    let output = run_interactive("burndown\nreports\nexit\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR:"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total Tasks: 0"));
}

#[test]
fn interactive_session_keeps_notifications() {
    let output = run_interactive(
        "create \"Session task\"\ncreate \"Later\" --status backlog\nnotifications\nexit\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("#1 [SUCCESS] New task created!"));
    assert!(stdout.contains("#2 [SUCCESS] New backlog item created!"));
}

#[test]
fn interactive_dismiss_removes_notification() {
    let output = run_interactive(
        "create \"Session task\"\nnotifications dismiss 1\nnotifications\nnotifications dismiss 9\nexit\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dismissed notification #1"));
    assert!(stdout.contains("No notifications"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: not_found"));
}

#[test]
fn interactive_unterminated_quote_is_reported() {
    let output = run_interactive("create \"oops\nexit\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unterminated quote"));
}

#[test]
fn interactive_seed_keeps_session_notifications() {
    let output = run_interactive(
        "create \"First\"\nseed\ncreate \"Second\"\nnotifications\nexit\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Seeded demo board: 5 board tasks, 3 backlog items"));
    assert!(stdout.contains("#1 [SUCCESS] New task created!"));
    assert!(stdout.contains("#2 [SUCCESS] New task created!"));
}

#[test]
fn interactive_toasts_show_last_three_and_clear_empties() {
    let output = run_interactive(
        "create \"one\"\ncreate \"two\"\ncreate \"three\"\ncreate \"four\" --status backlog\nnotifications toasts\nnotifications clear\nnotifications\nexit\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let toasts: Vec<&str> = stdout
        .lines()
        .filter(|line| line.starts_with('#'))
        .collect();
    assert_eq!(
        toasts,
        vec![
            "#2 [SUCCESS] New task created!",
            "#3 [SUCCESS] New task created!",
            "#4 [SUCCESS] New backlog item created!",
        ]
    );
    assert!(stdout.contains("Cleared 4 notifications"));
    assert!(stdout.trim_end().ends_with("No notifications"));
}
