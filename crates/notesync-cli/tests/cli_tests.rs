//! Integration tests for the notesync binary.
//!
//! These tests run the compiled binary against a note store in a temporary
//! directory. HOME and the config directory point into the same temporary
//! directory so no user configuration leaks in.

use assert_cmd::Command;
use notesync_test_utils::TestDir;
use predicates::prelude::*;
use std::time::Duration;

const TOKEN: &str = "s3cret";

struct Env {
    dir: TestDir,
}

impl Env {
    fn new() -> Self {
        let dir = TestDir::new().with_dir("home").with_dir("notes");
        let env = Self { dir };
        env.cmd()
            .arg("init-store")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created note store"));
        env
    }

    /// Command with store and token wired through the environment
    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("notesync"));
        cmd.env("HOME", self.dir.path("home"))
            .env("XDG_CONFIG_HOME", self.dir.path("home/.config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env("NOTESYNC_STORE", self.dir.path("store"))
            .env("NOTESYNC_TOKEN", TOKEN);
        cmd
    }

    fn sync(&self, args: &[&str]) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--path").arg(self.dir.path("notes")).args(args);
        cmd
    }
}

// ============================================================================
// Sync Tests
// ============================================================================

#[test]
fn test_upload_creates_note() {
    let env = Env::new();
    env.dir.write("notes/todo.txt", "milk\n");

    env.sync(&[])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created note 'todo'"));

    env.cmd()
        .arg("notebooks")
        .assert()
        .success()
        .stdout(predicate::str::contains("notes"));
    env.dir.assert_file_exists("notes/.notes.mtime");
}

#[test]
fn test_second_run_reports_no_changes() {
    let env = Env::new();
    env.dir.write("notes/todo.txt", "milk\n");

    env.sync(&[]).assert().success();
    env.sync(&[])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already synchronized"));
}

#[test]
fn test_missing_path_fails() {
    let env = Env::new();

    env.cmd()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("--path"));

    env.cmd()
        .arg("--path")
        .arg(env.dir.path("nowhere"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory does not exist"));
}

#[test]
fn test_wrong_token_is_rejected() {
    let env = Env::new();

    env.sync(&[])
        .env("NOTESYNC_TOKEN", "guess")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Access token rejected"));
}

#[test]
fn test_missing_token_is_reported() {
    let env = Env::new();

    env.sync(&[])
        .env_remove("NOTESYNC_TOKEN")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No access token"));
}

#[test]
fn test_dry_run_changes_nothing() {
    let env = Env::new();
    env.dir.write("notes/todo.txt", "milk\n");

    env.sync(&["--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] Would create note 'todo'"));

    env.dir.assert_file_not_exists("notes/.notes.mtime");
    env.cmd()
        .arg("notebooks")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notebooks"));
}

#[test]
fn test_json_report_is_parseable() {
    let env = Env::new();
    env.dir.write("notes/todo.txt", "milk\n");

    let output = env.sync(&["--json", "-t"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["notebook"], "notes");
    assert_eq!(report["policy"], "two-way");
    assert_eq!(report["updated"][0], "todo");
}

#[test]
fn test_all_downloads_every_notebook() {
    let env = Env::new();
    env.dir.write("notes/todo.txt", "milk\n");
    env.sync(&["-n", "Home"]).assert().success();
    env.sync(&["-n", "Work"]).assert().success();
    std::fs::create_dir_all(env.dir.path("mirror")).unwrap();

    env.cmd()
        .arg("--path")
        .arg(env.dir.path("mirror"))
        .args(["--all", "-w", "down"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Home"))
        .stdout(predicate::str::contains("Work"));

    env.dir.assert_file_contains("mirror/Home/todo.txt", "milk");
    env.dir.assert_file_contains("mirror/Work/todo.txt", "milk");
}

#[test]
fn test_conflict_is_reported_without_failing() {
    let env = Env::new();
    env.dir.write("notes/todo.txt", "milk\n");
    std::fs::create_dir_all(env.dir.path("other")).unwrap();

    env.sync(&["-t"]).assert().success();
    env.cmd()
        .arg("--path")
        .arg(env.dir.path("other"))
        .args(["-n", "notes", "-w", "down"])
        .assert()
        .success();

    std::thread::sleep(Duration::from_millis(20));
    env.dir.write("other/todo.txt", "milk\nbread\n");
    env.cmd()
        .arg("--path")
        .arg(env.dir.path("other"))
        .args(["-n", "notes"])
        .assert()
        .success();
    env.dir.write("notes/todo.txt", "milk\neggs\n");

    env.sync(&["-t"])
        .arg("--logpath")
        .arg(env.dir.path("logs/conflict.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("CONFLICT"))
        .stdout(predicate::str::contains("--merged"));
    env.dir.assert_file_contains("notes/.todo.txt.rej", "bread");
    env.dir.assert_file_contains("notes/todo.txt", "eggs");
    env.dir.assert_file_contains("logs/conflict.log", "WARN");
    env.dir.assert_file_contains("logs/conflict.log", "name=todo");
}

// ============================================================================
// Logging Tests
// ============================================================================

#[test]
fn test_log_file_is_written() {
    let env = Env::new();
    env.dir.write("notes/todo.txt", "milk\n");
    let log = env.dir.path("logs/sync.log");

    env.sync(&[]).arg("--logpath").arg(&log).assert().success();

    env.dir.assert_file_contains("logs/sync.log", "Sync pass complete");
}

#[test]
fn test_verbose_logs_to_console() {
    let env = Env::new();

    env.sync(&["-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting sync pass"));
}

#[test]
fn test_custom_log_path_removes_empty_default_log() {
    let env = Env::new();
    env.dir.write("home/notesync.log", "");

    env.sync(&[])
        .arg("--logpath")
        .arg(env.dir.path("logs/sync.log"))
        .assert()
        .success();

    env.dir.assert_file_not_exists("home/notesync.log");
    env.dir.assert_file_exists("logs/sync.log");
}

#[test]
fn test_custom_log_path_keeps_non_empty_default_log() {
    let env = Env::new();
    env.dir.write("home/notesync.log", "earlier run\n");

    env.sync(&[])
        .arg("--logpath")
        .arg(env.dir.path("logs/sync.log"))
        .assert()
        .success();

    env.dir.assert_file_contains("home/notesync.log", "earlier run");
}

#[test]
fn test_default_log_goes_to_home() {
    let env = Env::new();
    env.sync(&[]).assert().success();
    env.dir.assert_file_exists("home/notesync.log");
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn test_config_file_supplies_store_and_format() {
    let env = Env::new();
    env.dir.write("notes/plan.md", "# Plan\n");
    env.dir.write(
        "notesync.toml",
        format!(
            "[remote]\nstore = {:?}\ntoken = {:?}\n\n[sync]\nmask = \"*.md\"\nformat = \"markdown\"\n",
            env.dir.path("store").display().to_string(),
            TOKEN
        ),
    );

    env.sync(&[])
        .env_remove("NOTESYNC_STORE")
        .env_remove("NOTESYNC_TOKEN")
        .arg("--config")
        .arg(env.dir.path("notesync.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Created note 'plan'"));
}

#[test]
fn test_missing_config_file_fails() {
    let env = Env::new();

    env.sync(&[])
        .arg("--config")
        .arg(env.dir.path("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
