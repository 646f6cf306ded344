//! Command line tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixtures_dir, temp_fixture};

/// `recsync` with an empty config directory.
fn recsync(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("recsync").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn validate_accepts_sample_session() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_fixture("sample_session.json");

    recsync(&home)
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly sync - 2020-09-13"))
        .stdout(predicate::str::contains("OK: session is valid"));
}

#[test]
fn validate_rejects_unsorted_timeline() {
    let home = TempDir::new().unwrap();

    recsync(&home)
        .arg("validate")
        .arg(fixtures_dir().join("unsorted_chat.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid session"))
        .stderr(predicate::str::contains("chat"));
}

#[test]
fn inspect_describes_each_time() {
    let home = TempDir::new().unwrap();

    recsync(&home)
        .arg("inspect")
        .arg(fixtures_dir().join("sample_session.json"))
        .args(["--at", "3", "16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#0 (0.25, 0.50)"))
        .stdout(predicate::str::contains("#2 [00:12] Ada: C"))
        .stdout(predicate::str::contains("#1 hidden"))
        .stdout(predicate::str::contains("main:    screenshare"));
}

#[test]
fn simulate_reports_corrections() {
    let home = TempDir::new().unwrap();

    recsync(&home)
        .arg("simulate")
        .arg(fixtures_dir().join("sample_session.json"))
        .args(["--offset", "3", "--skew", "0.98", "--duration", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Syncing)"))
        .stdout(predicate::str::contains("corrections:"));
}

#[test]
fn simulate_without_screenshare_passes_through() {
    let home = TempDir::new().unwrap();

    recsync(&home)
        .arg("simulate")
        .arg(fixtures_dir().join("no_screenshare.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("master only (pass-through)"))
        .stdout(predicate::str::contains("(PassThrough)"));
}

#[test]
fn simulate_rejects_zero_step() {
    let home = TempDir::new().unwrap();

    recsync(&home)
        .arg("simulate")
        .arg(fixtures_dir().join("sample_session.json"))
        .args(["--step", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--step"));
}

#[test]
fn config_path_points_into_config_home() {
    let home = TempDir::new().unwrap();

    recsync(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("recsync"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();

    recsync(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("simulate"));
}
