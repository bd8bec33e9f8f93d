// ABOUTME: Integration tests for the flotilla CLI commands.
// ABOUTME: Validates --help output and init command behavior.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn flotilla_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("flotilla"))
}

#[test]
fn help_shows_commands() {
    flotilla_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("assign"))
        .stdout(predicate::str::contains("prune"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("flotilla.yml");

    flotilla_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(config_path.exists(), "flotilla.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("fleet:"), "Config should have fleet field");
    assert!(content.contains("image:"), "Config should have image field");
    assert!(
        content.contains("FLOTILLA_API_TOKEN"),
        "Config should reference the token env var"
    );
}

#[test]
fn init_honors_fleet_and_image_flags() {
    let temp_dir = tempfile::tempdir().unwrap();

    flotilla_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--fleet", "workers", "--image", "debian-13-x64"])
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join("flotilla.yml")).unwrap();
    assert!(content.contains("fleet: workers"));
    assert!(content.contains("image: debian-13-x64"));
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("flotilla.yml");

    fs::write(&config_path, "existing: config").unwrap();

    flotilla_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn assign_without_config_reports_discovery_failure() {
    let temp_dir = tempfile::tempdir().unwrap();

    flotilla_cmd()
        .current_dir(temp_dir.path())
        .arg("assign")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn json_mode_emits_structured_errors() {
    let temp_dir = tempfile::tempdir().unwrap();

    flotilla_cmd()
        .current_dir(temp_dir.path())
        .args(["--json", "assign"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error-code\""));
}
