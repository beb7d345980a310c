//! Integration tests for CLI commands.
//!
//! Every test points `--config` at a temporary file so the user's real
//! configuration is never read or written.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// Get a Command for the nmt-workbench binary
fn workbench() -> Command {
    Command::cargo_bin("nmt-workbench").unwrap()
}

/// A config with instant simulated engines.
fn fast_config() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[translation]\nsimulated_delay_ms = 0\n\n[training]\nsimulated_duration_ms = 0\n",
    )
    .unwrap();
    dir
}

fn config_arg(dir: &Path) -> String {
    dir.join("config.toml").display().to_string()
}

#[test]
fn test_help_command() {
    workbench()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("English/Spanish translation workbench"))
        .stdout(predicate::str::contains("translate"))
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("shell"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    workbench()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nmt-workbench"));
}

#[test]
fn test_config_show_creates_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    workbench()
        .args(["--config", &path.display().to_string(), "config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("simulated_delay_ms = 1000"))
        .stdout(predicate::str::contains("translation.txt"));
    assert!(path.exists());
}

#[test]
fn test_config_set_language() {
    let dir = fast_config();
    workbench()
        .args(["--config", &config_arg(dir.path()), "config", "--language", "es"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration updated"));

    let saved = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("language = \"spanish\""));
}

#[test]
fn test_config_rejects_unknown_engine() {
    let dir = fast_config();
    workbench()
        .args(["--config", &config_arg(dir.path()), "config", "--engine", "deepl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown translation engine"));
}

#[test]
fn test_translate_text() {
    let dir = fast_config();
    workbench()
        .args(["--config", &config_arg(dir.path()), "translate", "Hola"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Translated: Hola"))
        .stderr(predicate::str::contains("Translation completed successfully!"));
}

#[test]
fn test_translate_blank_input_fails() {
    let dir = fast_config();
    workbench()
        .args(["--config", &config_arg(dir.path()), "translate", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter text to translate."));
}

#[test]
fn test_translate_file_and_download() {
    let dir = fast_config();
    let input = dir.path().join("input.txt");
    fs::write(&input, [0x61, 0xf1, 0x6f]).unwrap();
    let out_dir = dir.path().join("out");

    workbench()
        .args(["--config", &config_arg(dir.path()), "translate", "--file"])
        .arg(&input)
        .args(["--encoding", "windows-1252", "--download", "--output-dir"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Translated: año"))
        .stderr(predicate::str::contains("Translation downloaded!"));

    let saved = fs::read_to_string(out_dir.join("translation.txt")).unwrap();
    assert_eq!(saved, "Translated: año");
}

#[test]
fn test_translate_missing_file_fails() {
    let dir = fast_config();
    workbench()
        .args(["--config", &config_arg(dir.path()), "translate", "--file"])
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure();
}

#[test]
fn test_train() {
    let dir = fast_config();
    workbench()
        .args(["--config", &config_arg(dir.path()), "train"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Training process started"))
        .stderr(predicate::str::contains("Model training completed successfully!"));
}

#[test]
fn test_shell_session() {
    let dir = fast_config();
    workbench()
        .args(["--config", &config_arg(dir.path()), "shell"])
        .write_stdin("Hola\n:lang es\n:status\n:clear\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("language: spanish -> english"))
        .stdout(predicate::str::contains("input:    4 chars"))
        .stderr(predicate::str::contains("Input cleared!"));
}
