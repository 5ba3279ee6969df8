//! Integration tests for the easypack CLI binary.
//!
//! These tests exercise the compiled binary end-to-end using `assert_cmd`.
//! Fixture projects are created in temp directories with `tempfile`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write an easypack.yaml with the given body into `dir`.
fn write_config(dir: &Path, body: &str) {
    fs::write(dir.join("easypack.yaml"), body).unwrap();
}

/// Build a `Command` for the easypack binary, running inside `dir`.
fn easypack_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("easypack");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("EASYPACK_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ---------------------------------------------------------------------------
// Basic CLI tests
// ---------------------------------------------------------------------------

#[test]
fn test_help_output() {
    let dir = TempDir::new().unwrap();
    easypack_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("easypack"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    easypack_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("easypack"));
}

#[test]
fn test_completion_bash() {
    let dir = TempDir::new().unwrap();
    easypack_cmd(dir.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("easypack"));
}

#[test]
fn test_generate_without_config_fails() {
    let dir = TempDir::new().unwrap();
    easypack_cmd(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find easypack.yaml"));
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_config() {
    let dir = TempDir::new().unwrap();
    easypack_cmd(dir.path())
        .args(["init", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created:"));

    let content = fs::read_to_string(dir.path().join("easypack.yaml")).unwrap();
    assert!(content.contains("name: \"demo\""));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "name: keep\n");
    easypack_cmd(dir.path())
        .args(["init", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let content = fs::read_to_string(dir.path().join("easypack.yaml")).unwrap();
    assert_eq!(content, "name: keep\n");
}

#[test]
fn test_init_then_generate() {
    let dir = TempDir::new().unwrap();
    easypack_cmd(dir.path())
        .args(["init", "demo"])
        .assert()
        .success();
    easypack_cmd(dir.path())
        .arg("generate")
        .assert()
        .success();

    let out = dir.path().join("target/bin");
    assert_eq!(listing(&out), vec!["start.bat", "start.sh"]);
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn test_generate_linux_only() {
    let dir = TempDir::new().unwrap();
    write_config(
        dir.path(),
        "name: app\nopts: -Xmx512m\nargs: --port 8080\nplatforms: linux\noutput: out\n",
    );

    easypack_cmd(dir.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATED"))
        .stdout(predicate::str::contains("SUCCESS"));

    let out = dir.path().join("out");
    assert_eq!(listing(&out), vec!["start.sh"]);
    let script = fs::read_to_string(out.join("start.sh")).unwrap();
    assert!(script.starts_with("#!/bin/sh\n"));
    assert!(script.contains("java -Xmx512m -jar app.jar --port 8080\n"));
}

#[test]
fn test_generate_windows_uses_crlf() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "name: app\nplatforms: windows\n");

    easypack_cmd(dir.path()).arg("gen").assert().success();

    let script = fs::read_to_string(dir.path().join("target/bin/start.bat")).unwrap();
    assert!(script.starts_with("@echo off\r\n"));
    assert!(script.ends_with("java -jar app.jar\r\n"));
}

#[test]
fn test_generate_with_shutdown() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "name: app\nshutdown: true\n");

    easypack_cmd(dir.path()).arg("generate").assert().success();

    let out = dir.path().join("target/bin");
    assert_eq!(listing(&out), vec!["shutdown.sh", "start.bat", "start.sh"]);
    let script = fs::read_to_string(out.join("shutdown.sh")).unwrap();
    assert!(script.contains("pgrep -f"));
}

#[test]
fn test_generate_no_shutdown_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "name: app\nshutdown: true\nplatforms: linux\n");

    easypack_cmd(dir.path())
        .args(["generate", "--no-shutdown"])
        .assert()
        .success();

    assert_eq!(listing(&dir.path().join("target/bin")), vec!["start.sh"]);
}

#[test]
fn test_generate_with_name_flag_needs_no_config() {
    let dir = TempDir::new().unwrap();
    easypack_cmd(dir.path())
        .args(["generate", "--name", "svc", "-p", "linux", "--opts", "-Xms64m"])
        .assert()
        .success();

    let script = fs::read_to_string(dir.path().join("target/bin/start.sh")).unwrap();
    assert!(script.contains("java -Xms64m -jar svc.jar"));
}

#[test]
fn test_generate_unknown_platform_fails() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "name: app\nplatforms: linux, macos\n");

    easypack_cmd(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported platform 'macos'"));

    assert!(!dir.path().join("target/bin").exists());
}

#[test]
fn test_generate_unknown_echo_fails() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "name: app\necho: loud\n");

    easypack_cmd(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown echo mode 'loud'"));
}

#[test]
fn test_generate_echo_all() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "name: app\necho: all\n");

    easypack_cmd(dir.path()).arg("generate").assert().success();

    let out = dir.path().join("target/bin");
    let linux = fs::read_to_string(out.join("start.sh")).unwrap();
    assert!(linux.contains("\nset -x\n"));
    let windows = fs::read_to_string(out.join("start.bat")).unwrap();
    assert!(windows.starts_with("@echo on\r\n"));
}

#[test]
fn test_generate_merges_pre_start_fragment() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("bin")).unwrap();
    fs::write(dir.path().join("bin/start-linux"), "export APP_ENV=prod\n").unwrap();
    write_config(dir.path(), "name: app\nplatforms: linux\n");

    easypack_cmd(dir.path()).arg("generate").assert().success();

    let script = fs::read_to_string(dir.path().join("target/bin/start.sh")).unwrap();
    let fragment = script.find("export APP_ENV=prod").unwrap();
    let launch = script.find("java -jar app.jar").unwrap();
    assert!(fragment < launch);
}

#[test]
fn test_generate_wipes_stale_files() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("target/bin");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("old.sh"), "stale").unwrap();
    write_config(dir.path(), "name: app\nplatforms: linux\n");

    easypack_cmd(dir.path()).arg("generate").assert().success();

    assert_eq!(listing(&out), vec!["start.sh"]);
}

#[test]
fn test_generate_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "name: app\n");

    easypack_cmd(dir.path())
        .args(["generate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("start.sh (linux)"))
        .stdout(predicate::str::contains("start.bat (windows)"))
        .stdout(predicate::str::contains("java -jar app.jar"))
        .stdout(predicate::str::contains("DRY RUN"));

    assert!(!dir.path().join("target").exists());
}

#[test]
fn test_generate_json_output() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "name: app\nplatforms: linux\nshutdown: true\n");

    let output = easypack_cmd(dir.path())
        .args(["generate", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = report["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["kind"], "start");
    assert_eq!(files[0]["platform"], "linux");
    assert_eq!(files[1]["kind"], "shutdown");
}

#[test]
fn test_generate_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("project");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("custom.yaml"), "name: app\nplatforms: linux\n").unwrap();

    easypack_cmd(dir.path())
        .args(["--config", "project/custom.yaml", "generate"])
        .assert()
        .success();

    // Output is relative to the config file's directory
    assert!(project.join("target/bin/start.sh").exists());
}
