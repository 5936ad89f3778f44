use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("rcbench").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rcbench 0.1.0"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("rcbench").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Read-chunk throughput benchmark"));
}

#[test]
fn test_plot_requires_inputs() {
    let mut cmd = Command::cargo_bin("rcbench").unwrap();
    cmd.arg("plot").assert().failure();
}

#[test]
fn test_plot_rejects_pair_without_separator() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("rcbench").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("plot")
        .arg("badinput")
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidPlotInput"));
}

#[test]
fn test_measure_fails_for_missing_player() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("rcbench").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("RCBENCH_PLAYER", "/does/not/exist/mpv")
        .arg("measure")
        .arg("smb://host/bigfile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PlayerSpawn"));
}

/// Installs a stand-in player script that sleeps briefly and exits non-zero,
/// so every trial stops after a single attempt.
fn install_failing_player(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("fake-mpv");
    fs::write(&path, "#!/bin/sh\nsleep 0.01\nexit 3\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_measure_writes_complete_file_with_failing_player() {
    let temp_dir = TempDir::new().unwrap();
    let player = install_failing_player(temp_dir.path());

    let mut cmd = Command::cargo_bin("rcbench").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("RCBENCH_PLAYER", &player)
        .timeout(std::time::Duration::from_secs(120))
        .arg("measure")
        .arg("smb://host/bigfile")
        .assert()
        .success()
        .stdout(predicate::str::contains("smb_host_bigfile_11_14"));

    let contents = fs::read_to_string(temp_dir.path().join("smb_host_bigfile_11_14")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    // Header plus npow * cycles records.
    assert_eq!(lines.len(), 1 + 14 * 10);
    assert_eq!(lines[0], "read-chunk kbps");
    assert!(lines[1].starts_with("2048 "));
}

#[test]
fn test_plot_renders_png_from_measurements() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["a", "b"] {
        fs::write(
            temp_dir.path().join(name),
            "read-chunk kbps\n2048 120.5\n4096 210.0\n8192 333.3\n",
        )
        .unwrap();
    }

    let mut cmd = Command::cargo_bin("rcbench").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("plot")
        .arg("a=lan")
        .arg("b=wifi")
        .assert()
        .success()
        .stdout(predicate::str::contains("lan.wifi.png"));

    assert!(temp_dir.path().join("lan.wifi.png").exists());
}
