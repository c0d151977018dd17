//! Smoke tests for the cubridor CLI
//!
//! These tests drive the real binary over real coverage files.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use cubrir::coverage::save_binary;
use cubrir::{Coverage, Offset};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command for the cubridor binary
fn cubridor() -> Command {
    Command::cargo_bin("cubridor").expect("cubridor binary should exist")
}

/// Build a collection from (module, offsets) pairs and save it under `dir`.
fn write_cov(dir: &Path, file: &str, entries: &[(&str, &[u64])]) -> std::path::PathBuf {
    let mut coverage = Coverage::new();
    for (name, offsets) in entries {
        coverage.upsert(name, offsets.iter().copied().map(Offset::new));
    }
    let path = dir.join(file);
    save_binary(&coverage, &path).unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    cubridor()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_help_flag() {
    cubridor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("coverage"))
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("contains"));
}

#[test]
fn test_no_args_shows_help() {
    // Requires a subcommand
    cubridor().assert().failure();
}

// ============================================================================
// Set algebra over files
// ============================================================================

#[test]
fn test_merge_files() {
    let dir = TempDir::new().unwrap();
    let a = write_cov(dir.path(), "a.cov", &[("mod.exe", &[0x10, 0x20])]);
    let b = write_cov(
        dir.path(),
        "b.cov",
        &[("mod.exe", &[0x20, 0x30]), ("lib.dll", &[0x5])],
    );
    let out = dir.path().join("merged.cov");

    cubridor()
        .arg("merge")
        .arg(&a)
        .arg(&b)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("merged"))
        .stdout(predicate::str::contains("2 modules"));

    let merged = cubrir::coverage::load_binary(&out).unwrap();
    assert_eq!(merged.module_count(), 2);
    assert_eq!(merged.offset_count(), 4);
}

#[test]
fn test_diff_prints_new_coverage() {
    let dir = TempDir::new().unwrap();
    let baseline = write_cov(dir.path(), "base.cov", &[("mod.exe", &[0x10, 0x20])]);
    let current = write_cov(dir.path(), "cur.cov", &[("mod.exe", &[0x20, 0x30])]);

    cubridor()
        .arg("diff")
        .arg(&baseline)
        .arg(&current)
        .assert()
        .success()
        .stdout("mod.exe+30\n");
}

#[test]
fn test_intersect_to_file() {
    let dir = TempDir::new().unwrap();
    let a = write_cov(dir.path(), "a.cov", &[("mod.exe", &[0x10, 0x20])]);
    let b = write_cov(dir.path(), "b.cov", &[("MOD.EXE", &[0x20, 0x30])]);
    let out = dir.path().join("shared.cov");

    cubridor()
        .arg("intersect")
        .arg(&a)
        .arg(&b)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let shared = cubrir::coverage::load_binary(&out).unwrap();
    assert_eq!(shared.offset_count(), 1);
}

#[test]
fn test_symdiff_includes_unique_modules() {
    let dir = TempDir::new().unwrap();
    let a = write_cov(dir.path(), "a.cov", &[("mod.exe", &[0x10])]);
    let b = write_cov(dir.path(), "b.cov", &[("mod.exe", &[0x10]), ("lib.dll", &[0x5])]);

    cubridor()
        .arg("symdiff")
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout("lib.dll+5\n");
}

#[test]
fn test_contains_exit_codes() {
    let dir = TempDir::new().unwrap();
    let corpus = write_cov(
        dir.path(),
        "corpus.cov",
        &[("mod.exe", &[0x10, 0x20]), ("lib.dll", &[0x5])],
    );
    let redundant = write_cov(dir.path(), "old.cov", &[("MOD.EXE", &[0x10])]);
    let novel = write_cov(dir.path(), "new.cov", &[("mod.exe", &[0x99])]);

    cubridor()
        .arg("contains")
        .arg(&corpus)
        .arg(&redundant)
        .assert()
        .success()
        .stdout(predicate::str::contains("contained"));

    cubridor()
        .arg("contains")
        .arg(&corpus)
        .arg(&novel)
        .assert()
        .failure()
        .stdout(predicate::str::contains("not contained"));
}

// ============================================================================
// Export and show
// ============================================================================

#[test]
fn test_export_skips_special_offsets() {
    let dir = TempDir::new().unwrap();
    let input = write_cov(
        dir.path(),
        "run.cov",
        &[("mod.exe", &[0x10, 0x8000000000000001])],
    );
    let out = dir.path().join("run.txt");

    cubridor()
        .arg("export")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text, "mod.exe+10\n");
}

#[test]
fn test_show_summary() {
    let dir = TempDir::new().unwrap();
    let input = write_cov(dir.path(), "run.cov", &[("mod.exe", &[0x10, 0x20])]);

    cubridor()
        .arg("show")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("mod.exe"))
        .stdout(predicate::str::contains("1 modules, 2 offsets"));
}

#[test]
fn test_show_json_round_trips() {
    let dir = TempDir::new().unwrap();
    let input = write_cov(dir.path(), "run.cov", &[("mod.exe", &[0x10])]);

    let output = cubridor()
        .arg("show")
        .arg(&input)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: Coverage = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed.offset_count(), 1);
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_corrupt_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.cov");
    fs::write(&path, [1u8, 2, 3]).unwrap();

    cubridor()
        .arg("show")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn test_missing_file_is_reported() {
    cubridor()
        .arg("show")
        .arg("/nonexistent/run.cov")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
