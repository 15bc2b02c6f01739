//! Corruption recovery tests for the setlog binary.
//!
//! These tests verify the system can handle:
//! - Corrupted table rows
//! - Missing table files
//! - Partial writes

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write as IoWrite;
use tempfile::TempDir;

const DATE: &str = "2024-03-15";

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("setlog"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn seed(data_dir: &std::path::Path) {
    cli()
        .arg("seed")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();
}

fn add_set(data_dir: &std::path::Path, weight: &str, reps: &str) {
    cli()
        .args(["add", "--exercise", "bench_press", "--date", DATE])
        .args(["--weight", weight, "--reps", reps])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();
}

#[test]
fn test_missing_tables_read_as_empty() {
    let temp_dir = setup_test_dir();

    // No seed, no store files at all
    cli()
        .args(["sets", "--exercise", "bench_press", "--date", DATE])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no sets recorded"));
}

#[test]
fn test_corrupted_set_row_is_skipped() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());
    add_set(temp_dir.path(), "135", "10");

    // Append garbage to the sets table (invalid JSON line)
    let sets_path = temp_dir.path().join("store/sets.jsonl");
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&sets_path)
        .unwrap();
    writeln!(file, "{{ invalid json }}}}").unwrap();

    // The good row still reads; the corrupted line is logged and skipped
    cli()
        .args(["sets", "--exercise", "bench_press", "--date", DATE])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("135.0"));
}

#[test]
fn test_torn_trailing_row_is_skipped() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());
    add_set(temp_dir.path(), "135", "10");

    // Simulate a torn write: truncated row with no trailing newline
    let sets_path = temp_dir.path().join("store/sets.jsonl");
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&sets_path)
        .unwrap();
    write!(file, "{{\"id\":\"trunc").unwrap();
    drop(file);

    // The complete row still reads; the torn tail is logged and skipped
    cli()
        .args(["sets", "--exercise", "bench_press", "--date", DATE])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("135.0"));
}

#[test]
fn test_corrupted_catalog_row_is_skipped() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    let categories_path = temp_dir.path().join("store/categories.jsonl");
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&categories_path)
        .unwrap();
    writeln!(file, "not json at all").unwrap();

    cli()
        .arg("categories")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Chest"));
}

#[test]
fn test_update_survives_corrupted_neighbor_row() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());
    add_set(temp_dir.path(), "135", "10");

    let sets_path = temp_dir.path().join("store/sets.jsonl");
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&sets_path)
        .unwrap();
    writeln!(file, "{{ invalid json }}}}").unwrap();
    drop(file);

    // The rewrite drops the corrupted line along the way
    cli()
        .args(["update", "--exercise", "bench_press", "--date", DATE])
        .args(["--index", "0", "--weight", "155", "--reps", "6"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("155.0"));

    let contents = fs::read_to_string(&sets_path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("155.0"));
}
