//! Integration tests for the setlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Seeding and the category/exercise drill-down
//! - The add/update/delete set workflow
//! - History and CSV export
//! - The date strip

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const DATE: &str = "2024-03-15";

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("setlog"))
}

/// Seed the store under `data_dir` with the default catalog
fn seed(data_dir: &std::path::Path) {
    cli()
        .arg("seed")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded"));
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weight training set tracker"));
}

#[test]
fn test_categories_on_empty_store() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("categories")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("empty store"));
}

#[test]
fn test_seed_then_categories() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    cli()
        .arg("categories")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Chest"))
        .stdout(predicate::str::contains("Legs"));
}

#[test]
fn test_seed_refuses_populated_store() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    cli()
        .arg("seed")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not seeding"));
}

#[test]
fn test_exercises_lists_chosen_category() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    cli()
        .args(["exercises", "--category", "chest"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Barbell Bench Press"))
        .stdout(predicate::str::contains("bench_press"));
}

#[test]
fn test_exercises_unknown_category_fails() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    cli()
        .args(["exercises", "--category", "cardio"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn test_add_shows_session_in_add_mode() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    cli()
        .args(["add", "--exercise", "bench_press", "--date", DATE])
        .args(["--weight", "135", "--reps", "10"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged 135.0 lbs x 10"))
        .stdout(predicate::str::contains("Mode: add"));
}

#[test]
fn test_sets_are_listed_heaviest_first() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    for (weight, reps) in [("100", "10"), ("120", "5"), ("110", "8")] {
        cli()
            .args(["add", "--exercise", "bench_press", "--date", DATE])
            .args(["--weight", weight, "--reps", reps])
            .arg("--data-dir")
            .arg(temp_dir.path())
            .assert()
            .success();
    }

    let output = cli()
        .args(["sets", "--exercise", "bench_press", "--date", DATE])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .output()
        .expect("run sets");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let heavy = stdout.find("120.0").expect("120.0 in output");
    let mid = stdout.find("110.0").expect("110.0 in output");
    let light = stdout.find("100.0").expect("100.0 in output");
    assert!(heavy < mid && mid < light, "rows out of order:\n{stdout}");
}

#[test]
fn test_update_rewrites_row_by_index() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    cli()
        .args(["add", "--exercise", "bench_press", "--date", DATE])
        .args(["--weight", "135", "--reps", "10"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .args(["update", "--exercise", "bench_press", "--date", DATE])
        .args(["--index", "0", "--weight", "155", "--reps", "6"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated set 0"))
        .stdout(predicate::str::contains("155.0"))
        .stdout(predicate::str::contains("Mode: add"));
}

#[test]
fn test_update_out_of_range_index_fails() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    cli()
        .args(["update", "--exercise", "bench_press", "--date", DATE])
        .args(["--index", "3", "--weight", "155", "--reps", "6"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no set at index 3"));
}

#[test]
fn test_delete_removes_row_by_index() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    cli()
        .args(["add", "--exercise", "bench_press", "--date", DATE])
        .args(["--weight", "135", "--reps", "10"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .args(["delete", "--exercise", "bench_press", "--date", DATE])
        .args(["--index", "0"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted set 0"))
        .stdout(predicate::str::contains("no sets recorded"));
}

#[test]
fn test_add_persists_row_to_store() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    cli()
        .args(["add", "--exercise", "bench_press", "--date", DATE])
        .args(["--weight", "135", "--reps", "10"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let sets_file = temp_dir.path().join("store").join("sets.jsonl");
    let contents = fs::read_to_string(&sets_file).expect("read sets table");
    let rows: Vec<Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid row"))
        .collect();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["exercise_id"], "bench_press");
    assert_eq!(rows[0]["date"], DATE);
    assert_eq!(rows[0]["weight"], 135.0);
}

#[test]
fn test_history_spans_dates_newest_first() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    for (date, weight) in [("2024-03-01", "100"), ("2024-03-15", "110")] {
        cli()
            .args(["add", "--exercise", "bench_press", "--date", date])
            .args(["--weight", weight, "--reps", "10"])
            .arg("--data-dir")
            .arg(temp_dir.path())
            .assert()
            .success();
    }

    let output = cli()
        .args(["history", "--exercise", "bench_press"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .output()
        .expect("run history");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let newer = stdout.find("2024-03-15").expect("newer date in output");
    let older = stdout.find("2024-03-01").expect("older date in output");
    assert!(newer < older, "history out of order:\n{stdout}");
}

#[test]
fn test_export_writes_csv() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    cli()
        .args(["add", "--exercise", "bench_press", "--date", DATE])
        .args(["--weight", "135", "--reps", "10"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let out = temp_dir.path().join("bench_press.csv");
    cli()
        .args(["export", "--exercise", "bench_press"])
        .arg("--out")
        .arg(&out)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 sets"));

    let csv = fs::read_to_string(&out).expect("read exported csv");
    assert!(csv.starts_with("date,weight,reps,set_id"));
    assert!(csv.contains(DATE));
}

#[test]
fn test_dates_strip_centers_on_today() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["dates", "--around", "2"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("page  5000"))
        .stdout(predicate::str::contains("10000 pages total"));
}

#[test]
fn test_dates_strip_clamps_to_both_ends() {
    let temp_dir = setup_test_dir();

    // Asking for more room than the strip has must not walk off either end
    let output = cli()
        .args(["dates", "--around", "5000"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .output()
        .expect("run dates");
    assert!(
        output.status.success(),
        "dates failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(stdout.contains("page  9999"), "missing last page");
    assert!(!stdout.contains("page 10000"), "walked past the strip");
}

#[test]
fn test_default_command_is_categories() {
    let temp_dir = setup_test_dir();
    seed(temp_dir.path());

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CATEGORIES"));
}
