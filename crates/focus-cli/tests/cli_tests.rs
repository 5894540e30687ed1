//! Integration tests for the `focus` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the suggest and
//! free subcommands through the actual binary, including stdin piping, file
//! output, clamping, fallback to tomorrow, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the events.json fixture (overlapping 10:00-12:00 meetings).
fn events_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/events.json")
}

/// Helper: path to the booked.json fixture (09:00-17:00 offsite).
fn booked_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/booked.json")
}

/// Helper: run the binary and parse stdout as JSON.
fn run_json(args: &[&str]) -> serde_json::Value {
    let output = Command::cargo_bin("focus")
        .unwrap()
        .args(args)
        .output()
        .expect("focus should run");
    assert!(
        output.status.success(),
        "focus failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// Suggest subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn suggest_first_hour_of_the_day() {
    let json = run_json(&[
        "suggest",
        "-i",
        events_path(),
        "--now",
        "2026-03-02T08:00:00Z",
    ]);

    assert_eq!(json["ok"], true);
    assert_eq!(json["suggestion"]["start"], "2026-03-02T09:00:00Z");
    assert_eq!(json["suggestion"]["end"], "2026-03-02T10:00:00Z");
    assert_eq!(
        json["suggestion"]["reason"],
        "Best 60-min focus window based on your calendar."
    );
}

#[test]
fn suggest_skips_past_and_busy_time() {
    // At 09:30 only 30 minutes remain before the meetings; next fit is 12:00.
    let json = run_json(&[
        "suggest",
        "-i",
        events_path(),
        "--now",
        "2026-03-02T09:30:00Z",
        "--duration",
        "45",
    ]);

    assert_eq!(json["suggestion"]["start"], "2026-03-02T12:00:00Z");
    assert_eq!(json["suggestion"]["end"], "2026-03-02T12:45:00Z");
}

#[test]
fn suggest_clamps_duration() {
    let json = run_json(&[
        "suggest",
        "-i",
        booked_path(),
        "--now",
        "2026-03-02T08:00:00Z",
        "--duration",
        "600",
    ]);

    // Clamped to 240 and pushed to tomorrow.
    assert_eq!(json["suggestion"]["start"], "2026-03-03T09:00:00Z");
    assert_eq!(json["suggestion"]["end"], "2026-03-03T13:00:00Z");
    assert_eq!(
        json["suggestion"]["reason"],
        "No slot today — suggesting tomorrow. Best 240-min focus window based on your calendar."
    );
}

#[test]
fn suggest_reads_events_from_stdin() {
    let events = std::fs::read_to_string(events_path()).unwrap();

    Command::cargo_bin("focus")
        .unwrap()
        .args(["suggest", "--now", "2026-03-02T08:00:00Z"])
        .write_stdin(events)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ok\": true"))
        .stdout(predicate::str::contains("2026-03-02T09:00:00Z"));
}

#[test]
fn suggest_accepts_event_timestamps_without_offset() {
    Command::cargo_bin("focus")
        .unwrap()
        .args(["suggest", "--now", "2026-03-02T08:00:00Z"])
        .write_stdin(r#"[{"start": "2026-03-02T09:00:00", "end": "2026-03-02T10:30:00"}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"start\": \"2026-03-02T10:30:00Z\""));
}

#[test]
fn suggest_reports_no_slot_when_hours_are_full() {
    // One-hour working day, fully booked today and too short for 90 min tomorrow.
    let json = run_json(&[
        "suggest",
        "-i",
        booked_path(),
        "--now",
        "2026-03-02T08:00:00Z",
        "--duration",
        "90",
        "--start-hour",
        "9",
        "--end-hour",
        "10",
    ]);

    assert_eq!(json["ok"], false);
    assert_eq!(
        json["reason"],
        "No open block in today/tomorrow work hours. Try a shorter duration or widen hours."
    );
}

#[test]
fn suggest_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("suggestion.json");

    Command::cargo_bin("focus")
        .unwrap()
        .args([
            "suggest",
            "-i",
            events_path(),
            "--now",
            "2026-03-02T08:00:00Z",
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).expect("output file must exist");
    assert!(content.contains("suggestion"));
}

#[test]
fn suggest_rejects_inverted_hours() {
    Command::cargo_bin("focus")
        .unwrap()
        .args([
            "suggest",
            "-i",
            events_path(),
            "--start-hour",
            "17",
            "--end-hour",
            "9",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid working hours"));
}

#[test]
fn suggest_rejects_unknown_timezone() {
    Command::cargo_bin("focus")
        .unwrap()
        .args(["suggest", "-i", events_path(), "--timezone", "Nowhere/City"])
        .assert()
        .failure();
}

#[test]
fn suggest_invalid_events_json_fails() {
    Command::cargo_bin("focus")
        .unwrap()
        .args(["suggest", "--now", "2026-03-02T08:00:00Z"])
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse events JSON"));
}

#[test]
fn suggest_invalid_now_fails() {
    Command::cargo_bin("focus")
        .unwrap()
        .args(["suggest", "-i", events_path(), "--now", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid datetime"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Free subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_merges_overlapping_meetings() {
    let json = run_json(&[
        "free",
        "-i",
        events_path(),
        "--from",
        "2026-03-02T09:00:00Z",
        "--to",
        "2026-03-02T17:00:00Z",
    ]);

    let free = json.as_array().expect("free intervals array");
    assert_eq!(free.len(), 2);
    assert_eq!(free[0]["start"], "2026-03-02T09:00:00Z");
    assert_eq!(free[0]["end"], "2026-03-02T10:00:00Z");
    assert_eq!(free[1]["start"], "2026-03-02T12:00:00Z");
    assert_eq!(free[1]["end"], "2026-03-02T17:00:00Z");
}

#[test]
fn free_accepts_naive_timestamps_as_utc() {
    let json = run_json(&[
        "free",
        "-i",
        booked_path(),
        "--from",
        "2026-03-02T08:00:00",
        "--to",
        "2026-03-02T18:00:00",
    ]);

    let free = json.as_array().unwrap();
    assert_eq!(free.len(), 2);
    assert_eq!(free[0]["end"], "2026-03-02T09:00:00Z");
    assert_eq!(free[1]["start"], "2026-03-02T17:00:00Z");
}

#[test]
fn free_rejects_inverted_window() {
    Command::cargo_bin("focus")
        .unwrap()
        .args([
            "free",
            "-i",
            events_path(),
            "--from",
            "2026-03-02T17:00:00Z",
            "--to",
            "2026-03-02T09:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from must be before --to"));
}

#[test]
fn missing_subcommand_shows_usage() {
    Command::cargo_bin("focus")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
