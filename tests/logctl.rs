//! Process-boundary tests for the `logctl` binary.
//!
//! Escalating severities end the process, so they are exercised here through
//! real child processes rather than in-process hooks.

use assert_cmd::Command;
use serde_json::Value as Json;

fn logctl() -> Command {
    Command::new(env!("CARGO_BIN_EXE_logctl"))
}

fn stdout_records(output: &std::process::Output) -> Vec<Json> {
    String::from_utf8(output.stdout.clone())
        .expect("stdout is UTF-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("json record"))
        .collect()
}

// ============================================================================
// Record Tests
// ============================================================================

/// Verifies a debug JSON record with one pair reaches stdout.
#[test]
fn json_debug_record_on_stdout() {
    let output = logctl()
        .args(["--log.level", "debug", "--log.format", "json", "debug", "hello", "k=v"])
        .output()
        .expect("run logctl");

    assert!(output.status.success());
    let records = stdout_records(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "debug");
    assert_eq!(records[0]["msg"], "hello");
    assert_eq!(records[0]["k"], "v");
}

/// Verifies default options write an info console line to stdout.
#[test]
fn default_options_write_console_info() {
    let output = logctl().args(["info", "n=3"]).output().expect("run logctl");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    let columns: Vec<&str> = stdout.trim_end().split('\t').collect();
    assert_eq!(columns[1], "info");
    assert_eq!(columns[3], "n=3");
}

/// Verifies debug records are dropped at the default level.
#[test]
fn default_level_filters_debug() {
    let output = logctl().args(["debug", "quiet"]).output().expect("run logctl");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

/// Verifies an unknown level falls back to info instead of failing.
#[test]
fn unknown_level_falls_back_to_info() {
    let output = logctl()
        .args(["--log.level", "chatty", "--log.format", "json", "info", "still here"])
        .output()
        .expect("run logctl");

    assert!(output.status.success());
    assert_eq!(stdout_records(&output)[0]["msg"], "still here");
}

/// Verifies an unpaired key produces a report record before the main record.
#[test]
fn dangling_key_is_reported() {
    let output = logctl()
        .args(["--log.format", "json", "--name", "auth", "warn", "login", "user=alice", "orphan"])
        .output()
        .expect("run logctl");

    let records = stdout_records(&output);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["msg"], "Ignored key without a value.");
    assert_eq!(records[0]["ignored"], "orphan");
    assert_eq!(records[1]["logger"], "auth");
    assert_eq!(records[1]["user"], "alice");
}

/// Verifies records can be sent to a file instead of stdout.
#[test]
fn output_path_receives_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");

    logctl()
        .args(["--log.format", "json", "--log.output-paths"])
        .arg(&path)
        .args(["error", "disk full", "free=0"])
        .assert()
        .success()
        .stdout("");

    let text = std::fs::read_to_string(&path).expect("log file");
    let record: Json = serde_json::from_str(text.trim_end()).expect("json record");
    assert_eq!(record["level"], "error");
    assert_eq!(record["free"], 0);
}

// ============================================================================
// Escalation Tests
// ============================================================================

/// Verifies fatal writes the record then exits with status 1.
#[test]
fn fatal_exits_with_status_one() {
    let output = logctl()
        .args(["--log.format", "json", "fatal", "cannot bind", "port=80"])
        .output()
        .expect("run logctl");

    assert_eq!(output.status.code(), Some(1));
    let records = stdout_records(&output);
    assert_eq!(records[0]["level"], "fatal");
    assert_eq!(records[0]["port"], 80);
}

/// Verifies panic writes the record with a stack then unwinds out of main.
#[test]
fn panic_writes_stack_then_unwinds() {
    let output = logctl()
        .args(["--log.format", "json", "panic", "corrupt index"])
        .output()
        .expect("run logctl");

    assert_eq!(output.status.code(), Some(101));
    let records = stdout_records(&output);
    assert_eq!(records[0]["level"], "panic");
    assert!(records[0]["stack"].is_string());
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("corrupt index"));
}

// ============================================================================
// Configuration Error Tests
// ============================================================================

/// Verifies an unknown format stops the process before any record is written.
#[test]
fn unknown_format_exits_with_status_one() {
    let output = logctl()
        .args(["--log.format", "yaml", "info", "never written"])
        .output()
        .expect("run logctl");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("no encoder registered for name \"yaml\""));
}

/// Verifies an unsupported sink scheme is a startup failure.
#[test]
fn unsupported_sink_exits_with_status_one() {
    let output = logctl()
        .args(["--log.output-paths", "gopher://example.com", "info", "never written"])
        .output()
        .expect("run logctl");

    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}
