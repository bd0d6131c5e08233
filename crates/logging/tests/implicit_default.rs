//! Integration tests for a process that never installs a logger.
//!
//! Nothing in this binary calls `init`. Records that must reach the real
//! stdout, or that end the process, are written by re-running this test
//! binary as a child with `LOGFACADE_CHILD` naming the scenario.

use std::env;
use std::process::{Command, Output};

use logfacade::{Options, Severity};

const CHILD: &str = "LOGFACADE_CHILD";

/// Whether this process is the child for `scenario`.
fn is_child(scenario: &str) -> bool {
    env::var(CHILD).is_ok_and(|value| value == scenario)
}

/// Re-runs this binary with only `test` selected, as the child for `test`.
fn run_child(test: &str) -> Output {
    Command::new(env::current_exe().expect("test binary path"))
        .args(["--exact", test, "--nocapture", "--test-threads=1"])
        .env(CHILD, test)
        .output()
        .expect("run child")
}

/// Console records are the only tab-separated lines the child prints.
fn console_lines(output: &Output) -> Vec<Vec<String>> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| line.contains('\t'))
        .map(|line| line.split('\t').map(str::to_owned).collect())
        .collect()
}

// ============================================================================
// Default Installation Tests
// ============================================================================

/// Verifies the lazily installed logger uses the default options at info.
#[test]
fn default_options_are_installed_on_first_use() {
    assert_eq!(*logfacade::options(), Options::default());
    assert_eq!(logfacade::logger().threshold(), Severity::Info);
    assert!(logfacade::enabled(Severity::Info));
    assert!(!logfacade::enabled(Severity::Debug));
}

/// Verifies a formatted info record reaches stdout as a console line.
#[test]
fn formatted_info_reaches_stdout() {
    if is_child("formatted_info_reaches_stdout") {
        logfacade::infof!("n={}", 3);
        logfacade::debugf!("filtered at the default level");
        logfacade::flush();
        return;
    }

    let output = run_child("formatted_info_reaches_stdout");

    assert!(output.status.success(), "{output:?}");
    let lines = console_lines(&output);
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert_eq!(lines[0][1], "info");
    assert!(lines[0][2].starts_with("tests/implicit_default.rs:"));
    assert_eq!(lines[0][3], "n=3");
}

// ============================================================================
// Escalation Tests
// ============================================================================

/// Verifies the formatted fatal macro writes its record then exits with 1.
#[test]
fn formatted_fatal_exits_with_status_one() {
    if is_child("formatted_fatal_exits_with_status_one") {
        logfacade::log_and_exitf!("cannot bind port {}", 80);
    }

    let output = run_child("formatted_fatal_exits_with_status_one");

    assert_eq!(output.status.code(), Some(1), "{output:?}");
    let lines = console_lines(&output);
    assert_eq!(lines[0][1], "fatal");
    assert_eq!(lines[0][3], "cannot bind port 80");
}
