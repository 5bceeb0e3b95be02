//! Tests for the `lssecrets` binary that need no keyring.

use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lssecrets"))
        .args(args)
        .env("DBUS_SESSION_BUS_ADDRESS", "unix:path=/nonexistent/lssecrets-test-bus")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_version_flags() {
    for flag in ["-v", "--version"] {
        let output = run_cli(&[flag]);
        assert!(output.status.success(), "{flag} should succeed");
        assert_eq!(
            stdout_str(&output),
            format!("lssecrets {}\n", env!("CARGO_PKG_VERSION"))
        );
    }
}

#[test]
fn test_help_mentions_options() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success());
    let stdout = stdout_str(&output);
    for option in ["--detail", "--unlock", "--secrets", "--version"] {
        assert!(stdout.contains(option), "help should mention {option}");
    }
}

#[test]
fn test_detail_out_of_range_is_rejected() {
    let output = run_cli(&["--detail=7"]);
    assert!(!output.status.success());
    assert!(stdout_str(&output).is_empty());
    assert!(stderr_str(&output).contains("--detail"));
}

#[test]
fn test_unreachable_service_is_fatal() {
    let output = run_cli(&["--detail=1"]);
    assert!(!output.status.success());
    assert!(stdout_str(&output).is_empty());
    assert!(stderr_str(&output).starts_with("Error: "));
}
