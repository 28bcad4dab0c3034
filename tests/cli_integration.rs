//! CLI integration tests.
//!
//! These tests verify the CLI argument parsing and configuration loading.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use script_debugger::cli::{parse_args_from, Args};
use script_debugger::config::{Config, ConfigError};
use script_debugger::DebuggerOptions;

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("script-debugger")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_defaults() {
    let result = parse_args_from(args(&[])).unwrap();

    assert!(result.transcript.is_none());
    assert!(result.config.is_none());
    assert!(result.log_level.is_none());
    assert!(!result.allow_concurrent_edits);
    assert!(!result.no_line_check);
    assert!(!result.help);
    assert!(!result.version);
}

#[test]
fn test_cli_full_options() {
    let result = parse_args_from(args(&[
        "-c",
        "debugger.json",
        "-l",
        "debug",
        "--allow-concurrent-edits",
        "--no-line-check",
        "session.jsonl",
    ]))
    .unwrap();

    assert_eq!(result.config, Some(PathBuf::from("debugger.json")));
    assert_eq!(result.log_level, Some("debug".to_string()));
    assert!(result.allow_concurrent_edits);
    assert!(result.no_line_check);
    assert_eq!(result.transcript, Some(PathBuf::from("session.jsonl")));
}

#[test]
fn test_cli_long_options() {
    let result = parse_args_from(args(&[
        "--config",
        "/etc/script-debugger.json",
        "--log-level",
        "trace",
    ]))
    .unwrap();

    assert_eq!(
        result.config,
        Some(PathBuf::from("/etc/script-debugger.json"))
    );
    assert_eq!(result.log_level, Some("trace".to_string()));
}

#[test]
fn test_cli_rejects_unknown_flag() {
    assert!(parse_args_from(args(&["--no-auth"])).is_err());
}

#[test]
fn test_cli_rejects_extra_positional() {
    assert!(parse_args_from(args(&["one.jsonl", "two.jsonl"])).is_err());
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_config_load_without_file() {
    let config = Config::load(&Args::default()).unwrap();
    assert!(config.debugger_options().reject_out_of_range_lines);
}

#[test]
fn test_config_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"{
            "debugger": { "reject_out_of_range_lines": false },
            "logging": { "level": "warn" }
        }"#,
    )
    .unwrap();

    let args = Args {
        config: Some(file.path().to_path_buf()),
        ..Args::default()
    };
    let config = Config::load(&args).unwrap();

    assert!(!config.debugger_options().reject_out_of_range_lines);
}

#[test]
fn test_cli_overrides_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "debugger": { "allow_concurrent_edits": false } }"#)
        .unwrap();

    let args = parse_args_from(args(&[
        "-c",
        file.path().to_str().unwrap(),
        "--allow-concurrent-edits",
        "-l",
        "error",
    ]))
    .unwrap();
    let config = Config::load(&args).unwrap();

    assert!(config.debugger_options().allow_concurrent_edits);
    assert_eq!(config.log_filter(), "error");
}

#[test]
fn test_config_missing_file() {
    let args = Args {
        config: Some(PathBuf::from("/nonexistent/script-debugger.json")),
        ..Args::default()
    };
    assert!(matches!(Config::load(&args), Err(ConfigError::Io(_))));
}

#[test]
fn test_config_defaults_match_model() {
    let config = Config::default();
    assert_eq!(config.debugger_options(), DebuggerOptions::default());
}
