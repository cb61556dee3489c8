// crates/pstore-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Dispatch Tests
// Description: Unit tests for argument handling and command output.
// Purpose: Pin printed output and failure codes against the in-memory backend.
// Dependencies: pstore-cli main helpers, tempfile
// ============================================================================

//! ## Overview
//! Every test runs with `--backend memory` and an injected environment so no
//! network or ambient credentials are touched.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process::ExitCode;

use clap::Parser;

use super::Cli;
use super::emit_error;
use super::execute;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Runs the CLI with `args` and a fixed environment lookup.
fn run_with_env(args: &[&str], vars: &[(&str, &str)]) -> (Result<ExitCode, String>, String) {
    let mut argv = vec!["pstore", "--backend", "memory"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let owned: Vec<(String, String)> =
        vars.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect();
    let lookup = move |key: &str| {
        owned.iter().find(|(name, _)| name == key).map(|(_, value)| value.clone())
    };
    let mut out = Vec::new();
    let result = execute(cli, &lookup, &mut out).map_err(|err| err.to_string());
    (result, String::from_utf8(out).unwrap())
}

/// Runs the CLI with `args` and an empty environment.
fn run(args: &[&str]) -> (Result<ExitCode, String>, String) {
    run_with_env(args, &[])
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Tests `--version` prints the package version.
#[test]
fn version_flag_prints_version() {
    let (result, output) = run(&["--version"]);
    assert_eq!(result.unwrap(), ExitCode::SUCCESS);
    assert_eq!(output, format!("pstore {}\n", env!("CARGO_PKG_VERSION")));
}

/// Tests running without a subcommand prints usage.
#[test]
fn missing_subcommand_prints_help() {
    let (result, output) = run(&[]);
    assert_eq!(result.unwrap(), ExitCode::SUCCESS);
    assert!(output.contains("Usage"));
    assert!(output.contains("walkthrough"));
}

/// Tests the full walkthrough prints each labeled step in order.
#[test]
fn walkthrough_prints_every_step() {
    let (result, output) = run(&["walkthrough", "--name", "/demo/secret"]);
    assert_eq!(result.unwrap(), ExitCode::SUCCESS);
    let labels = [
        "PutParameter: /demo/secret",
        "GetParameter: /demo/secret",
        "GetParameters: /demo/secret",
        "GetParametersByPath: /",
        "DeleteParameter: /demo/secret",
    ];
    let mut cursor = 0;
    for label in labels {
        let offset = output[cursor ..].find(label).unwrap_or_else(|| panic!("missing {label}"));
        cursor += offset + label.len();
    }
    assert!(output.contains("InvalidParamName"));
    assert!(output.contains("Cash Rules Everything Around Me"));
}

/// Tests the parameter name is taken from the environment.
#[test]
fn walkthrough_reads_name_from_environment() {
    let (result, output) =
        run_with_env(&["walkthrough", "--steps", "put"], &[("AWS_PARAMETER_NAME", "/env/name")]);
    assert_eq!(result.unwrap(), ExitCode::SUCCESS);
    assert_eq!(output, "PutParameter: /env/name\n{\n  Tier: \"Standard\",\n  Version: 1\n}\n");
}

/// Tests a step subset runs only the named steps.
#[test]
fn walkthrough_step_subset() {
    let (result, output) = run(&["walkthrough", "--name", "/demo/a", "--steps", "put,get"]);
    assert_eq!(result.unwrap(), ExitCode::SUCCESS);
    assert!(output.contains("PutParameter: /demo/a"));
    assert!(output.contains("GetParameter: /demo/a"));
    assert!(!output.contains("DeleteParameter"));
}

/// Tests unknown steps are rejected at parse time.
#[test]
fn walkthrough_rejects_unknown_step() {
    let parsed = Cli::try_parse_from(["pstore", "walkthrough", "--steps", "put,list"]);
    assert!(parsed.is_err());
}

/// Tests a missing parameter name fails before any call.
#[test]
fn missing_name_is_reported() {
    let (result, output) = run(&["get"]);
    let message = result.unwrap_err();
    assert!(message.contains("parameter.name must be set"), "{message}");
    assert!(output.is_empty());
}

/// Tests reading an absent record reports the store's not-found message.
#[test]
fn get_missing_parameter_fails() {
    let (result, _) = run(&["get", "--name", "/absent"]);
    assert_eq!(result.unwrap_err(), "parameter not found: /absent");
}

/// Tests `put` prints the write result.
#[test]
fn put_prints_version_and_tier() {
    let (result, output) =
        run(&["put", "--name", "/demo/plain", "--value", "hello", "--type", "String"]);
    assert_eq!(result.unwrap(), ExitCode::SUCCESS);
    assert_eq!(output, "{\n  Tier: \"Standard\",\n  Version: 1\n}\n");
}

/// Tests `get-many` reports unknown names instead of failing.
#[test]
fn get_many_reports_invalid_names() {
    let (result, output) = run(&["get-many", "/x", "/y"]);
    assert_eq!(result.unwrap(), ExitCode::SUCCESS);
    assert!(output.contains("InvalidParameters"));
    assert!(output.contains("\"/x\""));
    assert!(output.contains("\"/y\""));
}

/// Tests `delete` of an absent record fails.
#[test]
fn delete_missing_parameter_fails() {
    let (result, _) = run(&["delete", "--name", "/absent"]);
    assert!(result.unwrap_err().contains("/absent"));
}

/// Tests path reads run without a configured parameter name.
#[test]
fn get_by_path_needs_no_name() {
    let (result, output) = run(&["get-by-path", "--path", "/app"]);
    assert_eq!(result.unwrap(), ExitCode::SUCCESS);
    assert!(!output.is_empty());
}

/// Tests explicit `get-many` names run without a configured parameter name.
#[test]
fn get_many_with_names_needs_no_name() {
    let (result, _) = run(&["get-many", "/x"]);
    assert_eq!(result.unwrap(), ExitCode::SUCCESS);
    let (result, _) = run(&["get-many"]);
    assert!(result.unwrap_err().contains("parameter.name must be set"));
}

/// Tests `get-by-path` honors the page-size bound.
#[test]
fn get_by_path_rejects_oversized_page() {
    let (result, _) =
        run(&["get-by-path", "--path", "/demo", "--max-results", "11"]);
    assert!(result.is_err());
}

/// Tests static credentials without keys are rejected.
#[test]
fn static_credentials_require_keys() {
    let (result, _) = run(&["--credentials", "static", "get", "--name", "/demo"]);
    assert!(result.unwrap_err().contains("invalid config"));
}

/// Tests an invalid endpoint override is rejected.
#[test]
fn endpoint_override_is_validated() {
    let (result, _) = run(&["--endpoint-url", "ftp://localhost", "get", "--name", "/demo"]);
    assert!(result.unwrap_err().contains("http"));
}

/// Tests the file audit sink from a config file receives one event per call.
#[test]
fn audit_file_sink_records_calls() {
    let dir = tempfile::tempdir().unwrap();
    let audit_path = dir.path().join("audit.jsonl");
    let config_path = dir.path().join("pstore.toml");
    let config = format!(
        "[parameter]\nname = \"/demo/audited\"\n\n[audit]\nsink = \"file\"\npath = \"{}\"\n",
        audit_path.display().to_string().replace('\\', "\\\\")
    );
    std::fs::write(&config_path, config).unwrap();
    let config_arg = config_path.display().to_string();

    let (result, _) = run(&["--config", &config_arg, "walkthrough", "--steps", "put,get"]);
    assert_eq!(result.unwrap(), ExitCode::SUCCESS);

    let lines = std::fs::read_to_string(&audit_path).unwrap();
    assert_eq!(lines.lines().count(), 2);
    assert!(!lines.contains("Cash Rules Everything Around Me"));
}

/// Tests errors are written to the given stream with a failure code.
#[test]
fn emit_error_writes_message() {
    let mut out = Vec::new();
    let code = emit_error(&mut out, "parameter not found: /x");
    assert_eq!(code, ExitCode::FAILURE);
    assert_eq!(String::from_utf8(out).unwrap(), "parameter not found: /x\n");
}
