//! End-to-end tests for the crosscheck binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

/// Environment variables the binary reads; cleared so the host cannot
/// change test outcomes.
const ENV_VARS: &[&str] = &[
    "LLM_MODE",
    "OPENAI_API_KEY",
    "USE_EXTERNAL_TOOL",
    "OPENAI_MODEL",
    "OPENAI_BASE_URL",
    "CROSSCHECK_TOOL",
    "CROSSCHECK_FAILURE_POLICY",
    "CROSSCHECK_OUT_OF_SET",
    "RUST_LOG",
];

#[allow(deprecated)]
fn crosscheck_cmd() -> Command {
    let mut cmd = Command::cargo_bin("crosscheck").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn fixture(dir: &str, name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(dir)
        .join(name)
        .to_string_lossy()
        .to_string()
}

#[test]
fn help_works() {
    crosscheck_cmd().arg("--help").assert().success();
}

#[test]
fn correct_files_exit_zero_with_empty_stdout() {
    crosscheck_cmd()
        .arg(fixture("correct", "calculator.js"))
        .arg(fixture("correct", "calculator.md"))
        .assert()
        .code(0)
        .stdout("");
}

#[test]
fn incorrect_files_exit_one_with_three_lines() {
    let js = fixture("incorrect", "calculator.js");
    let md = fixture("incorrect", "calculator.md");
    let output = crosscheck_cmd().arg(&js).arg(&md).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    let prefix = format!("{},{}:", js, md);
    assert!(lines.iter().all(|l| l.starts_with(&prefix)));
    assert!(stdout.ends_with('\n') && !stdout.ends_with("\n\n"));
}

#[test]
fn single_file_prints_usage() {
    crosscheck_cmd()
        .arg(fixture("correct", "calculator.js"))
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Usage: crosscheck"));
}

#[test]
fn missing_file_is_an_error() {
    crosscheck_cmd()
        .arg(fixture("correct", "calculator.js"))
        .arg(fixture("correct", "missing.md"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn unknown_mode_is_an_error() {
    crosscheck_cmd()
        .args(["--mode", "gpt"])
        .arg(fixture("correct", "calculator.js"))
        .arg(fixture("correct", "calculator.md"))
        .assert()
        .code(1);
}

#[test]
fn remote_without_key_reports_sentinel_line() {
    let js = fixture("correct", "calculator.js");
    let md = fixture("correct", "calculator.md");
    crosscheck_cmd()
        .env("LLM_MODE", "openai")
        .arg(&js)
        .arg(&md)
        .assert()
        .code(1)
        .stdout(format!(
            "{},{}:an error occurred while analyzing the files for contradictions\n",
            js, md
        ));
}

#[test]
fn remote_without_key_fail_open_passes() {
    crosscheck_cmd()
        .env("LLM_MODE", "remote-api")
        .env("CROSSCHECK_FAILURE_POLICY", "fail-open")
        .arg(fixture("correct", "calculator.js"))
        .arg(fixture("correct", "calculator.md"))
        .assert()
        .code(0)
        .stdout("");
}

#[test]
fn json_format_reports_contradictions() {
    let output = crosscheck_cmd()
        .args(["--format", "json"])
        .arg(fixture("incorrect", "calculator.js"))
        .arg(fixture("incorrect", "calculator.md"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["passed"], false);
    assert_eq!(report["contradictions"].as_array().unwrap().len(), 3);
    assert_eq!(report["files"].as_array().unwrap().len(), 2);
}

#[cfg(unix)]
#[test]
fn external_tool_requires_opt_in() {
    let args = [
        fixture("correct", "calculator.js"),
        fixture("correct", "calculator.md"),
    ];

    // Without USE_EXTERNAL_TOOL the backend is a configuration error
    crosscheck_cmd()
        .env("LLM_MODE", "external-cli")
        .env("CROSSCHECK_TOOL", "true")
        .args(&args)
        .assert()
        .code(1);

    crosscheck_cmd()
        .env("LLM_MODE", "external-cli")
        .env("USE_EXTERNAL_TOOL", "1")
        .env("CROSSCHECK_TOOL", "true")
        .args(&args)
        .assert()
        .code(0)
        .stdout("");
}
