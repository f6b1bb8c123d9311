//! End-to-end tests for the `nanointl` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn nanointl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nanointl"))
        .args(["--color", "never"])
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_catalog(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, json).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

const EN: &str = r#"{
    "greeting": "Hello, {name}!",
    "inbox": "{count, plural, =0 {No messages} one {# message} other {# messages}}",
    "cta": "<b>{n, number}</b> left"
}"#;

// =============================================================================
// check
// =============================================================================

#[test]
fn test_check_valid_catalog() {
    let dir = TempDir::new().unwrap();
    let en = write_catalog(dir.path(), "en.json", EN);
    let output = nanointl(&["check", en.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(exitcode::OK));
    assert!(stdout(&output).contains("ok: 3 messages in 1 file(s)"));
}

#[test]
fn test_check_reports_every_bad_message() {
    let dir = TempDir::new().unwrap();
    let bad = write_catalog(
        dir.path(),
        "bad.json",
        r#"{ "a": "fine", "b": "{n, plural, one {x}", "c": "{x, choice, 1#y}" }"#,
    );
    let output = nanointl(&["check", "--json", bad.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(exitcode::DATAERR));

    let problems: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<&str> = problems
        .as_array()
        .unwrap()
        .iter()
        .map(|problem| problem["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["b", "c"]);
    assert!(problems[0]["position"].is_null());
    assert!(problems[1]["position"].is_u64());
}

#[test]
fn test_check_missing_file_is_a_problem() {
    let dir = TempDir::new().unwrap();
    let absent = dir.path().join("absent.json");
    let output = nanointl(&["check", "--json", absent.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(exitcode::DATAERR));
    let problems: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(problems[0]["id"].is_null());
}

// =============================================================================
// eval
// =============================================================================

#[test]
fn test_eval_formats_message() {
    let dir = TempDir::new().unwrap();
    let en = write_catalog(dir.path(), "en.json", EN);
    let catalog = en.to_str().unwrap();

    let output = nanointl(&["eval", "--catalog", catalog, "--id", "greeting", "-a", "name=Ada"]);
    assert_eq!(output.status.code(), Some(exitcode::OK));
    assert_eq!(stdout(&output), "Hello, Ada!\n");

    let output = nanointl(&["eval", "--catalog", catalog, "--id", "inbox", "-a", "count=1"]);
    assert_eq!(stdout(&output), "1 message\n");
}

#[test]
fn test_eval_echoes_tags() {
    let dir = TempDir::new().unwrap();
    let en = write_catalog(dir.path(), "en.json", EN);
    let output = nanointl(&[
        "eval",
        "--catalog",
        en.to_str().unwrap(),
        "--id",
        "cta",
        "--var",
        "n=1200",
    ]);
    assert_eq!(stdout(&output), "<b>1,200</b> left\n");
}

#[test]
fn test_eval_json_output() {
    let dir = TempDir::new().unwrap();
    let en = write_catalog(dir.path(), "en.json", EN);
    let output = nanointl(&[
        "eval",
        "--catalog",
        en.to_str().unwrap(),
        "--id",
        "greeting",
        "-a",
        "name=Bo",
        "--json",
    ]);
    let result: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(result["result"], "Hello, Bo!");
}

#[test]
fn test_eval_missing_variable() {
    let dir = TempDir::new().unwrap();
    let en = write_catalog(dir.path(), "en.json", EN);
    let output = nanointl(&["eval", "--catalog", en.to_str().unwrap(), "--id", "greeting"]);
    assert_eq!(output.status.code(), Some(exitcode::DATAERR));
}

#[test]
fn test_eval_unknown_id() {
    let dir = TempDir::new().unwrap();
    let en = write_catalog(dir.path(), "en.json", EN);
    let output = nanointl(&["eval", "--catalog", en.to_str().unwrap(), "--id", "nope"]);
    assert_eq!(output.status.code(), Some(exitcode::SOFTWARE));
}

// =============================================================================
// vars
// =============================================================================

#[test]
fn test_vars_json() {
    let dir = TempDir::new().unwrap();
    let en = write_catalog(dir.path(), "en.json", EN);
    let output = nanointl(&["vars", "--catalog", en.to_str().unwrap(), "--json"]);
    assert_eq!(output.status.code(), Some(exitcode::OK));

    let vars: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(vars[0]["id"], "greeting");
    assert_eq!(vars[0]["variables"], serde_json::json!(["name"]));
    assert_eq!(vars[2]["variables"], serde_json::json!(["b", "n"]));
    assert_eq!(vars[2]["callbacks"], serde_json::json!(["b"]));
}

#[test]
fn test_vars_single_message_table() {
    let dir = TempDir::new().unwrap();
    let en = write_catalog(dir.path(), "en.json", EN);
    let output = nanointl(&["vars", "--catalog", en.to_str().unwrap(), "--id", "inbox"]);
    let text = stdout(&output);
    assert!(text.contains("inbox"));
    assert!(text.contains("count"));
    assert!(!text.contains("greeting"));
}

// =============================================================================
// coverage
// =============================================================================

#[test]
fn test_coverage_reports_missing_and_mismatched() {
    let dir = TempDir::new().unwrap();
    let en = write_catalog(dir.path(), "en.json", EN);
    write_catalog(
        dir.path(),
        "de.json",
        r#"{ "greeting": "Hallo, {user}!", "inbox": "{count, plural, one {# Nachricht} other {# Nachrichten}}" }"#,
    );

    let output = nanointl(&[
        "coverage",
        "--source",
        en.to_str().unwrap(),
        "--lang",
        "de,fr",
        "--json",
    ]);
    assert_eq!(output.status.code(), Some(exitcode::OK));

    let coverage: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(coverage[0]["locale"], "de");
    assert_eq!(coverage[0]["translated"], 2);
    assert_eq!(coverage[0]["total"], 3);
    assert_eq!(coverage[0]["missing"], serde_json::json!(["cta"]));
    assert_eq!(coverage[0]["mismatched"], serde_json::json!(["greeting"]));
    assert_eq!(coverage[1]["locale"], "fr");
    assert_eq!(coverage[1]["translated"], 0);
}

#[test]
fn test_coverage_strict_fails_when_incomplete() {
    let dir = TempDir::new().unwrap();
    let en = write_catalog(dir.path(), "en.json", EN);
    let output = nanointl(&[
        "coverage",
        "--source",
        en.to_str().unwrap(),
        "--lang",
        "fr",
        "--strict",
    ]);
    assert_eq!(output.status.code(), Some(exitcode::DATAERR));
    assert!(stdout(&output).contains("Missing in fr:"));
}
