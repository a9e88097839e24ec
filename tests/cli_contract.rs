//! Black-box contract tests for the `chunkwright` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn single_file_chunking_produces_json_output() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("test.md");
    fs::write(&input, "# Test\n\nSome content to chunk.\n").unwrap();

    let mut cmd = Command::cargo_bin("chunkwright").unwrap();
    cmd.arg(&input).current_dir(temp.path()).assert().success().stdout(predicate::str::contains("test.md"));

    let output = temp.path().join("test.json");
    assert!(output.exists());
    let contents = fs::read_to_string(&output).unwrap();
    assert!(contents.contains("\"chunks\""));
    assert!(contents.contains("\"metadata\""));
}

#[test]
fn output_format_flag_selects_renderer() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("test.md");
    fs::write(&input, "# Test\n\nBody text.\n").unwrap();
    let out_dir = temp.path().join("out");

    let mut cmd = Command::cargo_bin("chunkwright").unwrap();
    cmd.arg(&input).arg("--to").arg("text").arg("--output-dir").arg(&out_dir).assert().success();

    let output = out_dir.join("test.txt");
    assert!(output.exists());
    let contents = fs::read_to_string(&output).unwrap();
    assert!(contents.contains("Body text."));
}

#[test]
fn missing_input_path_fails() {
    let mut cmd = Command::cargo_bin("chunkwright").unwrap();
    cmd.arg("/no/such/file.md").assert().failure().stderr(predicate::str::contains("does not exist"));
}

#[test]
fn custom_output_dir_is_honored() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("test.md");
    fs::write(&input, "# Test\n\nBody.\n").unwrap();
    let out_dir = temp.path().join("out");

    let mut cmd = Command::cargo_bin("chunkwright").unwrap();
    cmd.arg(&input).arg("--output-dir").arg(&out_dir).assert().success();

    assert!(out_dir.join("test.json").exists());
}
