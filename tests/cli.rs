//! Integration tests for the rpcgen binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn fixture() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/todo.json")
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_templates_list_command() {
    let mut cmd = Command::cargo_bin("rpcgen").unwrap();

    cmd.arg("templates")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available embedded templates"))
        .stdout(predicate::str::contains("kotlin:"))
        .stdout(predicate::str::contains("types.swift.tera"))
        .stdout(predicate::str::contains("client.go.tera"))
        .stdout(predicate::str::contains("error.ts.tera"));
}

#[test]
fn test_templates_export_command() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("rpcgen").unwrap();

    cmd.arg("templates")
        .arg("export")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 12 templates"));

    assert!(temp_dir.path().join("go/types.go.tera").exists());
    assert!(temp_dir.path().join("typescript/client.ts.tera").exists());
}

#[test]
fn test_generate_writes_every_target() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("rpcgen").unwrap();

    cmd.current_dir(temp_dir.path())
        .args(["generate", "--schema", &fixture(), "--output-dir", "out"])
        .assert()
        .success();

    let out = temp_dir.path().join("out");
    for file in [
        "kotlin/todo_types.kt",
        "kotlin/todo_client.kt",
        "swift/todo_types.swift",
        "swift/todo_client.swift",
        "go/todo_types.go",
        "go/todo_client.go",
        "typescript/todo_types.ts",
        "typescript/todo_client.ts",
    ] {
        assert!(out.join(file).is_file(), "missing {file}");
    }
}

#[test]
fn test_generate_stdout_single_target() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("rpcgen").unwrap();

    cmd.current_dir(temp_dir.path())
        .args([
            "generate",
            "--schema",
            &fixture(),
            "--target",
            "go",
            "--go-package",
            "todo",
            "--stdout",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("// ==> ./go/todo_types.go <=="))
        .stdout(predicate::str::contains("package todo"))
        .stdout(predicate::str::contains("kotlin").not());

    assert!(!temp_dir.path().join("go").exists());
}

#[test]
fn test_generate_reads_config_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("rpcgen.toml"),
        format!(
            "schema = {:?}\ntargets = [\"typescript\"]\noutput_dir = \"gen\"\nclient_name = \"TodoAPI\"\n",
            fixture()
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("rpcgen").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("generate")
        .assert()
        .success();

    let client =
        std::fs::read_to_string(temp_dir.path().join("gen/typescript/todo_client.ts")).unwrap();
    assert!(client.contains("export class TodoAPI {"));
    assert!(!temp_dir.path().join("gen/go").exists());
}

#[test]
fn test_generate_requires_schema() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("rpcgen").unwrap();

    cmd.current_dir(temp_dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No schema given"));
}

#[test]
fn test_generate_rejects_unknown_target() {
    let mut cmd = Command::cargo_bin("rpcgen").unwrap();

    cmd.args(["generate", "--schema", &fixture(), "--target", "rust"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target"));
}
