//! Runs the `tips` binary against content directories on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn tip(title: &str, permalink: &str, order: &str) -> String {
    format!("---\ntitle: \"{title}\"\npermalink: {permalink}\norder: \"{order}\"\n---\nBody\n")
}

fn tips(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tips"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn build_fails_on_shared_permalink() {
    let temp_dir = tempfile::tempdir().unwrap();
    let content = temp_dir.path().join("content");
    fs::create_dir(&content).unwrap();
    fs::write(content.join("a.md"), tip("Tip #61", "tips/61", "061")).unwrap();
    fs::write(content.join("b.md"), tip("Tip #61 again", "tips/61", "062")).unwrap();

    let output = tips(temp_dir.path(), &["build", "content"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(
        "b: DuplicatePermalinkError: permalink `/tips/61` is declared by both `a` and `b`"
    ));
    assert!(stderr.contains("1 error(s) in 1 document(s)"));
}

#[test]
fn check_fails_on_missing_field() {
    let temp_dir = tempfile::tempdir().unwrap();
    let content = temp_dir.path().join("content");
    fs::create_dir(&content).unwrap();
    fs::write(content.join("024.md"), "---\npermalink: tips/24\norder: 24\n---\n").unwrap();

    let output = tips(temp_dir.path(), &["check", "content"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("024: MissingFieldError: required field `title` is missing"));
}

#[test]
fn build_writes_artifact() {
    let temp_dir = tempfile::tempdir().unwrap();
    let content = temp_dir.path().join("content");
    fs::create_dir(&content).unwrap();
    fs::write(content.join("061.md"), tip("Tip #61", "tips/61", "061")).unwrap();
    fs::write(content.join("024.md"), tip("Tip #24", "tips/24", "024")).unwrap();

    let output = tips(
        temp_dir.path(),
        &["build", "content", "--out", "dist/tips-index.json"],
    );

    assert!(output.status.success());
    let json = fs::read_to_string(temp_dir.path().join("dist/tips-index.json")).unwrap();
    let artifact: serde_json::Value = serde_json::from_str(&json).unwrap();
    let permalinks: Vec<_> = artifact["navigation"]["sidenav"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["permalink"].as_str().unwrap())
        .collect();
    assert_eq!(permalinks, vec!["/tips/24", "/tips/61"]);
}

#[test]
fn build_prints_artifact_to_stdout() {
    let temp_dir = tempfile::tempdir().unwrap();
    let content = temp_dir.path().join("content");
    fs::create_dir(&content).unwrap();
    fs::write(content.join("024.md"), tip("Tip #24", "tips/24", "024")).unwrap();

    let output = tips(temp_dir.path(), &["build", "content"]);

    assert!(output.status.success());
    let artifact: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(artifact["documents"][0]["id"], "024");
}
