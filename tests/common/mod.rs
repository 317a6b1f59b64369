//! Shared test helpers for glasstock integration tests.
//!
//! All tests use temp directories with their own `glasstock.toml` and data
//! directory; nothing touches the real working directory. The binary is run
//! with the glasstock env vars cleared so the host environment cannot leak
//! into a test.

#![allow(dead_code)]

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Worksheet used by every test setup.
pub const WORKSHEET: &str = "Blad1";

/// Create a temp dir with a csv-dir config and an empty data directory.
pub fn setup_inventory() -> TempDir {
    setup_with_config("[store]\nbackend = \"csv-dir\"\npath = \"data\"\n")
}

/// Create a temp dir whose config requires `password`.
pub fn setup_with_password(password: &str) -> TempDir {
    setup_with_config(&format!(
        "[store]\npath = \"data\"\n\n[access]\npassword = \"{password}\"\n"
    ))
}

/// Create a temp dir with the given `glasstock.toml` contents.
pub fn setup_with_config(config: &str) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    std::fs::write(dir.path().join("glasstock.toml"), config).expect("failed to write config");
    dir
}

/// Path of the worksheet file inside a test dir.
pub fn worksheet_file(dir: &Path) -> PathBuf {
    dir.join("data").join(format!("{WORKSHEET}.csv"))
}

/// Write a file (e.g. an import CSV) into the test dir and return its path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

/// Read the stored worksheet file back as text.
pub fn read_worksheet(dir: &Path) -> String {
    std::fs::read_to_string(worksheet_file(dir)).expect("failed to read worksheet")
}

fn command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_glasstock"));
    cmd.args(args)
        .current_dir(dir)
        .env_remove("GLASSTOCK_PASSWORD")
        .env_remove("GLASSTOCK_CONFIG")
        .env_remove("GLASSTOCK_LOG")
        .env_remove("GLASSTOCK_LOG_FORMAT");
    cmd
}

/// Run glasstock in `dir` with stdin closed.
pub fn glasstock_in(dir: &Path, args: &[&str]) -> Output {
    command(dir, args)
        .stdin(Stdio::null())
        .output()
        .expect("failed to execute glasstock")
}

/// Run glasstock in `dir`, feeding `input` on stdin.
pub fn glasstock_with_input(dir: &Path, args: &[&str], input: &str) -> Output {
    run_with_input(command(dir, args), input)
}

/// Run glasstock in `dir` with extra env vars and `input` on stdin.
pub fn glasstock_with_env(dir: &Path, args: &[&str], env: &[(&str, &str)], input: &str) -> Output {
    let mut cmd = command(dir, args);
    for (key, value) in env {
        cmd.env(key, value);
    }
    run_with_input(cmd, input)
}

fn run_with_input(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn glasstock");
    if let Some(mut stdin) = child.stdin.take() {
        // The child may exit without reading stdin.
        let _ = stdin.write_all(input.as_bytes());
    }
    child.wait_with_output().expect("failed to wait for glasstock")
}

/// Run glasstock and assert it succeeds. Returns stdout as string.
pub fn glasstock_ok(dir: &Path, args: &[&str]) -> String {
    let out = glasstock_in(dir, args);
    assert_success(&out, args)
}

/// Assert `out` succeeded. Returns stdout as string.
pub fn assert_success(out: &Output, args: &[&str]) -> String {
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        out.status.success(),
        "glasstock {} failed:\nstdout: {stdout}\nstderr: {stderr}",
        args.join(" "),
    );
    stdout.to_string()
}

/// Run glasstock and assert it fails. Returns stderr as string.
pub fn glasstock_fails(dir: &Path, args: &[&str]) -> String {
    let out = glasstock_in(dir, args);
    assert!(
        !out.status.success(),
        "Expected glasstock {} to fail, but it succeeded.\nstdout: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stdout),
    );
    String::from_utf8_lossy(&out.stderr).to_string()
}

/// `glasstock list --format json`, parsed.
pub fn list_json(dir: &Path) -> serde_json::Value {
    let stdout = glasstock_ok(dir, &["list", "--format", "json"]);
    serde_json::from_str(&stdout).expect("list output is not JSON")
}

/// Full ids of every record, in table order.
pub fn record_ids(dir: &Path) -> Vec<String> {
    list_json(dir)["records"]
        .as_array()
        .expect("records array")
        .iter()
        .map(|r| r["id"].as_str().expect("id string").to_owned())
        .collect()
}
