//! Tests driving the compiled `fiend` binary
//!
//! These cover what only the binary does: exit codes, the stdout/stderr
//! split and the tool-name prefix on diagnostics.

use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn fiend(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fiend"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run fiend")
}

#[test]
fn test_prints_matches_and_exits_zero() {
    let dir = tempdir().unwrap();
    let d = dir.path().join("d");
    fs::create_dir_all(d.join("sub")).unwrap();
    fs::write(d.join("a.txt"), b"").unwrap();
    fs::write(d.join("b.log"), b"").unwrap();
    fs::write(d.join("sub/c.txt"), b"").unwrap();

    let output = fiend(&[d.to_str().unwrap(), "-name", "*.txt", "-print"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines: Vec<&str> = stdout.lines().collect();
    lines.sort();
    let expected_a = format!("{}/a.txt", d.display());
    let expected_c = format!("{}/sub/c.txt", d.display());
    assert_eq!(lines, vec![expected_a.as_str(), expected_c.as_str()]);
}

#[test]
fn test_recoverable_error_still_exits_zero() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let output = fiend(&[missing.to_str().unwrap(), "-print"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(!stderr.is_empty());
    for line in stderr.lines() {
        assert!(line.starts_with("fiend: "), "stderr: {}", stderr);
    }
    assert!(stderr.contains("No such file or directory"), "stderr: {}", stderr);
}

#[test]
fn test_fatal_config_error_exits_nonzero_without_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("f"), b"").unwrap();

    let output = fiend(&[dir.path().to_str().unwrap(), "-print", "-exec", "ls", "{}"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("fiend: "), "stderr: {}", stderr);
    assert!(stderr.contains("-exec"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_max_depth_is_fatal() {
    let output = fiend(&[".", "-maxdepth", "-1", "-print"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
