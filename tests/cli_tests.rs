// Tests for the qualm binary: exit status and where output lands

use std::path::PathBuf;
use std::process::{Command, Output};

fn program_file(name: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("qualm_cli_{}_{}.qm", name, std::process::id()));
    std::fs::write(&path, source).unwrap();
    path
}

fn qualm(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qualm"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_successful_program_exits_zero() {
    let path = program_file("ok", "v'Hello World!:!");
    let output = qualm(&[path.to_str().unwrap()]);
    std::fs::remove_file(&path).unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello World!");
    assert!(output.stderr.is_empty());
}

#[test]
fn test_runtime_error_exits_with_status_one() {
    let path = program_file("eof", "v1!v2-");
    let output = qualm(&[path.to_str().unwrap()]);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(output.status.code(), Some(1));
    // output written before the error is still flushed
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1.0");
    assert_eq!(String::from_utf8_lossy(&output.stderr), "EOF\n");
}

#[test]
fn test_missing_file_argument_prints_usage() {
    let output = qualm(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}

#[test]
fn test_unreadable_file_exits_with_status_one() {
    let output = qualm(&["/nonexistent/qualm_program.qm"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: cannot read"));
}
