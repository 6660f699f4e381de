//! Drives the built `falsei` binary

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

fn program(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(source.as_bytes()).expect("write program");
    file
}

fn falsei(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_falsei"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn falsei");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for falsei")
}

fn run(source: &str, extra: &[&str], stdin: &str) -> Output {
    let file = program(source);
    let path = file.path().to_str().expect("utf-8 temp path").to_string();
    let mut args: Vec<&str> = Vec::new();
    let (flags, arguments): (Vec<&str>, Vec<&str>) =
        extra.iter().partition(|a| a.starts_with("--") || **a == "-x" || **a == "-v");
    args.extend(flags);
    args.push(&path);
    args.extend(arguments);
    falsei(&args, stdin)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_hello() {
    let out = run("\"Hello, world!\" 10,", &[], "");
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "Hello, world!\n");
}

#[test]
fn test_program_arguments() {
    let out = run("a;. b;c;+.", &["3", "-1"], "");
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "22");
}

#[test]
fn test_runtime_error_report() {
    let out = run("1\n2 + +", &[], "");
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains(":2:5: error: stack underflow"), "{}", err);
    assert!(err.contains("2 + +\n    ^"), "{}", err);
}

#[test]
fn test_output_before_error_is_kept() {
    let out = run("1. %", &[], "");
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "1");
}

#[test]
fn test_leftover_stack_report() {
    let out = run("1", &[], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains(": error: stack not empty"));
}

#[test]
fn test_shebang_is_skipped() {
    let out = run("#!/usr/bin/env falsei\n5.", &[], "");
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "5");
}

#[test]
fn test_stdin_is_read() {
    let out = run("^,^,^.", &[], "ok");
    assert_eq!(stdout(&out), "ok-1");
}

#[test]
fn test_input_flag_comes_first() {
    let out = run("^,^,^,^.", &["--input=a"], "z");
    assert_eq!(stdout(&out), "a\nz-1");
}

#[test]
fn test_extensions_flag() {
    let out = run("1 2£...", &[], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown symbol"));

    let out = run("1 2£...", &["-x"], "");
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "121");
}

#[test]
fn test_settings_file() {
    let settings = program("extensions = true\ninput = \"q\"\n");
    let flag = format!("--config={}", settings.path().display());
    let out = run("1 2£... ^,", &[&flag], "");
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "121q");
}

#[test]
fn test_bad_settings_file() {
    let settings = program("color = true\n");
    let flag = format!("--config={}", settings.path().display());
    let out = run("", &[&flag], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("color"));
}

#[test]
fn test_missing_file() {
    let out = falsei(&["/nonexistent/prog.f"], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("/nonexistent/prog.f: "));
}

#[test]
fn test_verbose_logs_symbols() {
    let out = run("1 2+%", &["-v"], "");
    assert!(out.status.success(), "{}", stderr(&out));
    let err = stderr(&out);
    assert!(err.contains("symbol"), "{}", err);
    assert!(err.contains("push"), "{}", err);
    assert_eq!(stdout(&out), "");
}

#[test]
fn test_non_numeric_argument() {
    let out = run("", &["seven"], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("error: non-numeric argument"));
}

#[test]
fn test_deep_recursion() {
    let out = run("[$[1-f;!]?]f: 10000f;!%1.", &[], "");
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "1");
}
