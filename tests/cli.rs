//! End-to-end runs of the `mint_validate` binary: exit status, stdout and stderr.

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

const NOW: &str = "1760000000000";

const VALID_CAPTURE: &str = "# gw1 sample\n\
aviatrix.gateway.cpu.idle,gateway=gw1 gauge,97.1 1760000000000\n\
aviatrix.gateway.net.bytes_rx,gateway=gw1 count,delta=12\n\
\n";

const INVALID_CAPTURE: &str = "ok.metric 1\n\
dt.reserved.metric 1\n";

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

fn mint_validate(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mint_validate"))
        .args(args)
        .env_remove("MINT_LOG")
        .output()
        .expect("run mint_validate")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ==================== Exit status ====================

#[test]
fn all_valid_exits_zero() {
    let file = write_temp(VALID_CAPTURE);
    let path = file.path().to_str().unwrap();
    let output = mint_validate(&["--now", NOW, path]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("MINT Validation Summary"));
    assert!(text.contains("Valid:             2"));
    assert!(text.contains("Skipped (empty/#): 2"));
}

#[test]
fn invalid_line_exits_one() {
    let file = write_temp(INVALID_CAPTURE);
    let output = mint_validate(&["--no-timestamp-check", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Invalid:           1"));
    assert!(text.contains("Line 2: Metric key cannot start with 'dt.'"));
}

#[test]
fn completeness_issues_fail_only_in_strict_mode() {
    let file = write_temp(VALID_CAPTURE);
    let path = file.path().to_str().unwrap();

    let output = mint_validate(&["--now", NOW, "--check-completeness", path]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Completeness issues:"));
    assert!(text.contains("Gateway 'gw1' missing sys_stats metrics: ["));
    assert!(text.contains("Gateway 'gw1' missing net_stats gauge metrics: ["));

    let output = mint_validate(&["--now", NOW, "--strict-completeness", path]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Completeness issues:"));
}

#[test]
fn missing_source_reports_unavailable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope.txt");
    let output = mint_validate(&[missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("source unavailable"), "{err}");
    assert!(err.contains("nope.txt"), "{err}");
}

// ==================== Options ====================

#[test]
fn json_format_goes_to_stdout() {
    let file = write_temp(INVALID_CAPTURE);
    let output = mint_validate(&[
        "--no-timestamp-check",
        "--format",
        "json",
        "--check-completeness",
        file.path().to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(value["total_data_lines"], 2);
    assert_eq!(value["valid"], 1);
    assert_eq!(value["invalid"], 1);
    assert_eq!(value["errors"][0]["kind"], "key_reserved_prefix");
    assert_eq!(value["errors"][0]["line"], 2);
    assert_eq!(value["completeness"], serde_json::json!([]));
}

#[test]
fn timestamp_reference_flags() {
    let file = write_temp(VALID_CAPTURE);
    let path = file.path().to_str().unwrap();

    let output = mint_validate(&["--now", NOW, path]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    // an hour and a bit after the captured timestamps
    let output = mint_validate(&["--now", "1760003600001", path]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Timestamp out of range"));

    let output = mint_validate(&["--no-timestamp-check", path]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let output = mint_validate(&["--now", NOW, "--no-timestamp-check", path]);
    assert_eq!(output.status.code(), Some(2), "conflicting flags are a usage error");
}

#[test]
fn extreme_now_does_not_panic() {
    let file = write_temp(VALID_CAPTURE);
    let output = mint_validate(&["--now", &i64::MAX.to_string(), file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Timestamp out of range"));
    assert!(!stderr(&output).contains("panicked"));
}

#[test]
fn verbose_reads_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mint_validate"))
        .args(["-v", "--no-timestamp-check"])
        .env_remove("MINT_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn mint_validate");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(INVALID_CAPTURE.as_bytes())
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait mint_validate");
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("[OK] L1: ok.metric 1"));
    assert!(text.contains("[INVALID] L2: dt.reserved.metric 1"));
}
