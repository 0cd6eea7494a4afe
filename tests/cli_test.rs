//! Process-level behavior of the influxconv binary.

mod common;

use common::input_file;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_influxconv"))
        .args(args)
        .output()
        .expect("failed to run influxconv")
}

fn path(file: &tempfile::NamedTempFile) -> &str {
    file.path().to_str().expect("temp path is UTF-8")
}

#[test]
fn test_converts_file_to_stdout() {
    let input = input_file("cpu,host=a value=1.5 1000000000\n");
    let output = run(&[path(&input)]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "# HELP cpu InfluxDB Metric\n# TYPE cpu untyped\ncpu{host=\"a\"} 1.5 1\n"
    );
}

#[test]
fn test_missing_file_exits_with_one() {
    let output = run(&["/no/such/input.lp"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("/no/such/input.lp"));
}

#[test]
fn test_decode_failure_exits_with_one() {
    let input = input_file("cpu value=1 1\nnot a point\n");
    let output = run(&[path(&input)]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a point"));
}

#[test]
fn test_out_of_range_value_exits_with_one() {
    let input = input_file("cpu value=99999999999999999999i 1\nmem value=2 2\n");
    let output = run(&[path(&input)]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid integer"));
}

#[test]
fn test_debug_flag_logs_summary() {
    let input = input_file("cpu value=1 1000\n");
    let output = run(&["--debug", path(&input)]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("conversion finished"));
}

#[test]
fn test_precision_and_output_file() {
    let input = input_file("cpu value=1 3\n");
    let dir = tempfile::tempdir().expect("temp dir");
    let out_path = dir.path().join("metrics.txt");
    let out_str = out_path.to_str().expect("UTF-8 path");

    let output = run(&["--precision", "s", "--output", out_str, path(&input)]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    let written = std::fs::read_to_string(&out_path).expect("output written");
    assert!(written.ends_with("\ncpu 1.0 3\n"));
}
