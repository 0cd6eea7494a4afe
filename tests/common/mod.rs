//! Common test utilities and fixtures.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use influxconv_lib::core::Logger;
use influxconv_lib::protocol::Precision;
use influxconv_lib::{ConversionStats, Converter};
use std::io::Write;
use tempfile::NamedTempFile;

/// One data line of the exposition output.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub labels: String,
    pub value: f64,
    pub timestamp: String,
}

/// Convert `input` at nanosecond precision with the epoch as default time.
pub fn convert(input: &str) -> (String, ConversionStats) {
    let converter = Converter::new(Precision::Nanoseconds, Logger::disabled());
    let mut out = Vec::new();
    let stats = converter
        .convert_at(input.as_bytes(), DateTime::<Utc>::from_timestamp_nanos(0), &mut out)
        .expect("conversion should succeed");
    (String::from_utf8(out).expect("output is UTF-8"), stats)
}

/// Data lines of an exposition, ignoring `# HELP` and `# TYPE` lines.
pub fn records(text: &str) -> Vec<Record> {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| {
            let (series, rest) = match line.find('}') {
                Some(end) => line.split_at(end + 1),
                None => line.split_at(line.find(' ').expect("data line has a value")),
            };
            let (name, labels) = match series.find('{') {
                Some(start) => (&series[..start], &series[start + 1..series.len() - 1]),
                None => (series, ""),
            };
            let mut parts = rest.split_whitespace();
            Record {
                name: name.to_string(),
                labels: labels.to_string(),
                value: parts.next().expect("value").parse().expect("numeric value"),
                timestamp: parts.next().unwrap_or_default().to_string(),
            }
        })
        .collect()
}

/// Write `contents` to a temporary line protocol file.
pub fn input_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
