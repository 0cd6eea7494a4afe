//! Text writer for untyped metric families.
//!
//! `prometheus::TextEncoder` does not serialize untyped families, so this
//! writer renders them itself. Output per family:
//!
//! ```text
//! # HELP cpu InfluxDB Metric
//! # TYPE cpu untyped
//! cpu{host="a"} 1.5 1
//! ```
//!
//! Values follow OpenMetrics float rules and timestamps are written in
//! seconds.

use crate::core::{InfluxConvError, Result};
use prometheus::proto::{Metric, MetricFamily, MetricType};
use std::io::Write;

const MILLIS_PER_SECOND: u64 = 1_000;

/// Writes metric families to an underlying writer.
///
/// Holds no state between families beyond the writer itself.
#[derive(Debug)]
pub struct ExpositionEncoder<W: Write> {
    writer: W,
}

impl<W: Write> ExpositionEncoder<W> {
    /// Encoder appending to `writer`
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Serialize one family. The family is rendered in full, then handed
    /// to the writer with a single `write_all`.
    pub fn encode(&mut self, family: &MetricFamily) -> Result<()> {
        let text = render_family(family)?;
        self.writer.write_all(text.as_bytes()).map_err(|e| {
            InfluxConvError::serialization(format!("failed to write {}: {}", family.get_name(), e))
        })
    }
}

/// Render one family as exposition text.
pub fn render_family(family: &MetricFamily) -> Result<String> {
    let name = family.get_name();
    if name.is_empty() {
        return Err(InfluxConvError::serialization("metric family has no name"));
    }

    let metric_type = family.get_field_type();
    if metric_type != MetricType::UNTYPED {
        return Err(InfluxConvError::serialization(format!(
            "unsupported metric type {:?} for {}",
            metric_type, name
        )));
    }

    let type_name = format!("{:?}", metric_type).to_lowercase();
    let mut out = format!(
        "# HELP {name} {}\n# TYPE {name} {type_name}\n",
        escape(family.get_help(), false)
    );
    for metric in family.get_metric() {
        render_metric(&mut out, name, metric);
    }
    Ok(out)
}

fn render_metric(out: &mut String, name: &str, metric: &Metric) {
    out.push_str(name);

    let labels = metric.get_label();
    if !labels.is_empty() {
        let pairs: Vec<String> = labels
            .iter()
            .map(|l| format!("{}=\"{}\"", l.get_name(), escape(l.get_value(), true)))
            .collect();
        out.push('{');
        out.push_str(&pairs.join(","));
        out.push('}');
    }

    out.push(' ');
    out.push_str(&format_float(metric.get_untyped().get_value()));
    out.push(' ');
    out.push_str(&format_timestamp(metric.get_timestamp_ms()));
    out.push('\n');
}

/// Escape `\` and newlines, plus `"` when `quotes` is set (label values).
pub fn escape(s: &str, quotes: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '"' if quotes => out.push_str("\\\""),
            '\n' => out.push_str(r"\n"),
            _ => out.push(c),
        }
    }
    out
}

/// OpenMetrics float: shortest round-trip form, integral values keep `.0`.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        let inf = if v > 0.0 { "+Inf" } else { "-Inf" };
        inf.to_string()
    } else {
        format!("{:?}", v)
    }
}

/// Seconds since the epoch from milliseconds, without trailing zeros.
pub fn format_timestamp(millis: i64) -> String {
    let sign = if millis < 0 { "-" } else { "" };
    let abs = millis.unsigned_abs();
    let secs = abs / MILLIS_PER_SECOND;
    let frac = abs % MILLIS_PER_SECOND;

    if frac == 0 {
        format!("{sign}{secs}")
    } else {
        let digits = format!("{frac:03}");
        format!("{sign}{secs}.{}", digits.trim_end_matches('0'))
    }
}
