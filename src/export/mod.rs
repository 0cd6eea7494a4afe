//! Export of samples as metric exposition text.
//!
//! Every sample is wrapped in its own untyped `prometheus` metric family;
//! families are never merged, even when two samples share a name.

pub mod text;

use crate::convert::Sample;
use prometheus::proto::{LabelPair, Metric, MetricFamily, MetricType, Untyped};

pub use text::ExpositionEncoder;

/// Help text attached to every exported family.
pub const HELP_TEXT: &str = "InfluxDB Metric";

/// Untyped single-metric family for one sample.
///
/// Labels keep the sample's key order. The timestamp is carried in
/// milliseconds, so sub-millisecond precision is truncated.
pub fn metric_family(sample: Sample) -> MetricFamily {
    let labels: Vec<LabelPair> = sample
        .labels
        .into_iter()
        .map(|(name, value)| {
            let mut pair = LabelPair::default();
            pair.set_name(name);
            pair.set_value(value);
            pair
        })
        .collect();

    let mut untyped = Untyped::default();
    untyped.set_value(sample.value);

    let mut metric = Metric::default();
    metric.set_label(labels.into());
    metric.set_untyped(untyped);
    metric.set_timestamp_ms(sample.timestamp.timestamp_millis());

    let mut family = MetricFamily::default();
    family.set_name(sample.name);
    family.set_help(HELP_TEXT.to_string());
    family.set_field_type(MetricType::UNTYPED);
    family.set_metric(vec![metric].into());
    family
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::collections::BTreeMap;

    #[test]
    fn test_family_from_sample() {
        let sample = Sample {
            id: "cpu.host.a".to_string(),
            name: "cpu".to_string(),
            labels: BTreeMap::from([
                ("zone".to_string(), "eu".to_string()),
                ("host".to_string(), "a".to_string()),
            ]),
            value: 1.5,
            timestamp: DateTime::<Utc>::from_timestamp_nanos(1_000_999_999),
        };

        let family = metric_family(sample);
        assert_eq!(family.get_name(), "cpu");
        assert_eq!(family.get_help(), "InfluxDB Metric");
        assert_eq!(family.get_field_type(), MetricType::UNTYPED);
        assert_eq!(family.get_metric().len(), 1);

        let metric = &family.get_metric()[0];
        assert_eq!(metric.get_untyped().get_value(), 1.5);
        assert_eq!(metric.get_timestamp_ms(), 1000);

        let labels: Vec<(&str, &str)> = metric
            .get_label()
            .iter()
            .map(|l| (l.get_name(), l.get_value()))
            .collect();
        assert_eq!(labels, vec![("host", "a"), ("zone", "eu")]);
    }
}
