//! Decoded line protocol points.

use crate::core::{InfluxConvError, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A `key=value` tag attached to a point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Unescaped tag key
    pub key: String,
    /// Unescaped tag value
    pub value: String,
}

impl Tag {
    /// Tag from an already unescaped key and value
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Field value as written on the line, before numeric conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Float literal, e.g. `1.5`, `-2e3`, `7`
    Float(String),
    /// Integer literal without its `i` suffix
    Integer(String),
    /// Unsigned literal without its `u` suffix
    Unsigned(String),
    /// Unescaped string value
    Str(String),
    /// Boolean literal
    Bool(bool),
}

/// Field value that is neither float, integer nor boolean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtherValue {
    /// Unsigned 64-bit integer
    Unsigned(u64),
    /// String value
    String(String),
}

/// Typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 64-bit float
    Float(f64),
    /// Signed 64-bit integer
    Integer(i64),
    /// Boolean
    Boolean(bool),
    /// Anything without a numeric sample representation
    Other(OtherValue),
}

impl FieldValue {
    /// Numeric sample value, `None` for [`FieldValue::Other`].
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Boolean(true) => Some(1.0),
            FieldValue::Boolean(false) => Some(0.0),
            FieldValue::Other(_) => None,
        }
    }

    /// Convert a raw literal, failing when it does not fit its type.
    pub(crate) fn from_raw(key: &str, raw: &RawValue) -> Result<Self> {
        match raw {
            RawValue::Float(text) => {
                let v: f64 = text
                    .parse()
                    .map_err(|e| InfluxConvError::field(key, format!("invalid float {text}: {e}")))?;
                if v.is_finite() {
                    Ok(FieldValue::Float(v))
                } else {
                    Err(InfluxConvError::field(key, format!("float {text} out of range")))
                }
            },
            RawValue::Integer(text) => text.parse().map(FieldValue::Integer).map_err(|e| {
                InfluxConvError::field(key, format!("invalid integer {text}i: {e}"))
            }),
            RawValue::Unsigned(text) => text
                .parse()
                .map(|v| FieldValue::Other(OtherValue::Unsigned(v)))
                .map_err(|e| InfluxConvError::field(key, format!("invalid unsigned {text}u: {e}"))),
            RawValue::Str(s) => Ok(FieldValue::Other(OtherValue::String(s.clone()))),
            RawValue::Bool(b) => Ok(FieldValue::Boolean(*b)),
        }
    }
}

/// Typed fields of a point, keyed by field name.
pub type FieldSet = BTreeMap<String, FieldValue>;

/// One decoded line: measurement, tags, fields and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    measurement: String,
    tags: Vec<Tag>,
    fields: Vec<(String, RawValue)>,
    timestamp: DateTime<Utc>,
}

impl Point {
    /// Assemble a point from decoded parts
    pub fn new(
        measurement: impl Into<String>,
        tags: Vec<Tag>,
        fields: Vec<(String, RawValue)>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            measurement: measurement.into(),
            tags,
            fields,
            timestamp,
        }
    }

    /// Unescaped measurement name
    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    /// Tags in the order they were written.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Point time, already scaled by the input precision
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Convert the raw field values into a [`FieldSet`].
    ///
    /// The line protocol decoder range-checks every literal, so this only
    /// fails for points built by other decoders. A repeated key keeps its
    /// last value.
    pub fn fields(&self) -> Result<FieldSet> {
        self.fields
            .iter()
            .map(|(key, raw)| FieldValue::from_raw(key, raw).map(|value| (key.clone(), value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(fields: Vec<(&str, RawValue)>) -> Point {
        Point::new(
            "cpu",
            vec![Tag::new("host", "a")],
            fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            DateTime::<Utc>::from_timestamp_nanos(0),
        )
    }

    #[test]
    fn test_coercion() {
        assert_eq!(FieldValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(FieldValue::Integer(-42).as_f64(), Some(-42.0));
        assert_eq!(FieldValue::Boolean(true).as_f64(), Some(1.0));
        assert_eq!(FieldValue::Boolean(false).as_f64(), Some(0.0));
        assert_eq!(FieldValue::Other(OtherValue::Unsigned(3)).as_f64(), None);
        assert_eq!(FieldValue::Other(OtherValue::String("x".into())).as_f64(), None);
    }

    #[test]
    fn test_fields_conversion() {
        let p = point(vec![
            ("a", RawValue::Float("2.5".into())),
            ("b", RawValue::Integer("7".into())),
            ("c", RawValue::Unsigned("9".into())),
            ("d", RawValue::Str("hi".into())),
            ("e", RawValue::Bool(true)),
        ]);
        let fields = p.fields().unwrap();
        assert_eq!(fields["a"], FieldValue::Float(2.5));
        assert_eq!(fields["b"], FieldValue::Integer(7));
        assert_eq!(fields["c"], FieldValue::Other(OtherValue::Unsigned(9)));
        assert_eq!(fields["d"], FieldValue::Other(OtherValue::String("hi".into())));
        assert_eq!(fields["e"], FieldValue::Boolean(true));
    }

    #[test]
    fn test_repeated_field_keeps_last() {
        let p = point(vec![
            ("value", RawValue::Float("1".into())),
            ("value", RawValue::Float("2".into())),
        ]);
        assert_eq!(p.fields().unwrap()["value"], FieldValue::Float(2.0));
    }

    #[test]
    fn test_integer_overflow_fails() {
        let p = point(vec![("value", RawValue::Integer("99999999999999999999".into()))]);
        let err = p.fields().unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("value"));
    }

    #[test]
    fn test_float_out_of_range_fails() {
        let p = point(vec![("value", RawValue::Float("1e400".into()))]);
        assert!(p.fields().is_err());
    }
}
