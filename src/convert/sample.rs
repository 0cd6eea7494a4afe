//! Flattening of points into per-field samples.

use super::identity::series_identity;
use super::sanitize::sanitize;
use crate::core::{Logger, Result};
use crate::protocol::{FieldValue, Point};
use chrono::{DateTime, Utc};
use std::collections::{btree_map, BTreeMap};

/// Tag key that would collide with the metric name label.
pub const RESERVED_NAME_KEY: &str = "__name__";

/// Field name whose metric takes the bare measurement name.
pub const VALUE_FIELD: &str = "value";

/// One scalar observation ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Series identity, see [`series_identity`]
    pub id: String,
    /// Sanitized metric name
    pub name: String,
    /// Sanitized label keys to raw tag values
    pub labels: BTreeMap<String, String>,
    /// Field value coerced to a float
    pub value: f64,
    /// Timestamp of the source point
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    /// Build the sample for one field of `point`.
    ///
    /// Returns `None` when the field has no numeric representation.
    pub fn from_field(point: &Point, field: &str, value: &FieldValue) -> Option<Self> {
        let value = value.as_f64()?;

        let name = if field == VALUE_FIELD {
            sanitize(point.measurement())
        } else {
            sanitize(&format!("{}_{}", point.measurement(), field))
        };

        let labels: BTreeMap<String, String> = point
            .tags()
            .iter()
            .map(|tag| (sanitize(&tag.key), tag.value.clone()))
            .filter(|(key, _)| key != RESERVED_NAME_KEY)
            .collect();

        let id = series_identity(&name, labels.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        Some(Self {
            id,
            name,
            labels,
            value,
            timestamp: point.timestamp(),
        })
    }
}

/// Expands points into samples, one per numeric field.
#[derive(Debug, Clone)]
pub struct SampleFlattener {
    logger: Logger,
}

impl SampleFlattener {
    /// Flattener logging through `logger`
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Samples for every numeric field of `point`.
    ///
    /// A recoverable failure to read the point's fields is logged and
    /// yields `Ok(None)`; the caller moves on to the next point. Any other
    /// error is returned.
    pub fn flatten<'p>(&self, point: &'p Point) -> Result<Option<Samples<'p>>> {
        match point.fields() {
            Ok(fields) => Ok(Some(Samples {
                point,
                fields: fields.into_iter(),
                skipped: 0,
            })),
            Err(e) if e.is_recoverable() => {
                self.logger.scope(|| {
                    tracing::error!(
                        measurement = %point.measurement(),
                        error = %e,
                        "error getting fields from point"
                    );
                });
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }
}

/// Iterator over the samples of one point.
#[derive(Debug)]
pub struct Samples<'p> {
    point: &'p Point,
    fields: btree_map::IntoIter<String, FieldValue>,
    skipped: usize,
}

impl Samples<'_> {
    /// Fields passed over so far for having no numeric value.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for Samples<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        for (field, value) in self.fields.by_ref() {
            match Sample::from_field(self.point, &field, &value) {
                Some(sample) => return Some(sample),
                None => self.skipped += 1,
            }
        }
        None
    }
}
