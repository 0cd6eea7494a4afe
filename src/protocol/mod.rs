//! InfluxDB line protocol decoding.
//!
//! Turns a raw input buffer into [`Point`]s. Syntax and numeric ranges are
//! checked up front; typed field values are produced by [`Point::fields`].

pub mod parser;
pub mod precision;
pub mod types;

use crate::core::Result;
use chrono::{DateTime, Utc};

pub use parser::parse_points_with_precision;
pub use precision::Precision;
pub use types::{FieldSet, FieldValue, OtherValue, Point, RawValue, Tag};

/// Source of decoded points for the conversion pipeline
pub trait PointDecoder {
    /// Decode a complete buffer. Any malformed input fails the whole buffer.
    fn decode(&self, buf: &[u8], default_time: DateTime<Utc>, precision: Precision) -> Result<Vec<Point>>;
}

/// Decoder for InfluxDB line protocol text
#[derive(Debug, Clone, Copy, Default)]
pub struct LineProtocolDecoder;

impl PointDecoder for LineProtocolDecoder {
    fn decode(&self, buf: &[u8], default_time: DateTime<Utc>, precision: Precision) -> Result<Vec<Point>> {
        parse_points_with_precision(buf, default_time, precision)
    }
}
