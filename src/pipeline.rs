//! Conversion pipeline: decode, flatten, encode.
//!
//! The whole buffer is decoded first; a decode failure aborts before any
//! output is produced. Points are then processed in input order and every
//! sample is encoded as soon as it is built.

use crate::convert::SampleFlattener;
use crate::core::{Logger, Result};
use crate::export::{metric_family, ExpositionEncoder};
use crate::protocol::{LineProtocolDecoder, PointDecoder, Precision};
use chrono::{DateTime, Utc};
use std::io::Write;

/// Counters for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Points decoded from the input
    pub points: usize,
    /// Samples written
    pub samples: usize,
    /// Points dropped because their fields could not be read
    pub skipped_points: usize,
    /// Fields dropped for having no numeric value
    pub skipped_fields: usize,
}

/// Drives a buffer through decoding, flattening and encoding.
#[derive(Debug, Clone)]
pub struct Converter<D = LineProtocolDecoder> {
    decoder: D,
    precision: Precision,
    flattener: SampleFlattener,
    logger: Logger,
}

impl Converter<LineProtocolDecoder> {
    /// Line protocol converter.
    pub fn new(precision: Precision, logger: Logger) -> Self {
        Self::with_decoder(LineProtocolDecoder, precision, logger)
    }
}

impl<D: PointDecoder> Converter<D> {
    /// Converter reading points from `decoder`.
    pub fn with_decoder(decoder: D, precision: Precision, logger: Logger) -> Self {
        Self {
            decoder,
            precision,
            flattener: SampleFlattener::new(logger.clone()),
            logger,
        }
    }

    /// Convert `input`, stamping points without a timestamp with the
    /// current UTC time.
    pub fn convert<W: Write>(&self, input: &[u8], writer: W) -> Result<ConversionStats> {
        self.convert_at(input, Utc::now(), writer)
    }

    /// Convert `input` with an explicit default timestamp.
    ///
    /// Output already written stays written when a later family fails to
    /// serialize.
    pub fn convert_at<W: Write>(
        &self,
        input: &[u8],
        default_time: DateTime<Utc>,
        writer: W,
    ) -> Result<ConversionStats> {
        let points = self.decoder.decode(input, default_time, self.precision)?;
        let mut encoder = ExpositionEncoder::new(writer);
        let mut stats = ConversionStats {
            points: points.len(),
            ..ConversionStats::default()
        };

        for point in &points {
            let Some(mut samples) = self.flattener.flatten(point)? else {
                stats.skipped_points += 1;
                continue;
            };

            for sample in samples.by_ref() {
                encoder.encode(&metric_family(sample))?;
                stats.samples += 1;
            }
            stats.skipped_fields += samples.skipped();
        }

        self.logger.scope(|| {
            tracing::debug!(
                points = stats.points,
                samples = stats.samples,
                skipped_points = stats.skipped_points,
                skipped_fields = stats.skipped_fields,
                "conversion finished"
            );
        });

        Ok(stats)
    }
}
