//! influxconv - InfluxDB line protocol to OpenMetrics converter.
//!
//! Reads a batch of line protocol points and writes every numeric field as
//! its own untyped OpenMetrics family.
//!
//! # Architecture
//!
//! - `protocol`: line protocol decoding into points
//! - `convert`: sanitization, series identity and point flattening
//! - `export`: `prometheus` metric families and their text writer
//! - `pipeline`: the decode, flatten, encode driver
//! - `core`: errors, configuration and the logger handle
//! - `cli`: command-line interface
//!
//! # Example
//!
//! ```
//! use influxconv_lib::core::Logger;
//! use influxconv_lib::pipeline::Converter;
//! use influxconv_lib::protocol::Precision;
//!
//! let converter = Converter::new(Precision::Nanoseconds, Logger::disabled());
//! let mut out = Vec::new();
//! converter.convert(b"cpu,host=a value=1.5 1000000000", &mut out).unwrap();
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("cpu{host=\"a\"} 1.5 1"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod cli;
pub mod convert;
pub mod core;
pub mod export;
pub mod pipeline;
pub mod protocol;

// Re-export core types for convenience
pub use crate::core::{Config, Result};
pub use crate::pipeline::{ConversionStats, Converter};
