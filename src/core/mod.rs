//! Core plumbing shared by every stage of the converter.
//!
//! Error taxonomy, run configuration and the logger handle live here.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{Config, ConfigBuilder, LogLevel, OutputTarget};
pub use error::{InfluxConvError, Result};
pub use logging::Logger;
