//! Configuration for a conversion run.
//!
//! The surface is intentionally small: the timestamp precision of the
//! input, where the exposition is written, and how chatty the logger is.

use crate::core::{InfluxConvError, Result};
use crate::protocol::Precision;
use std::path::PathBuf;

/// Complete configuration for a conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Timestamp precision of the input
    pub precision: Precision,
    /// Output target for the exposition
    pub output: OutputTarget,
    /// Log verbosity
    pub log_level: LogLevel,
}

/// Where encoded metric families are written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output
    #[default]
    Stdout,
    /// A file, created or truncated
    File(PathBuf),
}

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level, set by `--debug`
    Debug,
    /// Warnings and errors only
    #[default]
    Warn,
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let OutputTarget::File(path) = &self.output {
            if path.as_os_str().is_empty() {
                return Err(InfluxConvError::config("Output path cannot be empty"));
            }
            if path.is_dir() {
                return Err(InfluxConvError::config(format!(
                    "Output path {} is a directory",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

impl LogLevel {
    /// Convert to tracing filter string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Warn => "warn",
        }
    }
}

/// Configuration builder for programmatic construction
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
        }
    }

    /// Set input timestamp precision
    pub fn precision(mut self, precision: Precision) -> Self {
        self.config.precision = precision;
        self
    }

    /// Write to a file instead of stdout
    pub fn output_file(mut self, path: PathBuf) -> Self {
        self.config.output = OutputTarget::File(path);
        self
    }

    /// Enable debug logging
    pub fn debug(mut self, debug: bool) -> Self {
        if debug {
            self.config.log_level = LogLevel::Debug;
        }
        self
    }

    /// Build and validate configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
