//! Command-line interface for influxconv.
//!
//! `influxconv metrics.lp > metrics.txt` is the whole story; the flags only
//! pick the timestamp precision, the output file and the log verbosity.

use crate::core::{Config, ConfigBuilder, InfluxConvError, Logger, OutputTarget, Result};
use crate::pipeline::Converter;
use crate::protocol::Precision;
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Convert InfluxDB line protocol into OpenMetrics text
#[derive(Parser, Debug)]
#[command(name = "influxconv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Line protocol file to convert
    pub input: PathBuf,

    /// Timestamp precision of the input (ns, us, ms, s, m, h)
    #[arg(short, long, default_value = "ns")]
    pub precision: Precision,

    /// Write the exposition to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Build the run configuration from the parsed arguments.
    pub fn load_config(&self) -> Result<Config> {
        let mut builder = ConfigBuilder::new()
            .precision(self.precision)
            .debug(self.debug);

        if let Some(path) = &self.output {
            builder = builder.output_file(path.clone());
        }

        builder.build()
    }
}

/// Run one conversion as described by `cli`.
pub fn execute(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;
    let logger = Logger::stderr(config.log_level);

    let input = std::fs::read(&cli.input).map_err(|e| InfluxConvError::input(&cli.input, e))?;
    logger.scope(|| {
        tracing::debug!(
            path = %cli.input.display(),
            bytes = input.len(),
            precision = %config.precision,
            "read input"
        );
    });

    let mut writer = open_output(&config.output)?;
    Converter::new(config.precision, logger).convert(&input, &mut writer)?;
    writer
        .flush()
        .map_err(|e| InfluxConvError::serialization(format!("failed to flush output: {}", e)))?;

    Ok(())
}

fn open_output(target: &OutputTarget) -> Result<BufWriter<Box<dyn Write>>> {
    let inner: Box<dyn Write> = match target {
        OutputTarget::Stdout => Box::new(std::io::stdout().lock()),
        OutputTarget::File(path) => Box::new(File::create(path).map_err(|e| {
            InfluxConvError::config(format!("Failed to create output {}: {}", path.display(), e))
        })?),
    };
    Ok(BufWriter::new(inner))
}
