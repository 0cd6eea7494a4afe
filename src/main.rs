//! influxconv CLI entry point.

use influxconv_lib::cli::{self, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    match cli::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        },
    }
}
