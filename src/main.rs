//! reqgen - Pinned requirements generator CLI tool
//!
//! Reads a dependency configuration and writes a pinned requirements file
//! for the selected environment and features.

use clap::Parser;
use reqgen::cli::CliArgs;
use reqgen::logging;
use reqgen::orchestrator::{Orchestrator, Outcome};
use reqgen::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = logging::init(args.verbose, args.quiet) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    // Run the main logic and handle errors
    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let mode = match (args.dry_run, args.check) {
        (true, _) => "dry-run",
        (false, true) => "check",
        (false, false) => "write",
    };
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %args.config.display(),
        mode,
        "Starting reqgen"
    );

    let output_config = OutputConfig::from_args(&args);
    let result = Orchestrator::new(args).run()?;

    let formatter = create_formatter(&output_config);
    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    if result.outcome == Outcome::CheckFailed {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
