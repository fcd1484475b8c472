//! Diagnostic logging setup
//!
//! Logs go to stderr so stdout stays reserved for the report (and for the
//! manifest itself in dry-run mode). `RUST_LOG` takes precedence over the
//! level derived from `--verbose` / `--quiet`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter directive for the given verbosity flags
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "reqgen=warn"
    } else if verbose {
        "reqgen=debug"
    } else {
        "reqgen=info"
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns an error if a subscriber is already installed or `RUST_LOG`
/// cannot be parsed.
pub fn init(verbose: bool, quiet: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose, quiet)))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
