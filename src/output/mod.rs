//! Report rendering for a finished run
//!
//! Three formatters share the [`OutputFormatter`] trait:
//! - [`TextFormatter`]: summary line, manifest echo on dry runs, details on `-v`
//! - [`JsonFormatter`]: machine-readable report
//! - [`DiffFormatter`]: unified diff against the previous requirements file

mod diff;
mod json;
mod text;

pub use diff::DiffFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::cli::CliArgs;
use crate::orchestrator::OrchestratorResult;
use std::io::Write;

/// Report format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Diff,
}

/// How much the report says
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Only failures, or the bare manifest on a dry run
    Quiet,
    Normal,
    /// Adds included and skipped dependencies
    Verbose,
}

/// Resolved report settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
    /// Colored text output; `NO_COLOR` is additionally honored by `colored`
    pub color: bool,
}

impl OutputConfig {
    /// Derives report settings from parsed arguments
    pub fn from_args(args: &CliArgs) -> Self {
        let format = match (args.json, args.diff) {
            (true, _) => OutputFormat::Json,
            (false, true) => OutputFormat::Diff,
            (false, false) => OutputFormat::Text,
        };
        let verbosity = match (args.quiet, args.verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        };
        Self {
            format,
            verbosity,
            color: !args.no_color,
        }
    }
}

/// Renders an [`OrchestratorResult`]
pub trait OutputFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Picks the formatter for `config`
pub fn create_formatter(config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
        OutputFormat::Diff => Box::new(DiffFormatter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(argv: &[&str]) -> OutputConfig {
        let args = CliArgs::parse_from(std::iter::once("reqgen").chain(argv.iter().copied()));
        OutputConfig::from_args(&args)
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            config(&[]),
            OutputConfig {
                format: OutputFormat::Text,
                verbosity: Verbosity::Normal,
                color: true,
            }
        );
    }

    #[test]
    fn test_format_flags() {
        assert_eq!(config(&["--json"]).format, OutputFormat::Json);
        assert_eq!(config(&["--diff"]).format, OutputFormat::Diff);
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(config(&["-v"]).verbosity, Verbosity::Verbose);
        assert_eq!(config(&["-q"]).verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_no_color_flag() {
        assert!(!config(&["--no-color"]).color);
    }
}
