//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of a generation run
//! - Included requirement lines and skipped dependencies with reasons

use crate::domain::{ConstraintKind, SkipReason};
use crate::orchestrator::{OrchestratorResult, Outcome};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Output file path
    output: String,
    /// What happened to the output file
    status: &'static str,
    /// Target environment, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<&'a str>,
    /// Selected features
    #[serde(skip_serializing_if = "Vec::is_empty")]
    features: Vec<&'a str>,
    /// Included requirements in output order
    requirements: Vec<JsonRequirement<'a>>,
    /// Skipped dependencies (omitted in quiet mode)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<JsonSkip<'a>>,
}

/// JSON representation of an included requirement
#[derive(Serialize)]
struct JsonRequirement<'a> {
    /// Package name
    name: &'a str,
    /// Constraint kind
    kind: ConstraintKind,
    /// Full requirement line
    line: String,
}

/// JSON representation of a skipped dependency
#[derive(Serialize)]
struct JsonSkip<'a> {
    /// Package name
    name: &'a str,
    /// Reason for skipping
    reason: &'a SkipReason,
}

fn status_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Written => "written",
        Outcome::Unchanged => "unchanged",
        Outcome::DryRun => "dry_run",
        Outcome::CheckPassed => "up_to_date",
        Outcome::CheckFailed => "stale",
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let generation = &result.generation;

        let requirements = generation
            .manifest
            .entries()
            .iter()
            .map(|e| JsonRequirement {
                name: &e.name,
                kind: e.constraint.kind(),
                line: e.line(),
            })
            .collect();

        let skipped = if self.verbosity == Verbosity::Quiet {
            Vec::new()
        } else {
            generation
                .skipped
                .iter()
                .map(|s| JsonSkip {
                    name: &s.name,
                    reason: &s.reason,
                })
                .collect()
        };

        let output = JsonOutput {
            output: result.output.display().to_string(),
            status: status_label(result.outcome),
            environment: generation
                .is_filtered()
                .then_some(generation.environment.as_str()),
            features: generation.features.iter().map(String::as_str).collect(),
            requirements,
            skipped,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
