//! Diff output formatter for showing changes
//!
//! This module provides:
//! - Unified diff between the existing requirements file and the new content

use crate::orchestrator::{OrchestratorResult, Outcome};
use crate::output::OutputFormatter;
use similar::TextDiff;
use std::io::Write;

/// Diff formatter for showing requirement changes
pub struct DiffFormatter;

impl DiffFormatter {
    /// Create a new diff formatter
    pub fn new() -> Self {
        Self
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(outcome: Outcome) -> &'static str {
        if outcome == Outcome::DryRun {
            "(dry-run) "
        } else {
            ""
        }
    }
}

impl Default for DiffFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for DiffFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = Self::dry_run_prefix(result.outcome);
        let path = result.output.display().to_string();

        if !result.has_changes() {
            return writeln!(writer, "{}No changes to {}", prefix, path);
        }

        let old = result.previous().unwrap_or("");
        let old_header = if result.previous().is_some() {
            format!("a/{}", path)
        } else {
            "/dev/null".to_string()
        };

        if !prefix.is_empty() {
            writeln!(writer, "{}", prefix.trim_end())?;
        }
        let diff = TextDiff::from_lines(old, result.content.as_str());
        write!(
            writer,
            "{}",
            diff.unified_diff()
                .header(&old_header, &format!("b/{}", path))
        )
    }
}
