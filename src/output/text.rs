//! Text output formatter for human-readable display
//!
//! This module provides:
//! - A one-line summary of what happened to the output file
//! - The manifest itself in dry-run mode
//! - Included and skipped dependencies in verbose mode

use crate::domain::{ConstraintKind, Generation, ManifestEntry, SkippedDependency};
use crate::orchestrator::{OrchestratorResult, Outcome};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a text formatter; `color: false` renders plain text
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Describe the selection used for this run, e.g. `environment: prod`
    fn selection_label(&self, generation: &Generation) -> String {
        let mut parts = Vec::new();
        if generation.is_filtered() {
            parts.push(format!("environment: {}", generation.environment));
        }
        if !generation.features.is_empty() {
            parts.push(format!("features: {}", generation.features.join(", ")));
        }
        parts.join("; ")
    }

    /// Short label for a constraint kind
    fn kind_label(kind: ConstraintKind) -> &'static str {
        match kind {
            ConstraintKind::Exact => "pinned",
            ConstraintKind::Minimum => "minimum",
            ConstraintKind::Range => "range",
            ConstraintKind::Latest => "latest",
        }
    }

    /// Format an included entry line
    fn format_entry_line(
        &self,
        entry: &ManifestEntry,
        max_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let kind = Self::kind_label(entry.constraint.kind());
        let line = format!("{:width$}", entry.line(), width = max_len);
        if self.color {
            writeln!(writer, "  {} {}", line.bright_white(), format!("[{}]", kind).dimmed())
        } else {
            writeln!(writer, "  {} [{}]", line, kind)
        }
    }

    /// Format a skipped entry line
    fn format_skip_line(
        &self,
        skipped: &SkippedDependency,
        max_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let name = format!("{:width$}", skipped.name, width = max_len);
        if self.color {
            writeln!(
                writer,
                "  {} {}",
                name.dimmed(),
                format!("({})", skipped.reason).dimmed()
            )
        } else {
            writeln!(writer, "  {} ({})", name, skipped.reason)
        }
    }

    /// Write the per-entry breakdown shown in verbose mode
    fn format_details(&self, generation: &Generation, writer: &mut dyn Write) -> std::io::Result<()> {
        let entries = generation.manifest.entries();
        let max_len = entries
            .iter()
            .map(|e| e.line().len())
            .chain(generation.skipped.iter().map(|s| s.name.len()))
            .max()
            .unwrap_or(0)
            .max(20);

        for entry in entries {
            self.format_entry_line(entry, max_len, writer)?;
        }

        if !generation.skipped.is_empty() {
            writeln!(writer)?;
            if self.color {
                writeln!(writer, "  {}", "Skipped:".dimmed())?;
            } else {
                writeln!(writer, "  Skipped:")?;
            }
            for skipped in &generation.skipped {
                self.format_skip_line(skipped, max_len, writer)?;
            }
        }
        writeln!(writer)
    }

    /// Write the summary line for the run outcome
    fn format_summary(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let count = result.generation.included_count();
        let packages = if count == 1 { "package" } else { "packages" };
        let path = result.output.display().to_string();
        let selection = self.selection_label(&result.generation);
        let detail = if selection.is_empty() {
            format!("{} {}", count, packages)
        } else {
            format!("{} {}, {}", count, packages, selection)
        };

        let (mark, message) = match result.outcome {
            Outcome::Written => ("✓", format!("Wrote {} ({})", path, detail)),
            Outcome::Unchanged => ("✓", format!("{} is already up to date ({})", path, detail)),
            Outcome::DryRun => ("•", format!("(dry-run) Would write {} ({})", path, detail)),
            Outcome::CheckPassed => ("✓", format!("{} is up to date ({})", path, detail)),
            Outcome::CheckFailed => {
                let state = if result.previous().is_some() {
                    "is out of date"
                } else {
                    "does not exist"
                };
                ("✗", format!("{} {} ({})", path, state, detail))
            }
        };

        if self.color {
            let mark = match result.outcome {
                Outcome::CheckFailed => mark.red().bold(),
                Outcome::DryRun => mark.cyan(),
                _ => mark.green().bold(),
            };
            writeln!(writer, "{} {}", mark, message)
        } else {
            writeln!(writer, "{} {}", mark, message)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        // The manifest itself goes first so dry-run output can be piped
        if result.outcome == Outcome::DryRun {
            write!(writer, "{}", result.content)?;
            if self.verbosity == Verbosity::Quiet {
                return Ok(());
            }
            writeln!(writer)?;
        }

        if self.verbosity == Verbosity::Verbose {
            self.format_details(&result.generation, writer)?;
        }

        if self.verbosity == Verbosity::Quiet && !result.outcome.is_failure() {
            return Ok(());
        }
        self.format_summary(result, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Manifest, SkipReason, VersionConstraint};
    use crate::manifest::ManifestStatus;
    use std::path::PathBuf;

    fn sample_result(outcome: Outcome) -> OrchestratorResult {
        let manifest = Manifest::new(vec![
            ManifestEntry::new("flask", VersionConstraint::Pinned("3.0.0".into())),
            ManifestEntry::new("numpy", VersionConstraint::Unconstrained),
        ]);
        let content = manifest.render();
        OrchestratorResult {
            generation: Generation {
                environment: "prod".to_string(),
                features: Vec::new(),
                manifest,
                skipped: vec![SkippedDependency::new(
                    "pytest",
                    SkipReason::EnvironmentMismatch,
                )],
            },
            output: PathBuf::from("requirements.txt"),
            content,
            status: ManifestStatus::Missing,
            outcome,
        }
    }

    fn render(formatter: &TextFormatter, result: &OrchestratorResult) -> String {
        let mut buf = Vec::new();
        formatter.format(result, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_written_summary() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let out = render(&formatter, &sample_result(Outcome::Written));
        assert_eq!(
            out,
            "✓ Wrote requirements.txt (2 packages, environment: prod)\n"
        );
    }

    #[test]
    fn test_dry_run_prints_manifest_first() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let out = render(&formatter, &sample_result(Outcome::DryRun));
        assert!(out.starts_with("flask==3.0.0\nnumpy\n\n"));
        assert!(out.contains("(dry-run) Would write requirements.txt"));
    }

    #[test]
    fn test_quiet_dry_run_prints_only_manifest() {
        let formatter = TextFormatter::with_color(Verbosity::Quiet, false);
        let out = render(&formatter, &sample_result(Outcome::DryRun));
        assert_eq!(out, "flask==3.0.0\nnumpy\n");
    }

    #[test]
    fn test_quiet_success_is_silent() {
        let formatter = TextFormatter::with_color(Verbosity::Quiet, false);
        assert_eq!(render(&formatter, &sample_result(Outcome::Written)), "");
    }

    #[test]
    fn test_quiet_check_failure_is_reported() {
        let formatter = TextFormatter::with_color(Verbosity::Quiet, false);
        let out = render(&formatter, &sample_result(Outcome::CheckFailed));
        assert!(out.contains("✗ requirements.txt does not exist"));
    }

    #[test]
    fn test_check_failure_on_stale_file() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let mut result = sample_result(Outcome::CheckFailed);
        result.status = ManifestStatus::Stale {
            existing: "flask==2.0.0\n".to_string(),
        };
        let out = render(&formatter, &result);
        assert!(out.contains("requirements.txt is out of date"));
    }

    #[test]
    fn test_verbose_lists_entries_and_skips() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let out = render(&formatter, &sample_result(Outcome::Written));
        assert!(out.contains("flask==3.0.0"));
        assert!(out.contains("[pinned]"));
        assert!(out.contains("[latest]"));
        assert!(out.contains("Skipped:"));
        assert!(out.contains("pytest"));
        assert!(out.contains("(not tagged for this environment)"));
    }

    #[test]
    fn test_selection_label_with_features() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let mut result = sample_result(Outcome::Written);
        result.generation.features = vec!["api".to_string(), "db".to_string()];
        let out = render(&formatter, &result);
        assert!(out.contains("environment: prod; features: api, db"));
    }

    #[test]
    fn test_singular_package() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let mut result = sample_result(Outcome::Unchanged);
        result.generation.environment.clear();
        result.generation.manifest = Manifest::new(vec![ManifestEntry::new(
            "flask",
            VersionConstraint::Unconstrained,
        )]);
        let out = render(&formatter, &result);
        assert_eq!(out, "✓ requirements.txt is already up to date (1 package)\n");
    }
}
