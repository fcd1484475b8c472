//! Generation orchestrator for coordinating the whole workflow
//!
//! This module provides:
//! - Workflow coordination: load → generate → write (or check)
//! - Dry-run and check mode support
//! - Target environment resolution from CLI and configuration

use crate::cli::CliArgs;
use crate::config::load_configuration;
use crate::domain::Generation;
use crate::error::AppError;
use crate::generator::{generate_with, Selection};
use crate::manifest::{read_manifest, ManifestStatus, ManifestWriter};
use std::path::PathBuf;
use tracing::info;

/// What happened to the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The file was written
    Written,
    /// The file already had the generated content
    Unchanged,
    /// Dry run: nothing was written
    DryRun,
    /// Check mode: the file is up to date
    CheckPassed,
    /// Check mode: the file is missing or stale
    CheckFailed,
}

impl Outcome {
    /// Returns true if the run should exit unsuccessfully
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::CheckFailed)
    }
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct OrchestratorResult {
    /// Manifest and skipped entries
    pub generation: Generation,
    /// Output file path
    pub output: PathBuf,
    /// Rendered manifest content
    pub content: String,
    /// State of the output file before this run
    pub status: ManifestStatus,
    /// What happened to the output file
    pub outcome: Outcome,
}

impl OrchestratorResult {
    /// Returns true if the output file differs from the generated content
    pub fn has_changes(&self) -> bool {
        !self.status.is_up_to_date()
    }

    /// Content of the output file before this run, if it existed
    pub fn previous(&self) -> Option<&str> {
        match &self.status {
            ManifestStatus::UpToDate => Some(&self.content),
            ManifestStatus::Stale { existing } => Some(existing),
            ManifestStatus::Missing => None,
        }
    }
}

/// Orchestrator for coordinating the generation workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CliArgs) -> Self {
        Self { args }
    }

    /// Run the generation workflow
    pub fn run(&self) -> Result<OrchestratorResult, AppError> {
        let config = load_configuration(&self.args.config)?;

        let environment = self
            .args
            .target_environment(config.environment.as_deref());
        let selection = Selection::new(environment).with_features(self.args.features.clone());

        if selection.environment.is_empty() {
            info!("No target environment; including every environment");
        } else {
            info!("Target environment: {}", selection.environment);
        }
        if selection.has_feature_filter() {
            info!("Processing requested features: {:?}", selection.features);
        }

        let generation = generate_with(&config, &selection)?;
        let content = generation.manifest.render();
        let existing = read_manifest(&self.args.output)?;
        let status = ManifestStatus::compare(existing.as_deref(), &content);

        let outcome = if self.args.check {
            if status.is_up_to_date() {
                Outcome::CheckPassed
            } else {
                Outcome::CheckFailed
            }
        } else {
            let writer = ManifestWriter::new(self.args.dry_run);
            let written = writer.write(&self.args.output, &content, &status)?;
            if writer.is_dry_run() {
                Outcome::DryRun
            } else if written {
                Outcome::Written
            } else {
                Outcome::Unchanged
            }
        };

        info!(
            "Generated '{}' with {} packages",
            self.args.output.display(),
            generation.included_count()
        );

        Ok(OrchestratorResult {
            generation,
            output: self.args.output.clone(),
            content,
            status,
            outcome,
        })
    }
}
