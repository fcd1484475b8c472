//! Manifest generation
//!
//! This module provides:
//! - Selection configuration (target environment and feature groups)
//! - Single-pass validation of every declaration
//! - The pure configuration → manifest transformation

mod selection;
mod validate;

pub use selection::Selection;
pub use validate::validate;

use crate::domain::{Configuration, Generation, Manifest, ManifestEntry, SkippedDependency};
use crate::error::GenerateError;
use tracing::debug;

/// Generates the manifest for `target_environment`.
///
/// An empty target disables environment filtering. Fails without producing
/// any output if a declaration is invalid.
pub fn generate(
    configuration: &Configuration,
    target_environment: &str,
) -> Result<Manifest, GenerateError> {
    generate_with(configuration, &Selection::new(target_environment)).map(|g| g.manifest)
}

/// Generates the manifest for a full selection, keeping track of what was
/// skipped and why.
pub fn generate_with(
    configuration: &Configuration,
    selection: &Selection,
) -> Result<Generation, GenerateError> {
    let constraints = validate(&configuration.dependencies, &selection.environment)?;
    let members = selection.feature_members(configuration);

    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for (dependency, constraint) in configuration.dependencies.iter().zip(constraints) {
        let name = dependency.name.trim();
        match selection.skip_reason(dependency, members.as_ref()) {
            Some(reason) => {
                debug!("Skipping '{}': {}", name, reason);
                skipped.push(SkippedDependency::new(name, reason));
            }
            None => {
                let entry = ManifestEntry::new(name, constraint);
                debug!("Added '{}'", entry);
                entries.push(entry);
            }
        }
    }

    Ok(Generation {
        environment: selection.environment.clone(),
        features: selection.features.clone(),
        manifest: Manifest::new(entries),
        skipped,
    })
}
