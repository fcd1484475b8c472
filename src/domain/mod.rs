//! Core domain models for reqgen
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency declarations and the configuration that holds them
//! - Version constraint types
//! - The generated manifest and the per-run generation result

mod configuration;
mod dependency;
mod generation;
mod manifest;
mod version_constraint;

pub use configuration::{Configuration, Feature};
pub use dependency::DependencySpec;
pub use generation::{Generation, SkipReason, SkippedDependency};
pub use manifest::{Manifest, ManifestEntry};
pub use version_constraint::{ConstraintKind, VersionConstraint};
