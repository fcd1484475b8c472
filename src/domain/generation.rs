//! Generation result types

use super::Manifest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason why a declared dependency was left out of the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Dependency is tagged for other environments only
    EnvironmentMismatch,
    /// Feature selection is active and no selected feature references it
    NotInFeatures,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EnvironmentMismatch => write!(f, "not tagged for this environment"),
            SkipReason::NotInFeatures => write!(f, "not required by selected features"),
        }
    }
}

/// A dependency omitted from the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDependency {
    /// Package name as declared
    pub name: String,
    /// Why it was omitted
    pub reason: SkipReason,
}

impl SkippedDependency {
    /// Creates a new skipped dependency record
    pub fn new(name: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            name: name.into(),
            reason,
        }
    }
}

impl fmt::Display for SkippedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.reason)
    }
}

/// Outcome of a successful generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    /// Target environment used for filtering (empty means unfiltered)
    pub environment: String,
    /// Features that were selected (empty means no feature filter)
    pub features: Vec<String>,
    /// The generated manifest
    pub manifest: Manifest,
    /// Declared dependencies that were filtered out, in declaration order
    pub skipped: Vec<SkippedDependency>,
}

impl Generation {
    /// Returns the number of included dependencies
    pub fn included_count(&self) -> usize {
        self.manifest.len()
    }

    /// Returns the number of skipped dependencies
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Returns true if an environment filter was applied
    pub fn is_filtered(&self) -> bool {
        !self.environment.is_empty()
    }
}
