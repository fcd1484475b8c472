//! Selection configuration
//!
//! This module provides the Selection struct that encapsulates the options
//! deciding which declared dependencies end up in the manifest.

use crate::domain::{Configuration, DependencySpec, SkipReason};
use crate::parser::normalize_name;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Filter configuration for a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Target environment (empty means no environment filter)
    pub environment: String,
    /// Features to include (empty means every dependency)
    pub features: Vec<String>,
}

impl Selection {
    /// Create a selection for the given target environment
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            features: Vec::new(),
        }
    }

    /// Set features to include
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Check if feature selection is active
    pub fn has_feature_filter(&self) -> bool {
        !self.features.is_empty()
    }

    /// Resolves the selected features into the set of normalized dependency
    /// names they require.
    ///
    /// Returns `None` when no feature filter is active. Unknown features and
    /// references to undeclared dependencies are skipped with a warning.
    pub fn feature_members(&self, config: &Configuration) -> Option<HashSet<String>> {
        if !self.has_feature_filter() {
            return None;
        }

        let declared: HashSet<String> = config
            .dependencies
            .iter()
            .map(|d| normalize_name(&d.name))
            .collect();

        let mut members = HashSet::new();
        for feature_name in &self.features {
            let Some(feature) = config.feature(feature_name) else {
                warn!("Feature '{}' not found in configuration. Skipping.", feature_name);
                continue;
            };
            debug!(
                "Feature '{}' requires dependencies: {:?}",
                feature.name, feature.dependencies
            );
            for dep in &feature.dependencies {
                let normalized = normalize_name(dep);
                if declared.contains(&normalized) {
                    members.insert(normalized);
                } else {
                    warn!(
                        "Dependency '{}' required by feature '{}' is not declared. Skipping.",
                        dep, feature.name
                    );
                }
            }
        }
        Some(members)
    }

    /// Decides whether a dependency is left out, and why
    pub fn skip_reason(
        &self,
        dependency: &DependencySpec,
        members: Option<&HashSet<String>>,
    ) -> Option<SkipReason> {
        if !dependency.applies_to(&self.environment) {
            return Some(SkipReason::EnvironmentMismatch);
        }
        if let Some(members) = members {
            if !members.contains(&normalize_name(&dependency.name)) {
                return Some(SkipReason::NotInFeatures);
            }
        }
        None
    }
}
