//! Dependency declaration structures

use super::ConstraintKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single dependency entry as declared in the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Package name, possibly with extras (e.g. `uvicorn[standard]`)
    pub name: String,
    /// Raw version constraint string
    pub version_constraint: String,
    /// Optional declared constraint kind; the raw string must agree with it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint_kind: Option<ConstraintKind>,
    /// Environments this dependency belongs to (empty means all)
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub environment_tags: BTreeSet<String>,
    /// Raw constraints that replace `version_constraint` in a given environment
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment_overrides: BTreeMap<String, String>,
}

impl DependencySpec {
    /// Creates a dependency available in every environment
    pub fn new(name: impl Into<String>, version_constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_constraint: version_constraint.into(),
            constraint_kind: None,
            environment_tags: BTreeSet::new(),
            environment_overrides: BTreeMap::new(),
        }
    }

    /// Creates an unconstrained dependency
    pub fn latest(name: impl Into<String>) -> Self {
        Self::new(name, "").with_kind(ConstraintKind::Latest)
    }

    /// Sets the declared constraint kind (builder pattern)
    pub fn with_kind(mut self, kind: ConstraintKind) -> Self {
        self.constraint_kind = Some(kind);
        self
    }

    /// Restricts this dependency to the given environments (builder pattern)
    pub fn with_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environment_tags = environments.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an environment-specific constraint override (builder pattern)
    pub fn with_override(
        mut self,
        environment: impl Into<String>,
        version_constraint: impl Into<String>,
    ) -> Self {
        self.environment_overrides
            .insert(environment.into(), version_constraint.into());
        self
    }

    /// Returns true if this dependency is part of the target environment.
    ///
    /// An empty target disables environment filtering.
    pub fn applies_to(&self, target_environment: &str) -> bool {
        target_environment.is_empty()
            || self.environment_tags.is_empty()
            || self.environment_tags.contains(target_environment)
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constraint = if self.version_constraint.is_empty() {
            "latest"
        } else {
            self.version_constraint.as_str()
        };
        write!(f, "{} ({})", self.name, constraint)?;
        if !self.environment_tags.is_empty() {
            let tags: Vec<&str> = self.environment_tags.iter().map(String::as_str).collect();
            write!(f, " [{}]", tags.join(", "))?;
        }
        Ok(())
    }
}
