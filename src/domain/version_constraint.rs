//! Version constraint types for requirement lines
//!
//! Handles constraint forms like:
//! - Exact pin: `==1.2.3` (or a bare `1.2.3`)
//! - Minimum version: `>=1.2.3`
//! - Range: `>=1.0,<2.0`, `~=1.4`, `!=1.5`
//! - Unconstrained: `latest`, `*`, or nothing at all

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of version constraint, as declared in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Exact/pinned version
    Exact,
    /// Greater than or equal to a version
    Minimum,
    /// Arbitrary comparison clauses
    Range,
    /// Any version
    Latest,
}

impl ConstraintKind {
    /// Returns the configuration keyword for this kind
    pub fn keyword(&self) -> &'static str {
        match self {
            ConstraintKind::Exact => "exact",
            ConstraintKind::Minimum => "minimum",
            ConstraintKind::Range => "range",
            ConstraintKind::Latest => "latest",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A parsed version constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum VersionConstraint {
    /// `==version`
    Pinned(String),
    /// `>=version`
    MinimumVersion(String),
    /// A normalized range expression such as `>=1.0,<2.0`
    Range(String),
    /// No version requirement
    Unconstrained,
}

impl VersionConstraint {
    /// Returns the kind of this constraint
    pub fn kind(&self) -> ConstraintKind {
        match self {
            VersionConstraint::Pinned(_) => ConstraintKind::Exact,
            VersionConstraint::MinimumVersion(_) => ConstraintKind::Minimum,
            VersionConstraint::Range(_) => ConstraintKind::Range,
            VersionConstraint::Unconstrained => ConstraintKind::Latest,
        }
    }

    /// Renders the suffix that follows the package name in a requirement line
    pub fn requirement_suffix(&self) -> String {
        match self {
            VersionConstraint::Pinned(version) => format!("=={}", version),
            VersionConstraint::MinimumVersion(version) => format!(">={}", version),
            VersionConstraint::Range(expr) => expr.clone(),
            VersionConstraint::Unconstrained => String::new(),
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Unconstrained => write!(f, "latest"),
            other => write!(f, "{}", other.requirement_suffix()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(
            VersionConstraint::Pinned("1.0".into()).kind(),
            ConstraintKind::Exact
        );
        assert_eq!(
            VersionConstraint::MinimumVersion("1.0".into()).kind(),
            ConstraintKind::Minimum
        );
        assert_eq!(
            VersionConstraint::Range(">=1.0,<2.0".into()).kind(),
            ConstraintKind::Range
        );
        assert_eq!(VersionConstraint::Unconstrained.kind(), ConstraintKind::Latest);
    }

    #[test]
    fn test_requirement_suffix() {
        assert_eq!(
            VersionConstraint::Pinned("2.31.0".into()).requirement_suffix(),
            "==2.31.0"
        );
        assert_eq!(
            VersionConstraint::MinimumVersion("1.26".into()).requirement_suffix(),
            ">=1.26"
        );
        assert_eq!(
            VersionConstraint::Range(">=4.0,<5.0".into()).requirement_suffix(),
            ">=4.0,<5.0"
        );
        assert_eq!(VersionConstraint::Unconstrained.requirement_suffix(), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", VersionConstraint::Unconstrained), "latest");
        assert_eq!(
            format!("{}", VersionConstraint::Pinned("1.0".into())),
            "==1.0"
        );
    }

    #[test]
    fn test_serde_constraint_kind() {
        let json = serde_json::to_string(&ConstraintKind::Minimum).unwrap();
        assert_eq!(json, "\"minimum\"");

        let parsed: ConstraintKind = serde_json::from_str("\"latest\"").unwrap();
        assert_eq!(parsed, ConstraintKind::Latest);
    }

    #[test]
    fn test_serde_version_constraint() {
        let constraint = VersionConstraint::Pinned("3.0.0".into());
        let json = serde_json::to_string(&constraint).unwrap();
        assert_eq!(json, r#"{"kind":"pinned","value":"3.0.0"}"#);

        let unconstrained = serde_json::to_string(&VersionConstraint::Unconstrained).unwrap();
        assert_eq!(unconstrained, r#"{"kind":"unconstrained"}"#);
    }
}
