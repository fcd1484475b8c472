//! Generated manifest types

use super::VersionConstraint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One resolved requirement line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Package name as declared
    pub name: String,
    /// Parsed constraint
    pub constraint: VersionConstraint,
}

impl ManifestEntry {
    /// Creates a new entry
    pub fn new(name: impl Into<String>, constraint: VersionConstraint) -> Self {
        Self {
            name: name.into(),
            constraint,
        }
    }

    /// Renders the requirement line without a trailing newline
    pub fn line(&self) -> String {
        format!("{}{}", self.name, self.constraint.requirement_suffix())
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.line())
    }
}

/// Ordered set of requirement lines produced by a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Creates a manifest from entries, keeping their order
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Returns the entries in output order
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Returns the rendered lines in output order
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ManifestEntry::line).collect()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the manifest has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the file content: every line newline-terminated, nothing else.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.line());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
