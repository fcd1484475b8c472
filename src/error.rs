//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ValidationError: a single problem found in the dependency declarations
//! - GenerateError: every validation problem found in one pass
//! - ConfigError: issues reading or decoding the configuration file
//! - IoError: file system operation failures

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration validation errors
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Configuration file related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// A declaration involved in a duplicate-name conflict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictingEntry {
    /// 1-based position in the configuration
    pub position: usize,
    /// Name as spelled in the configuration
    pub name: String,
}

impl fmt::Display for ConflictingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' (entry #{})", self.name, self.position)
    }
}

/// A problem with a single dependency declaration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Dependency name is missing or blank
    #[error("entry #{position} has an empty name")]
    EmptyName { position: usize },

    /// Dependency name is not a valid package name
    #[error("entry #{position} has an invalid package name '{name}'")]
    InvalidName { position: usize, name: String },

    /// Version constraint does not match any recognized form
    #[error("malformed version constraint '{raw}' for '{name}': {reason}")]
    MalformedConstraint {
        name: String,
        raw: String,
        reason: String,
    },

    /// Two or more entries normalize to the same package name
    #[error("duplicate dependency '{normalized}' declared as {}", format_entries(.entries))]
    DuplicateDependency {
        normalized: String,
        entries: Vec<ConflictingEntry>,
    },
}

fn format_entries(entries: &[ConflictingEntry]) -> String {
    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every validation problem found while generating a manifest
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid dependency configuration ({} error(s)):{}", .errors.len(), format_error_list(.errors))]
pub struct GenerateError {
    errors: Vec<ValidationError>,
}

fn format_error_list(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| format!("\n  - {}", e)).collect()
}

impl GenerateError {
    /// Creates a new GenerateError from collected validation errors
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Returns the collected validation errors in detection order
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns true if any of the errors is a duplicate dependency
    pub fn has_duplicates(&self) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e, ValidationError::DuplicateDependency { .. }))
    }
}

/// Errors related to the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read configuration file
    #[error("failed to read configuration file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("failed to parse YAML in {path}: {message}")]
    YamlParseError { path: PathBuf, message: String },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Unsupported configuration format
    #[error("unsupported configuration format: {path} (expected .yml, .yaml, .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// A dependency entry could not be converted
    #[error("invalid entry for '{name}': {message}")]
    InvalidEntry { name: String, message: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Failed to create the output directory
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the manifest
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read an existing manifest
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ValidationError {
    /// Creates a new MalformedConstraint error
    pub fn malformed(
        name: impl Into<String>,
        raw: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ValidationError::MalformedConstraint {
            name: name.into(),
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new YamlParseError
    pub fn yaml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::YamlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidEntry error
    pub fn invalid_entry(name: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidEntry {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl IoError {
    /// Creates a new CreateDir error
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Read {
            path: path.into(),
            source,
        }
    }
}
