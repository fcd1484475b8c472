//! Requirements file writing and freshness checks
//!
//! This module provides:
//! - ManifestWriter for writing rendered manifests to disk
//! - Dry-run mode support (no actual file modifications)
//! - Up-to-date checks against an existing requirements file
//!
//! Existing files are read and compared as raw bytes; a file that is not
//! valid UTF-8 is simply stale.

use crate::error::IoError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Writer for requirements files
pub struct ManifestWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

/// Freshness of an existing requirements file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestStatus {
    /// File exists with exactly the expected content
    UpToDate,
    /// File exists with different content
    Stale {
        /// Content currently on disk, with invalid UTF-8 replaced
        existing: String,
    },
    /// File does not exist
    Missing,
}

impl ManifestStatus {
    /// Compares the bytes of an existing file against the expected content
    pub fn compare(existing: Option<&[u8]>, expected: &str) -> Self {
        match existing {
            None => ManifestStatus::Missing,
            Some(bytes) if bytes == expected.as_bytes() => ManifestStatus::UpToDate,
            Some(bytes) => ManifestStatus::Stale {
                existing: String::from_utf8_lossy(bytes).into_owned(),
            },
        }
    }

    /// Returns true if the file matches the expected content
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, ManifestStatus::UpToDate)
    }
}

impl ManifestWriter {
    /// Create a new ManifestWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Check if this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Write `content` to `path` unless `status` says the file already
    /// holds it. Returns true if the file was written.
    pub fn write(&self, path: &Path, content: &str, status: &ManifestStatus) -> Result<bool, IoError> {
        if self.dry_run {
            debug!("Dry run: not writing {}", path.display());
            return Ok(false);
        }
        if status.is_up_to_date() {
            debug!("{} is already up to date", path.display());
            return Ok(false);
        }

        write_manifest(path, content)?;
        info!("Wrote {}", path.display());
        Ok(true)
    }
}

/// Read the raw bytes of an existing requirements file, if there is one
pub fn read_manifest(path: &Path) -> Result<Option<Vec<u8>>, IoError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(IoError::read(path, e)),
    }
}

/// Write content to a requirements file, creating parent directories
pub fn write_manifest(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| IoError::create_dir(parent, e))?;
    }
    fs::write(path, content).map_err(|e| IoError::write(path, e))
}

/// Compare an existing requirements file against the expected content
pub fn check_manifest(path: &Path, expected: &str) -> Result<ManifestStatus, IoError> {
    let existing = read_manifest(path)?;
    Ok(ManifestStatus::compare(existing.as_deref(), expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_writer_new() {
        let writer = ManifestWriter::new(false);
        assert!(!writer.is_dry_run());

        let writer = ManifestWriter::new(true);
        assert!(writer.is_dry_run());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("build/deps/requirements.txt");

        let written = ManifestWriter::new(false)
            .write(&path, "flask==3.0.0\n", &ManifestStatus::Missing)
            .unwrap();

        assert!(written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "flask==3.0.0\n");
    }

    #[test]
    fn test_write_dry_run_leaves_disk_alone() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("requirements.txt");

        let written = ManifestWriter::new(true)
            .write(&path, "flask\n", &ManifestStatus::Missing)
            .unwrap();

        assert!(!written);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_skips_up_to_date_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("requirements.txt");
        fs::write(&path, "numpy\n").unwrap();

        let written = ManifestWriter::new(false)
            .write(&path, "numpy\n", &ManifestStatus::UpToDate)
            .unwrap();

        assert!(!written);
    }

    #[test]
    fn test_write_empty_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("requirements.txt");

        ManifestWriter::new(false)
            .write(&path, "", &ManifestStatus::Missing)
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_check_manifest_states() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("requirements.txt");

        assert_eq!(check_manifest(&path, "a\n").unwrap(), ManifestStatus::Missing);

        fs::write(&path, "a\n").unwrap();
        assert!(check_manifest(&path, "a\n").unwrap().is_up_to_date());

        assert_eq!(
            check_manifest(&path, "b\n").unwrap(),
            ManifestStatus::Stale {
                existing: "a\n".to_string()
            }
        );
    }

    #[test]
    fn test_non_utf8_file_is_stale() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("requirements.txt");
        fs::write(&path, b"# caf\xe9\nflask==2.0\n").unwrap();

        let status = check_manifest(&path, "flask==3.0.0\n").unwrap();
        assert_eq!(
            status,
            ManifestStatus::Stale {
                existing: "# caf\u{fffd}\nflask==2.0\n".to_string()
            }
        );

        let written = ManifestWriter::new(false)
            .write(&path, "flask==3.0.0\n", &status)
            .unwrap();
        assert!(written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "flask==3.0.0\n");
    }

    #[test]
    fn test_read_manifest_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.txt");
        assert!(read_manifest(&path).unwrap().is_none());
    }
}
