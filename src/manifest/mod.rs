//! Requirements file I/O
//!
//! This module provides functionality to:
//! - Write a rendered manifest to its output path
//! - Check whether an existing requirements file is up to date

mod writer;

pub use writer::{check_manifest, read_manifest, write_manifest, ManifestStatus, ManifestWriter};

/// Default output file name
pub const DEFAULT_OUTPUT_FILE: &str = "requirements.txt";
