//! Parsers for the pieces of a requirement line
//!
//! This module provides:
//! - Version constraint parsing into [`VersionConstraint`](crate::domain::VersionConstraint)
//! - Package name validation and normalization
//! - Release version comparison for range checks

mod constraint;
mod name;
mod version;

pub use constraint::{parse_constraint, parse_constraint_as};
pub use name::{is_valid_name, normalize_name};
pub use version::to_comparable;
