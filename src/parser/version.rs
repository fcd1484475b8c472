//! Release version comparison
//!
//! Maps Python-style release versions (`1.2`, `2.0.0rc1`) onto
//! [`semver::Version`] so range bounds can be compared. Pre-release tags
//! `a`, `b` and `rc` sort the same way in both schemes.

use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use std::sync::LazyLock;

static RELEASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:(a|b|rc)(\d+))?$").unwrap());

/// Converts a release version into a comparable semver version.
///
/// Returns `None` for versions that cannot be ordered faithfully this way
/// (more than three release segments, `.post`/`.dev` suffixes, wildcards).
pub fn to_comparable(version: &str) -> Option<Version> {
    let caps = RELEASE_RE.captures(version)?;
    let segment = |i: usize| -> Option<u64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    let pre = match (caps.get(4), caps.get(5)) {
        (Some(tag), Some(num)) => {
            Prerelease::new(&format!("{}.{}", tag.as_str(), num.as_str())).ok()?
        }
        _ => Prerelease::EMPTY,
    };

    Some(Version {
        major: segment(1)?,
        minor: segment(2)?,
        patch: segment(3)?,
        pre,
        build: BuildMetadata::EMPTY,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_missing_segments() {
        assert_eq!(to_comparable("2").unwrap(), Version::new(2, 0, 0));
        assert_eq!(to_comparable("2.1").unwrap(), Version::new(2, 1, 0));
        assert_eq!(to_comparable("2.1.3").unwrap(), Version::new(2, 1, 3));
    }

    #[test]
    fn test_prerelease_ordering() {
        let alpha = to_comparable("2.0a1").unwrap();
        let beta = to_comparable("2.0b1").unwrap();
        let rc = to_comparable("2.0rc1").unwrap();
        let release = to_comparable("2.0").unwrap();
        assert!(alpha < beta);
        assert!(beta < rc);
        assert!(rc < release);
    }

    #[test]
    fn test_unsupported_forms() {
        assert!(to_comparable("1.2.3.4").is_none());
        assert!(to_comparable("1.0.post1").is_none());
        assert!(to_comparable("1.0.dev2").is_none());
        assert!(to_comparable("1.*").is_none());
    }
}
