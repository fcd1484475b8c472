//! Package name validation and normalization

use regex::Regex;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)(?:\[\s*[A-Za-z0-9._-]+(?:\s*,\s*[A-Za-z0-9._-]+)*\s*\])?$",
    )
    .unwrap()
});
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_.]+").unwrap());

/// Returns true if `name` is a valid package name, optionally with extras
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Normalizes a package name for uniqueness checks.
///
/// Comparison ignores case, treats runs of `-`, `_` and `.` as equal, and
/// drops any `[extras]` suffix.
pub fn normalize_name(name: &str) -> String {
    let base = name.split('[').next().unwrap_or(name).trim();
    SEPARATOR_RE.replace_all(base, "-").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("requests"));
        assert!(is_valid_name("Flask-SQLAlchemy"));
        assert!(is_valid_name("zope.interface"));
        assert!(is_valid_name("a"));
        assert!(is_valid_name("uvicorn[standard]"));
        assert!(is_valid_name("celery[redis, msgpack]"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_valid_name("-leading"));
        assert!(!is_valid_name("trailing_"));
        assert!(!is_valid_name("has space"));
        assert!(!is_valid_name("pkg==1.0"));
        assert!(!is_valid_name("pkg[]"));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Foo"), "foo");
        assert_eq!(normalize_name("foo"), "foo");
        assert_eq!(normalize_name("Flask_SQLAlchemy"), "flask-sqlalchemy");
        assert_eq!(normalize_name("zope.interface"), "zope-interface");
        assert_eq!(normalize_name("uvicorn[standard]"), "uvicorn");
    }
}
