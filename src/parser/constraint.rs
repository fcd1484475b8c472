//! Version constraint parser
//!
//! Handles constraint formats:
//! - Exact: `==1.2.3` or a bare `1.2.3`
//! - Minimum: `>=1.2.3`
//! - Range: comma-separated clauses using `~=`, `==`, `!=`, `<=`, `>=`, `<`, `>`
//!   (e.g. `>=1.0,<2.0`, `~=1.4`, `==1.4.*`)
//! - Unconstrained: empty, `*` or `latest`

use super::version::to_comparable;
use crate::domain::{ConstraintKind, VersionConstraint};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

// Release version with optional pre/post/dev suffixes
const VERSION: &str = r"\d+(?:\.\d+)*(?:(?:a|b|rc)\d+)?(?:\.post\d+)?(?:\.dev\d+)?";

static BARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^({})$", VERSION)).unwrap());
static CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(~=|==|!=|<=|>=|<|>)({})(\.\*)?$", VERSION)).unwrap()
});
// Release segments only, as required before a `.*` wildcard
static RELEASE_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)*$").unwrap());
// `~=` needs at least two release segments
static COMPATIBLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)+").unwrap());

/// A single comparison clause such as `>=1.0`
#[derive(Debug, Clone, PartialEq, Eq)]
struct Clause {
    op: String,
    version: String,
    wildcard: bool,
}

impl Clause {
    fn render(&self) -> String {
        let suffix = if self.wildcard { ".*" } else { "" };
        format!("{}{}{}", self.op, self.version, suffix)
    }
}

/// Parses a raw constraint without a declared kind
pub fn parse_constraint(raw: &str) -> Result<VersionConstraint, String> {
    let trimmed = raw.trim();

    if is_unconstrained(trimmed) {
        return Ok(VersionConstraint::Unconstrained);
    }

    // Bare version is an exact pin
    if BARE_RE.is_match(trimmed) {
        return Ok(VersionConstraint::Pinned(trimmed.to_string()));
    }

    let clauses = parse_clauses(trimmed)?;

    if let [single] = clauses.as_slice() {
        if !single.wildcard {
            match single.op.as_str() {
                "==" => return Ok(VersionConstraint::Pinned(single.version.clone())),
                ">=" => return Ok(VersionConstraint::MinimumVersion(single.version.clone())),
                _ => {}
            }
        }
    }

    check_satisfiable(&clauses)?;

    let expr = clauses
        .iter()
        .map(Clause::render)
        .collect::<Vec<_>>()
        .join(",");
    Ok(VersionConstraint::Range(expr))
}

/// Parses a raw constraint that must agree with a declared kind.
///
/// Under `minimum`, a bare version means "at least this version".
pub fn parse_constraint_as(raw: &str, kind: ConstraintKind) -> Result<VersionConstraint, String> {
    let trimmed = raw.trim();

    if kind == ConstraintKind::Minimum && BARE_RE.is_match(trimmed) {
        return Ok(VersionConstraint::MinimumVersion(trimmed.to_string()));
    }

    let constraint = parse_constraint(trimmed)?;
    if constraint.kind() != kind {
        return Err(format!(
            "declared as '{}' but the value is a '{}' constraint",
            kind,
            constraint.kind()
        ));
    }
    Ok(constraint)
}

fn is_unconstrained(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed == "*" || trimmed.eq_ignore_ascii_case("latest")
}

fn parse_clauses(trimmed: &str) -> Result<Vec<Clause>, String> {
    trimmed
        .split(',')
        .map(|part| {
            let compact: String = part.chars().filter(|c| !c.is_whitespace()).collect();
            if compact.is_empty() {
                return Err("empty clause in constraint".to_string());
            }
            let caps = CLAUSE_RE
                .captures(&compact)
                .ok_or_else(|| format!("'{}' is not a recognized version clause", compact))?;
            let op = caps[1].to_string();
            let wildcard = caps.get(3).is_some();
            let version = caps[2].to_string();
            if wildcard && op != "==" && op != "!=" {
                return Err(format!("wildcard is only allowed with '==' or '!=' in '{}'", compact));
            }
            if wildcard && !RELEASE_ONLY_RE.is_match(&version) {
                return Err(format!(
                    "wildcard must follow a plain release version in '{}'",
                    compact
                ));
            }
            if op == "~=" && !COMPATIBLE_RE.is_match(&version) {
                return Err(format!(
                    "'~=' needs at least two release segments in '{}'",
                    compact
                ));
            }
            Ok(Clause {
                op,
                version,
                wildcard,
            })
        })
        .collect()
}

/// A bound on the allowed versions; `inclusive` is false for `<`/`>`.
struct Bound {
    version: semver::Version,
    inclusive: bool,
}

/// Rejects ranges whose lower bound lies above their upper bound.
///
/// Clauses whose versions cannot be ordered are ignored.
fn check_satisfiable(clauses: &[Clause]) -> Result<(), String> {
    let mut lower: Option<Bound> = None;
    let mut upper: Option<Bound> = None;

    for clause in clauses.iter().filter(|c| !c.wildcard) {
        let Some(version) = to_comparable(&clause.version) else {
            continue;
        };
        let (is_lower, is_upper, inclusive) = match clause.op.as_str() {
            ">=" | "~=" => (true, false, true),
            ">" => (true, false, false),
            "<=" => (false, true, true),
            "<" => (false, true, false),
            "==" => (true, true, true),
            _ => (false, false, true),
        };
        if is_lower {
            lower = Some(tighter(lower, &version, inclusive, Ordering::Greater));
        }
        if is_upper {
            upper = Some(tighter(upper, &version, inclusive, Ordering::Less));
        }
    }

    if let (Some(lo), Some(hi)) = (&lower, &upper) {
        let empty = match lo.version.cmp(&hi.version) {
            Ordering::Greater => true,
            Ordering::Equal => !(lo.inclusive && hi.inclusive),
            Ordering::Less => false,
        };
        if empty {
            return Err("range excludes every version".to_string());
        }
    }
    Ok(())
}

/// Keeps whichever bound is more restrictive in the `toward` direction.
fn tighter(
    current: Option<Bound>,
    version: &semver::Version,
    inclusive: bool,
    toward: Ordering,
) -> Bound {
    let candidate = Bound {
        version: version.clone(),
        inclusive,
    };
    match current {
        None => candidate,
        Some(existing) => match candidate.version.cmp(&existing.version) {
            ord if ord == toward => candidate,
            Ordering::Equal if !inclusive => candidate,
            _ => existing,
        },
    }
}
