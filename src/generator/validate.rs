//! Single-pass validation of dependency declarations

use crate::domain::{ConstraintKind, DependencySpec, VersionConstraint};
use crate::error::{ConflictingEntry, GenerateError, ValidationError};
use crate::parser::{is_valid_name, normalize_name, parse_constraint, parse_constraint_as};
use std::collections::HashMap;

/// Validates every declaration and resolves the constraint each one uses in
/// `target_environment`.
///
/// All entries are checked, including those a later filter would drop. The
/// returned constraints line up with `dependencies` by index.
pub fn validate(
    dependencies: &[DependencySpec],
    target_environment: &str,
) -> Result<Vec<VersionConstraint>, GenerateError> {
    let mut errors = Vec::new();
    let mut resolved = Vec::with_capacity(dependencies.len());
    let mut groups: Vec<(String, Vec<ConflictingEntry>)> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();

    for (index, dep) in dependencies.iter().enumerate() {
        let position = index + 1;
        let name = dep.name.trim();

        if name.is_empty() {
            errors.push(ValidationError::EmptyName { position });
        } else if !is_valid_name(name) {
            errors.push(ValidationError::InvalidName {
                position,
                name: name.to_string(),
            });
        } else {
            let normalized = normalize_name(name);
            let entry = ConflictingEntry {
                position,
                name: name.to_string(),
            };
            match group_index.get(&normalized) {
                Some(&i) => groups[i].1.push(entry),
                None => {
                    group_index.insert(normalized.clone(), groups.len());
                    groups.push((normalized, vec![entry]));
                }
            }
        }

        let label = if name.is_empty() {
            format!("entry #{}", position)
        } else {
            name.to_string()
        };

        let mut effective = match check_constraint(dep, &dep.version_constraint) {
            Ok(constraint) => Some(constraint),
            Err(reason) => {
                errors.push(ValidationError::malformed(
                    &label,
                    &dep.version_constraint,
                    reason,
                ));
                None
            }
        };

        for (environment, raw) in &dep.environment_overrides {
            match check_override(dep, raw) {
                Ok(constraint) if environment == target_environment => {
                    effective = Some(constraint);
                }
                Ok(_) => {}
                Err(reason) => errors.push(ValidationError::malformed(
                    &label,
                    raw,
                    format!("override for '{}': {}", environment, reason),
                )),
            }
        }

        // Placeholder keeps indices aligned; any error discards the result
        resolved.push(effective.unwrap_or(VersionConstraint::Unconstrained));
    }

    errors.extend(
        groups
            .into_iter()
            .filter(|(_, entries)| entries.len() > 1)
            .map(|(normalized, entries)| ValidationError::DuplicateDependency {
                normalized,
                entries,
            }),
    );

    if errors.is_empty() {
        Ok(resolved)
    } else {
        Err(GenerateError::new(errors))
    }
}

fn check_constraint(dep: &DependencySpec, raw: &str) -> Result<VersionConstraint, String> {
    match dep.constraint_kind {
        Some(kind) => parse_constraint_as(raw, kind),
        None => parse_constraint(raw),
    }
}

/// Overrides may change the constraint kind; a bare version still reads as
/// a minimum when the entry is declared `minimum`.
fn check_override(dep: &DependencySpec, raw: &str) -> Result<VersionConstraint, String> {
    match parse_constraint(raw)? {
        VersionConstraint::Pinned(version)
            if dep.constraint_kind == Some(ConstraintKind::Minimum) && version == raw.trim() =>
        {
            Ok(VersionConstraint::MinimumVersion(version))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_resolves_constraints() {
        let deps = vec![
            DependencySpec::new("requests", "2.31.0"),
            DependencySpec::latest("numpy"),
        ];
        let resolved = validate(&deps, "").unwrap();
        assert_eq!(
            resolved,
            vec![
                VersionConstraint::Pinned("2.31.0".into()),
                VersionConstraint::Unconstrained
            ]
        );
    }

    #[test]
    fn test_validate_applies_override_for_target() {
        let deps = vec![DependencySpec::new("gunicorn", "21.2.0").with_override("dev", "latest")];
        assert_eq!(
            validate(&deps, "dev").unwrap(),
            vec![VersionConstraint::Unconstrained]
        );
        assert_eq!(
            validate(&deps, "prod").unwrap(),
            vec![VersionConstraint::Pinned("21.2.0".into())]
        );
    }

    #[test]
    fn test_validate_override_respects_kind() {
        let deps = vec![DependencySpec::new("flask", "3.0")
            .with_kind(ConstraintKind::Minimum)
            .with_override("ci", "3.1")];
        assert_eq!(
            validate(&deps, "ci").unwrap(),
            vec![VersionConstraint::MinimumVersion("3.1".into())]
        );
    }

    #[test]
    fn test_validate_override_may_change_kind() {
        let deps = vec![DependencySpec::new("gunicorn", "21.2.0")
            .with_kind(ConstraintKind::Exact)
            .with_override("dev", "latest")];
        assert_eq!(
            validate(&deps, "dev").unwrap(),
            vec![VersionConstraint::Unconstrained]
        );
    }

    #[test]
    fn test_validate_reports_bad_override_for_other_environment() {
        let deps = vec![DependencySpec::new("gunicorn", "21.2.0").with_override("dev", "~~1")];
        let err = validate(&deps, "prod").unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert!(format!("{}", err.errors()[0]).contains("override for 'dev'"));
    }

    #[test]
    fn test_validate_collects_every_error() {
        let deps = vec![
            DependencySpec::new("", "1.0"),
            DependencySpec::new("bad name", "1.0"),
            DependencySpec::new("flask", ">>3"),
            DependencySpec::new("Foo", "1.0"),
            DependencySpec::new("foo", "2.0"),
        ];
        let err = validate(&deps, "").unwrap_err();
        assert_eq!(
            err.errors(),
            &[
                ValidationError::EmptyName { position: 1 },
                ValidationError::InvalidName {
                    position: 2,
                    name: "bad name".into()
                },
                ValidationError::MalformedConstraint {
                    name: "flask".into(),
                    raw: ">>3".into(),
                    reason: "'>>3' is not a recognized version clause".into(),
                },
                ValidationError::DuplicateDependency {
                    normalized: "foo".into(),
                    entries: vec![
                        ConflictingEntry {
                            position: 4,
                            name: "Foo".into()
                        },
                        ConflictingEntry {
                            position: 5,
                            name: "foo".into()
                        },
                    ],
                },
            ]
        );
    }

    #[test]
    fn test_validate_malformed_constraint_on_unnamed_entry() {
        let deps = vec![DependencySpec::new("  ", "==")];
        let err = validate(&deps, "").unwrap_err();
        assert_eq!(err.errors().len(), 2);
        assert!(matches!(
            &err.errors()[1],
            ValidationError::MalformedConstraint { name, .. } if name == "entry #1"
        ));
    }
}
