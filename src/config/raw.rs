//! On-disk configuration schema
//!
//! The same shape is accepted from YAML, TOML and JSON. Mappings are read in
//! document order so the manifest follows declaration order.
//!
//! Two layouts are understood and may be combined in one document:
//! - `dependencies` (keyed by package name, or a list) with `features`
//! - `dependencies-definition` (keyed by dependency key, each entry naming
//!   its `package`) with `dependencies-mappings` from feature to keys
//!
//! Unknown keys are rejected at both levels so a typo cannot silently drop
//! a pin.

use crate::domain::{Configuration, ConstraintKind, DependencySpec, Feature};
use crate::error::ConfigError;
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Keys accepted inside a dependency table
const DETAIL_KEYS: &str = "name, package, version, kind, environments, overrides";

/// Top-level configuration document
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub dependencies: RawDependencies,
    #[serde(default)]
    pub features: OrderedMap<Vec<String>>,
    #[serde(default, rename = "dependencies-definition")]
    pub definitions: OrderedMap<RawDetail>,
    #[serde(default, rename = "dependencies-mappings")]
    pub mappings: OrderedMap<Vec<String>>,
}

/// A mapping whose entries keep their document order
#[derive(Debug)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(OrderedMap(entries))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(OrderedMap::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(OrderedMap::default())
            }
        }

        deserializer.deserialize_any(OrderedMapVisitor(PhantomData))
    }
}

/// The `dependencies` section: either a mapping keyed by package name or a
/// list of entries carrying `name`.
#[derive(Debug, Default)]
pub struct RawDependencies(pub Vec<RawDependency>);

/// One dependency entry before conversion
#[derive(Debug)]
pub struct RawDependency {
    /// Mapping key, absent for list entries
    pub key: Option<String>,
    pub detail: RawDetail,
}

impl<'de> Deserialize<'de> for RawDependencies {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DependenciesVisitor;

        impl<'de> Visitor<'de> for DependenciesVisitor {
            type Value = RawDependencies;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of package names or a list of dependency entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut deps = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Option<RawValue>>()? {
                    let detail = match value {
                        None => RawDetail::default(),
                        Some(RawValue::Short(version)) => RawDetail {
                            version: Some(version),
                            ..Default::default()
                        },
                        Some(RawValue::Detailed(detail)) => detail,
                    };
                    deps.push(RawDependency {
                        key: Some(key),
                        detail,
                    });
                }
                Ok(RawDependencies(deps))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut deps = Vec::new();
                while let Some(detail) = seq.next_element::<RawDetail>()? {
                    deps.push(RawDependency { key: None, detail });
                }
                Ok(RawDependencies(deps))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(RawDependencies::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(RawDependencies::default())
            }
        }

        deserializer.deserialize_any(DependenciesVisitor)
    }
}

/// Value of a keyed dependency: a bare constraint or a detailed table
#[derive(Debug)]
pub enum RawValue {
    Short(RawVersion),
    Detailed(RawDetail),
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = RawValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a version constraint or a dependency table")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                VersionVisitor.visit_str(v).map(RawValue::Short)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                VersionVisitor.visit_i64(v).map(RawValue::Short)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                VersionVisitor.visit_u64(v).map(RawValue::Short)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                VersionVisitor.visit_f64(v).map(RawValue::Short)
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                RawDetail::deserialize(MapAccessDeserializer::new(map)).map(RawValue::Detailed)
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Detailed dependency table
#[derive(Debug, Default, Deserialize)]
pub struct RawDetail {
    /// Package name; required under `dependencies-definition`
    #[serde(default, alias = "package")]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<RawVersion>,
    #[serde(default)]
    pub kind: Option<ConstraintKind>,
    #[serde(default)]
    pub environments: Vec<String>,
    #[serde(default)]
    pub overrides: OrderedMap<Option<RawVersion>>,
    /// Keys outside the schema, reported on conversion
    #[serde(flatten)]
    pub unknown: OrderedMap<IgnoredAny>,
}

/// A version as written in the document. Unquoted YAML/TOML numbers arrive
/// as integers or floats.
#[derive(Debug, Clone)]
pub enum RawVersion {
    Text(String),
    Float(f64),
}

struct VersionVisitor;

impl<'de> Visitor<'de> for VersionVisitor {
    type Value = RawVersion;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a version constraint")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(RawVersion::Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(RawVersion::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(RawVersion::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(RawVersion::Float(v))
    }
}

impl<'de> Deserialize<'de> for RawVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(VersionVisitor)
    }
}

impl RawVersion {
    /// Converts to the raw constraint string.
    ///
    /// Floats are rejected: `3.10` would silently become `3.1`.
    fn into_constraint(self, label: &str) -> Result<String, ConfigError> {
        match self {
            RawVersion::Text(s) => Ok(s),
            RawVersion::Float(f) => Err(ConfigError::invalid_entry(
                label,
                format!(
                    "version {} was read as a number; quote it so no digits are lost",
                    f
                ),
            )),
        }
    }
}

fn optional_constraint(version: Option<RawVersion>, label: &str) -> Result<String, ConfigError> {
    version
        .map(|v| v.into_constraint(label))
        .transpose()
        .map(Option::unwrap_or_default)
}

fn clean_label(label: &str) -> Option<String> {
    let trimmed = label.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl RawConfig {
    /// Converts the document into the domain configuration
    pub fn into_configuration(self) -> Result<Configuration, ConfigError> {
        let mut dependencies = Vec::new();
        // Dependency key → package name, for resolving feature references
        let mut packages: HashMap<String, String> = HashMap::new();

        for (index, raw) in self.dependencies.0.into_iter().enumerate() {
            let spec = raw.detail.into_spec(raw.key.as_deref(), index + 1)?;
            if let Some(key) = raw.key {
                packages.insert(key, spec.name.clone());
            }
            dependencies.push(spec);
        }

        for (key, detail) in self.definitions.0 {
            if detail.name.as_deref().and_then(clean_label).is_none() {
                return Err(ConfigError::invalid_entry(&key, "missing 'package'"));
            }
            let spec = detail.into_spec(Some(&key), dependencies.len() + 1)?;
            packages.insert(key, spec.name.clone());
            dependencies.push(spec);
        }

        let mut features: Vec<Feature> = Vec::new();
        for (name, keys) in self.features.0.into_iter().chain(self.mappings.0) {
            let members: Vec<String> = keys
                .into_iter()
                .map(|key| packages.get(&key).cloned().unwrap_or(key))
                .collect();
            match features.iter_mut().find(|f| f.name == name) {
                Some(existing) => existing.dependencies.extend(members),
                None => features.push(Feature::new(name, members)),
            }
        }

        Ok(Configuration {
            environment: self.environment.as_deref().and_then(clean_label),
            dependencies,
            features,
        })
    }
}

impl RawDetail {
    /// Builds the dependency; `key` is the mapping key the entry was declared
    /// under and doubles as the package name when none is given.
    fn into_spec(self, key: Option<&str>, position: usize) -> Result<DependencySpec, ConfigError> {
        let name = self
            .name
            .or_else(|| key.map(str::to_string))
            .unwrap_or_default();
        let label = key
            .and_then(clean_label)
            .or_else(|| clean_label(&name))
            .unwrap_or_else(|| format!("entry #{}", position));

        if let Some((unknown, _)) = self.unknown.0.first() {
            return Err(ConfigError::invalid_entry(
                &label,
                format!("unknown key '{}' (expected one of: {})", unknown, DETAIL_KEYS),
            ));
        }

        let mut spec = DependencySpec::new(name, optional_constraint(self.version, &label)?);
        spec.constraint_kind = self.kind;
        spec.environment_tags = self
            .environments
            .iter()
            .filter_map(|e| clean_label(e))
            .collect();
        for (environment, version) in self.overrides.0 {
            let Some(environment) = clean_label(&environment) else {
                return Err(ConfigError::invalid_entry(
                    &label,
                    "override with an empty environment name",
                ));
            };
            let constraint = optional_constraint(version, &label)?;
            spec = spec.with_override(environment, constraint);
        }
        Ok(spec)
    }
}
