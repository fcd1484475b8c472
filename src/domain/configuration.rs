//! Parsed dependency configuration

use super::DependencySpec;
use serde::{Deserialize, Serialize};

/// A named group of dependencies that can be selected at generation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature name (e.g. `api`, `postgresql`)
    pub name: String,
    /// Names of the dependencies this feature pulls in
    pub dependencies: Vec<String>,
}

impl Feature {
    /// Creates a new feature
    pub fn new<I, S>(name: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered collection of dependency declarations plus global metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Default target environment when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Dependencies in declaration order
    pub dependencies: Vec<DependencySpec>,
    /// Feature groups in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
}

impl Configuration {
    /// Creates a configuration from dependencies
    pub fn new(dependencies: Vec<DependencySpec>) -> Self {
        Self {
            environment: None,
            dependencies,
            features: Vec::new(),
        }
    }

    /// Sets the default target environment (builder pattern)
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Adds a feature group (builder pattern)
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Looks up a feature by name
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }

    /// Returns the number of declared dependencies
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns true if no dependencies are declared
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_default() {
        let config = Configuration::default();
        assert!(config.is_empty());
        assert!(config.environment.is_none());
        assert!(config.features.is_empty());
    }

    #[test]
    fn test_configuration_builder() {
        let config = Configuration::new(vec![
            DependencySpec::new("flask", "==3.0.0"),
            DependencySpec::latest("numpy"),
        ])
        .with_environment("prod")
        .with_feature(Feature::new("api", ["flask"]));

        assert_eq!(config.len(), 2);
        assert_eq!(config.environment.as_deref(), Some("prod"));
        assert_eq!(config.feature("api").unwrap().dependencies, vec!["flask"]);
        assert!(config.feature("missing").is_none());
    }
}
