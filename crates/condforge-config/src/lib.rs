//! Declarative predicate definitions for CondForge.
//!
//! Describe a predicate in TOML or YAML and compile it later against a type
//! catalog, so filters can change without rebuilding the host program.
//!
//! # Examples
//!
//! Load a definition from a TOML string:
//!
//! ```
//! use condforge_config::{ConditionConfig, LiteralConfig, PredicateConfig};
//!
//! let config = PredicateConfig::from_toml_str(r#"
//!     target = "Container"
//!     type_guard = true
//!
//!     [[conditions]]
//!     kind = "string"
//!     property = "Name"
//!     operator = "contains"
//!     value = "bag"
//!     ignore_case = true
//!
//!     [[conditions]]
//!     kind = "comparison"
//!     property = "Hue"
//!     operator = ">="
//!     value = 100
//!     negate = true
//! "#).unwrap();
//!
//! assert_eq!(config.target, "Container");
//! assert_eq!(config.conditions.len(), 2);
//! match &config.conditions[1] {
//!     ConditionConfig::Comparison(c) => assert_eq!(c.value, LiteralConfig::Int(100)),
//!     other => panic!("unexpected condition: {:?}", other),
//! }
//! ```
//!
//! Fall back to an empty definition when the file is missing:
//!
//! ```
//! use condforge_config::PredicateConfig;
//!
//! let config = PredicateConfig::load("filter.toml")
//!     .unwrap_or_else(|_| PredicateConfig::new("Container"));
//! assert!(config.conditions.is_empty());
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A predicate over one target type.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PredicateConfig {
    /// Name of the target type, matched case-insensitively by the catalog.
    pub target: String,

    /// Prepend a type condition unless the list already starts with one.
    #[serde(default)]
    pub type_guard: bool,

    /// Conditions, evaluated in order.
    #[serde(default)]
    pub conditions: Vec<ConditionConfig>,
}

impl PredicateConfig {
    /// Creates an empty definition for `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            type_guard: false,
            conditions: Vec::new(),
        }
    }

    pub fn with_type_guard(mut self, enabled: bool) -> Self {
        self.type_guard = enabled;
        self
    }

    pub fn with_condition(mut self, condition: impl Into<ConditionConfig>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Loads a definition from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the parts that serde cannot: non-blank names and operators.
    ///
    /// Whether the names exist is only known once the definition is
    /// compiled against a catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.trim().is_empty() {
            return Err(ConfigError::Invalid("target type is empty".to_string()));
        }
        for (index, condition) in self.conditions.iter().enumerate() {
            let (property, operator) = match condition {
                ConditionConfig::Type(_) => continue,
                ConditionConfig::String(c) => (&c.property, &c.operator),
                ConditionConfig::Comparison(c) => (&c.property, &c.operator),
            };
            if property.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "condition {}: property is empty",
                    index
                )));
            }
            if operator.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "condition {}: operator is empty",
                    index
                )));
            }
        }
        Ok(())
    }
}

/// One condition of a [`PredicateConfig`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionConfig {
    Type(TypeConditionConfig),
    String(StringConditionConfig),
    Comparison(ComparisonConditionConfig),
}

impl From<TypeConditionConfig> for ConditionConfig {
    fn from(c: TypeConditionConfig) -> Self {
        ConditionConfig::Type(c)
    }
}

impl From<StringConditionConfig> for ConditionConfig {
    fn from(c: StringConditionConfig) -> Self {
        ConditionConfig::String(c)
    }
}

impl From<ComparisonConditionConfig> for ConditionConfig {
    fn from(c: ComparisonConditionConfig) -> Self {
        ConditionConfig::Comparison(c)
    }
}

/// Checks that the candidate is an instance of the target type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TypeConditionConfig {
    #[serde(default)]
    pub negate: bool,
}

/// Text comparison on a string property.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StringConditionConfig {
    /// Dotted property path, e.g. `Owner.Name`.
    pub property: String,

    /// `==`, `!=`, `contains`, `starts_with` or `ends_with`.
    pub operator: String,

    pub value: LiteralConfig,

    #[serde(default)]
    pub ignore_case: bool,

    #[serde(default)]
    pub negate: bool,
}

impl StringConditionConfig {
    pub fn new(
        property: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<LiteralConfig>,
    ) -> Self {
        Self {
            property: property.into(),
            operator: operator.into(),
            value: value.into(),
            ignore_case: false,
            negate: false,
        }
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn with_negate(mut self, negate: bool) -> Self {
        self.negate = negate;
        self
    }
}

/// Equality or ordering comparison on any property.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ComparisonConditionConfig {
    pub property: String,

    /// `==`, `!=`, `>`, `>=`, `<` or `<=` (or `eq`, `gt`, ...).
    pub operator: String,

    pub value: LiteralConfig,

    #[serde(default)]
    pub negate: bool,
}

impl ComparisonConditionConfig {
    pub fn new(
        property: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<LiteralConfig>,
    ) -> Self {
        Self {
            property: property.into(),
            operator: operator.into(),
            value: value.into(),
            negate: false,
        }
    }

    pub fn with_negate(mut self, negate: bool) -> Self {
        self.negate = negate;
        self
    }
}

/// A literal as written in the document.
///
/// Strings go through the full literal grammar (`null`, hex, enum names);
/// native numbers and booleans skip parsing but are still checked against
/// the property type.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LiteralConfig {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl fmt::Display for LiteralConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralConfig::Null => f.write_str("null"),
            LiteralConfig::Bool(v) => write!(f, "{}", v),
            LiteralConfig::Int(v) => write!(f, "{}", v),
            LiteralConfig::UInt(v) => write!(f, "{}", v),
            LiteralConfig::Float(v) => write!(f, "{}", v),
            LiteralConfig::Text(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<&str> for LiteralConfig {
    fn from(value: &str) -> Self {
        LiteralConfig::Text(value.to_string())
    }
}

impl From<String> for LiteralConfig {
    fn from(value: String) -> Self {
        LiteralConfig::Text(value)
    }
}

impl From<bool> for LiteralConfig {
    fn from(value: bool) -> Self {
        LiteralConfig::Bool(value)
    }
}

impl From<i64> for LiteralConfig {
    fn from(value: i64) -> Self {
        LiteralConfig::Int(value)
    }
}

impl From<u64> for LiteralConfig {
    fn from(value: u64) -> Self {
        LiteralConfig::UInt(value)
    }
}

impl From<f64> for LiteralConfig {
    fn from(value: f64) -> Self {
        LiteralConfig::Float(value)
    }
}
