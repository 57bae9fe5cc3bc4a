//! Error types for CondForge

use thiserror::Error;

use crate::operator::{ComparisonOperator, StringOperator};

/// Error raised while binding properties, resolving literals or preparing
/// conditions.
///
/// Every variant is produced before a compiled predicate exists; evaluation
/// itself never fails.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The literal text was rejected by the parser registered for its type.
    #[error("cannot convert literal \"{literal}\" to type '{ty}': {reason}")]
    Conversion {
        literal: String,
        ty: String,
        reason: String,
    },

    /// No parser is registered for the expected type.
    #[error("cannot convert literal \"{literal}\" to type '{ty}': no parser registered")]
    NoParser { literal: String, ty: String },

    /// The literal names no member of the enumeration.
    #[error("\"{literal}\" is not a member of enumeration '{ty}'")]
    UnknownEnumMember { literal: String, ty: String },

    /// An already-typed literal cannot be represented as the property type.
    #[error("literal {literal} does not match property type '{ty}'")]
    LiteralMismatch { literal: String, ty: String },

    /// A relational operator was requested for a type without ordering.
    #[error("property '{property}' of type '{ty}' does not support relational comparison ({operator})")]
    NotOrdered {
        property: String,
        ty: String,
        operator: ComparisonOperator,
    },

    /// A string operator was applied to a property that is not text.
    #[error("string operator {operator} requires a text property, but '{property}' is of type '{ty}'")]
    NotText {
        property: String,
        ty: String,
        operator: StringOperator,
    },

    /// A substring operator was given a null literal.
    #[error("string operator {operator} on '{property}' cannot take a null literal")]
    NullSubstring {
        property: String,
        operator: StringOperator,
    },

    /// An operator tag matched neither operator family.
    #[error("unrecognized operator \"{0}\"")]
    UnknownOperator(String),

    /// A property path segment does not exist on its owner type.
    #[error("type '{owner}' has no property named '{name}'")]
    UnknownProperty { owner: String, name: String },

    /// A property path continues through a property that is not an object.
    #[error("cannot access '{name}' through '{property}' of non-object type '{ty}'")]
    NotAnObject {
        property: String,
        ty: String,
        name: String,
    },

    /// A property is bound to a type other than the predicate target.
    #[error("property '{property}' belongs to type '{owner}', not to target type '{target}'")]
    ForeignProperty {
        property: String,
        owner: String,
        target: String,
    },

    /// A property path was empty or contained an empty segment.
    #[error("invalid property path \"{0}\"")]
    InvalidPath(String),

    /// A candidate type name is not present in the catalog.
    #[error("unknown candidate type '{0}'")]
    UnknownType(String),

    /// Wraps an error with the position of the condition that raised it.
    #[error("condition {index}: {source}")]
    Condition {
        index: usize,
        source: Box<ConfigurationError>,
    },
}

impl ConfigurationError {
    /// Attaches the index of the failing condition.
    pub fn in_condition(self, index: usize) -> Self {
        ConfigurationError::Condition {
            index,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping condition wrappers.
    pub fn root(&self) -> &ConfigurationError {
        match self {
            ConfigurationError::Condition { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for CondForge operations
pub type Result<T> = std::result::Result<T, ConfigurationError>;
