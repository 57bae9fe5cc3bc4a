//! Condition variants and their prepared form.
//!
//! A [`Condition`] is declarative. Preparing it resolves its literal and
//! picks the operator implementation once, producing a
//! [`PreparedCondition`]: a small closure that only reads the candidate.
//!
//! Every variant composes its result the same way:
//! `not ^ inverse ^ raw`, where `inverse` is the operator's own negation
//! (`NotEqual`, `GreaterEqual`, `LesserEqual`) and `raw` is the underlying
//! test. Property conditions evaluated against a candidate that could not be
//! narrowed to the target type return `false`.

mod comparison;
mod string;
mod type_guard;


use std::any::Any;
use std::fmt;

use condforge_core::error::Result;

use crate::literal::LiteralResolver;

pub use comparison::ComparisonCondition;
pub use string::StringCondition;
pub use type_guard::TypeCondition;

type Evaluator = Box<dyn Fn(Option<&dyn Any>) -> bool + Send + Sync>;

/// A condition with its literal resolved, ready for evaluation.
pub struct PreparedCondition {
    label: String,
    evaluate: Evaluator,
}

impl PreparedCondition {
    pub(crate) fn new<F>(label: String, evaluate: F) -> Self
    where
        F: Fn(Option<&dyn Any>) -> bool + Send + Sync + 'static,
    {
        Self {
            label,
            evaluate: Box::new(evaluate),
        }
    }

    /// Evaluates against a candidate already narrowed to the target type,
    /// or `None` if narrowing failed.
    #[inline]
    pub fn evaluate(&self, narrowed: Option<&dyn Any>) -> bool {
        (self.evaluate)(narrowed)
    }

    /// Human-readable form of the source condition.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for PreparedCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreparedCondition")
            .field(&self.label)
            .finish()
    }
}

/// One term of a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    Type(TypeCondition),
    String(StringCondition),
    Comparison(ComparisonCondition),
}

impl Condition {
    /// Resolves the literal and selects the operator implementation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the literal cannot be resolved
    /// to the property type or the operator is not supported by it.
    ///
    /// [`ConfigurationError`]: condforge_core::ConfigurationError
    pub fn prepare(&self, resolver: &LiteralResolver) -> Result<PreparedCondition> {
        match self {
            Condition::Type(condition) => Ok(condition.prepare()),
            Condition::String(condition) => condition.prepare(resolver),
            Condition::Comparison(condition) => condition.prepare(resolver),
        }
    }

    /// Returns true for an un-negated type condition.
    pub fn is_type_guard(&self) -> bool {
        matches!(self, Condition::Type(condition) if !condition.is_negated())
    }

    pub fn is_negated(&self) -> bool {
        match self {
            Condition::Type(condition) => condition.is_negated(),
            Condition::String(condition) => condition.is_negated(),
            Condition::Comparison(condition) => condition.is_negated(),
        }
    }

    /// The property read by this condition, if any.
    pub fn property(&self) -> Option<&condforge_core::Property> {
        match self {
            Condition::Type(_) => None,
            Condition::String(condition) => Some(condition.property()),
            Condition::Comparison(condition) => Some(condition.property()),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Type(condition) => fmt::Display::fmt(condition, f),
            Condition::String(condition) => fmt::Display::fmt(condition, f),
            Condition::Comparison(condition) => fmt::Display::fmt(condition, f),
        }
    }
}

impl From<TypeCondition> for Condition {
    fn from(condition: TypeCondition) -> Self {
        Condition::Type(condition)
    }
}

impl From<StringCondition> for Condition {
    fn from(condition: StringCondition) -> Self {
        Condition::String(condition)
    }
}

impl From<ComparisonCondition> for Condition {
    fn from(condition: ComparisonCondition) -> Self {
        Condition::Comparison(condition)
    }
}

#[inline]
fn compose(not: bool, inverse: bool, raw: bool) -> bool {
    not ^ inverse ^ raw
}
