use std::any::Any;
use std::fmt;

use condforge_core::error::Result;
use condforge_core::{insensitive, ConfigurationError, Property, StringOperator, Value, ValueType};

use super::{compose, PreparedCondition};
use crate::literal::{Literal, LiteralResolver, RawLiteral};

/// Compares a text property against a text literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringCondition {
    property: Property,
    operator: StringOperator,
    value: RawLiteral,
    ignore_case: bool,
    not: bool,
}

impl StringCondition {
    pub fn new(property: Property, operator: StringOperator, value: impl Into<RawLiteral>) -> Self {
        Self {
            property,
            operator,
            value: value.into(),
            ignore_case: false,
            not: false,
        }
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn negate(mut self, not: bool) -> Self {
        self.not = not;
        self
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    pub fn operator(&self) -> StringOperator {
        self.operator
    }

    pub fn value(&self) -> &RawLiteral {
        &self.value
    }

    pub fn ignores_case(&self) -> bool {
        self.ignore_case
    }

    pub fn is_negated(&self) -> bool {
        self.not
    }

    pub fn prepare(&self, resolver: &LiteralResolver) -> Result<PreparedCondition> {
        let ty = self.property.value_type();
        if *ty != ValueType::Text {
            return Err(ConfigurationError::NotText {
                property: self.property.path(),
                ty: ty.to_string(),
                operator: self.operator,
            });
        }

        let needle = match resolver.resolve(ty, &self.value)? {
            Literal::Const(Value::Null) => None,
            Literal::Const(Value::Text(text)) => Some(text.into_owned()),
            _ => {
                return Err(ConfigurationError::LiteralMismatch {
                    literal: self.value.to_string(),
                    ty: ty.to_string(),
                })
            }
        };

        let property = self.property.clone();
        let not = self.not;
        let inverse = self.operator == StringOperator::NotEqual;
        let label = self.to_string();

        let prepared = match (self.operator, needle) {
            (StringOperator::Equal | StringOperator::NotEqual, needle) => {
                let equals = if self.ignore_case {
                    insensitive::equals_nullable
                } else {
                    exact_equals
                };
                PreparedCondition::new(label, move |narrowed: Option<&dyn Any>| {
                    let Some(candidate) = narrowed else {
                        return false;
                    };
                    let value = property.read(candidate);
                    compose(not, inverse, equals(value.as_str(), needle.as_deref()))
                })
            }
            (operator, Some(needle)) => {
                let test = substring_test(operator, self.ignore_case);
                PreparedCondition::new(label, move |narrowed: Option<&dyn Any>| {
                    let Some(candidate) = narrowed else {
                        return false;
                    };
                    let raw = match property.read(candidate) {
                        Value::Text(text) => test(&text, &needle),
                        _ => false,
                    };
                    compose(not, inverse, raw)
                })
            }
            (operator, None) => {
                return Err(ConfigurationError::NullSubstring {
                    property: self.property.path(),
                    operator,
                })
            }
        };

        Ok(prepared)
    }
}

impl fmt::Display for StringCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.not {
            f.write_str("not ")?;
        }
        write!(f, "{} {} \"{}\"", self.property, self.operator, self.value)?;
        if self.ignore_case {
            f.write_str(" (ignore case)")?;
        }
        Ok(())
    }
}

fn exact_equals(a: Option<&str>, b: Option<&str>) -> bool {
    a == b
}

fn substring_test(operator: StringOperator, ignore_case: bool) -> fn(&str, &str) -> bool {
    match (operator, ignore_case) {
        (StringOperator::StartsWith, true) => insensitive::starts_with,
        (StringOperator::EndsWith, true) => insensitive::ends_with,
        (_, true) => insensitive::contains,
        (StringOperator::StartsWith, false) => ordinal_starts_with,
        (StringOperator::EndsWith, false) => ordinal_ends_with,
        (_, false) => ordinal_contains,
    }
}

fn ordinal_starts_with(s: &str, prefix: &str) -> bool {
    s.starts_with(prefix)
}

fn ordinal_ends_with(s: &str, suffix: &str) -> bool {
    s.ends_with(suffix)
}

fn ordinal_contains(s: &str, needle: &str) -> bool {
    s.contains(needle)
}
