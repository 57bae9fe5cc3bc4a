use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use condforge_core::error::Result;
use condforge_core::{
    Comparator, ComparisonOperator, ConfigurationError, CustomType, Property, Value, ValueType,
};

use super::{compose, PreparedCondition};
use crate::literal::{LiteralResolver, RawLiteral};

/// Compares a property against a literal of the property's type.
///
/// Ordered types support every operator. Objects and unordered custom
/// types support only `==` and `!=`; requesting a relational operator for
/// them fails when the condition is prepared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComparisonCondition {
    property: Property,
    operator: ComparisonOperator,
    value: RawLiteral,
    not: bool,
}

impl ComparisonCondition {
    pub fn new(
        property: Property,
        operator: ComparisonOperator,
        value: impl Into<RawLiteral>,
    ) -> Self {
        Self {
            property,
            operator,
            value: value.into(),
            not: false,
        }
    }

    pub fn negate(mut self, not: bool) -> Self {
        self.not = not;
        self
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    pub fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    pub fn value(&self) -> &RawLiteral {
        &self.value
    }

    pub fn is_negated(&self) -> bool {
        self.not
    }

    pub fn prepare(&self, resolver: &LiteralResolver) -> Result<PreparedCondition> {
        let ty = self.property.value_type();
        if self.operator.is_relational() && !ty.is_ordered() {
            return Err(ConfigurationError::NotOrdered {
                property: self.property.path(),
                ty: ty.to_string(),
                operator: self.operator,
            });
        }
        let literal = resolver.resolve(ty, &self.value)?;

        let property = self.property.clone();
        let not = self.not;
        let label = self.to_string();

        if let Some(comparator) = Comparator::for_type(ty) {
            let (accept, inverse) = ordering_test(self.operator);
            return Ok(PreparedCondition::new(
                label,
                move |narrowed: Option<&dyn Any>| {
                    let Some(candidate) = narrowed else {
                        return false;
                    };
                    let ordering = comparator.compare(&property.read(candidate), &literal.value());
                    compose(not, inverse, accept(ordering))
                },
            ));
        }

        let equals = equality_test(ty);
        let inverse = self.operator == ComparisonOperator::NotEqual;
        Ok(PreparedCondition::new(
            label,
            move |narrowed: Option<&dyn Any>| {
                let Some(candidate) = narrowed else {
                    return false;
                };
                compose(not, inverse, equals.test(&property.read(candidate), &literal.value()))
            },
        ))
    }
}

impl fmt::Display for ComparisonCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.not {
            f.write_str("not ")?;
        }
        write!(f, "{} {} {}", self.property, self.operator, self.value)
    }
}

/// Maps an operator to the ordering it accepts and its intrinsic inversion.
fn ordering_test(operator: ComparisonOperator) -> (fn(Ordering) -> bool, bool) {
    match operator {
        ComparisonOperator::Equal => (Ordering::is_eq, false),
        ComparisonOperator::NotEqual => (Ordering::is_eq, true),
        ComparisonOperator::Greater => (Ordering::is_gt, false),
        ComparisonOperator::Lesser => (Ordering::is_lt, false),
        ComparisonOperator::GreaterEqual => (Ordering::is_lt, true),
        ComparisonOperator::LesserEqual => (Ordering::is_gt, true),
    }
}

/// Direct equality for types without an ordering.
#[derive(Clone, Copy)]
enum Equality {
    /// Same object instance.
    Identity,
    Custom(CustomType),
}

fn equality_test(ty: &ValueType) -> Equality {
    match ty {
        ValueType::Custom(custom) => Equality::Custom(*custom),
        _ => Equality::Identity,
    }
}

impl Equality {
    fn test(&self, a: &Value<'_>, b: &Value<'_>) -> bool {
        match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Custom(x) | Value::Object(x), Value::Custom(y) | Value::Object(y)) => {
                match self {
                    Equality::Identity => std::ptr::addr_eq(*x, *y),
                    Equality::Custom(custom) => custom.values_equal(*x, *y),
                }
            }
            _ => false,
        }
    }
}
