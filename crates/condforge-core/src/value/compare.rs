//! Three-way comparison of values.

use std::cmp::Ordering;

use super::types::{CustomType, ValueType};
use super::Value;

/// Compares two floats with a total order: NaN equals NaN and sorts before
/// every number.
pub fn compare_floats(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => b.is_nan().cmp(&a.is_nan()),
    }
}

/// Three-way comparison for one ordering-capable type family.
///
/// Chosen once per condition from the property's declared type, so the
/// evaluation path never inspects the [`ValueType`] again.
#[derive(Debug, Clone, Copy)]
pub enum Comparator {
    Bool,
    Char,
    Int,
    UInt,
    Float,
    Text,
    Enum,
    Custom(CustomType),
}

impl Comparator {
    /// Returns the comparator for a type, or `None` if the type has no
    /// ordering.
    pub fn for_type(ty: &ValueType) -> Option<Self> {
        let comparator = match ty {
            ValueType::Bool => Comparator::Bool,
            ValueType::Char => Comparator::Char,
            ValueType::I8 | ValueType::I16 | ValueType::I32 | ValueType::I64 => Comparator::Int,
            ValueType::U8 | ValueType::U16 | ValueType::U32 | ValueType::U64 => Comparator::UInt,
            ValueType::F32 | ValueType::F64 => Comparator::Float,
            ValueType::Text => Comparator::Text,
            ValueType::Enum(_) => Comparator::Enum,
            ValueType::Custom(custom) if custom.is_ordered() => Comparator::Custom(*custom),
            ValueType::Custom(_) | ValueType::Object(_) => return None,
        };
        Some(comparator)
    }

    /// Compares two values. Null sorts before any other value and equals
    /// null.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        match (a, b) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            _ => self
                .compare_present(a, b)
                .unwrap_or_else(|| rank(a).cmp(&rank(b))),
        }
    }

    fn compare_present(&self, a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
        match (self, a, b) {
            (Comparator::Bool, Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
            (Comparator::Char, Value::Char(x), Value::Char(y)) => Some(x.cmp(y)),
            (Comparator::Int, Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
            (Comparator::UInt, Value::UInt(x), Value::UInt(y)) => Some(x.cmp(y)),
            (Comparator::Float, Value::Float(x), Value::Float(y)) => Some(compare_floats(*x, *y)),
            (Comparator::Text, Value::Text(x), Value::Text(y)) => Some(x.as_ref().cmp(y.as_ref())),
            (Comparator::Enum, Value::Enum(x), Value::Enum(y)) => {
                Some(x.discriminant.cmp(&y.discriminant))
            }
            (Comparator::Custom(custom), Value::Custom(x), Value::Custom(y)) => custom.compare(*x, *y),
            _ => None,
        }
    }
}

// Fallback order for mismatched variants; keeps `compare` total.
fn rank(value: &Value<'_>) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Char(_) => 2,
        Value::Int(_) => 3,
        Value::UInt(_) => 4,
        Value::Float(_) => 5,
        Value::Text(_) => 6,
        Value::Enum(_) => 7,
        Value::Custom(_) => 8,
        Value::Object(_) => 9,
    }
}
