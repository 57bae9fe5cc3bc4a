//! Runtime values read from candidates and embedded in literals.

mod compare;
mod types;

#[cfg(test)]
mod tests;

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

pub use compare::{compare_floats, Comparator};
pub use types::{CustomType, EnumDescriptor, ObjectType, ValueType};

/// Borrowed compound or object value.
pub type AnyRef<'a> = &'a (dyn Any + Send + Sync);

/// A member of an inspectable enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValue {
    pub descriptor: &'static EnumDescriptor,
    pub discriminant: i64,
}

impl EnumValue {
    pub fn new(descriptor: &'static EnumDescriptor, discriminant: i64) -> Self {
        Self {
            descriptor,
            discriminant,
        }
    }

    /// Member name, if the discriminant names a declared member.
    pub fn name(&self) -> Option<&'static str> {
        self.descriptor.member_name(self.discriminant)
    }
}

/// A value read from a candidate property or held by a literal.
///
/// Property reads borrow from the candidate, so reading a stored string or a
/// custom value never allocates. Integers are widened to 64 bits; the
/// declared width lives in [`ValueType`].
#[derive(Debug, Clone)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(Cow<'a, str>),
    Enum(EnumValue),
    Custom(AnyRef<'a>),
    Object(AnyRef<'a>),
}

impl<'a> Value<'a> {
    /// Borrowed text value.
    pub fn text(s: &'a str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(v) => Some(*v),
            Value::Int(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumValue> {
        match self {
            Value::Enum(e) => Some(*e),
            _ => None,
        }
    }

    /// Reborrows the value without cloning owned text.
    pub fn borrowed(&self) -> Value<'_> {
        match self {
            Value::Text(s) => Value::Text(Cow::Borrowed(s.as_ref())),
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Char(c) => Value::Char(*c),
            Value::Int(v) => Value::Int(*v),
            Value::UInt(v) => Value::UInt(*v),
            Value::Float(v) => Value::Float(*v),
            Value::Enum(e) => Value::Enum(*e),
            Value::Custom(any) => Value::Custom(*any),
            Value::Object(any) => Value::Object(*any),
        }
    }

    /// Downcasts a custom or object value.
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        match *self {
            Value::Custom(any) | Value::Object(any) => any.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Detaches a scalar value from the borrowed candidate.
    ///
    /// Returns `None` for custom and object values, which are only ever
    /// borrowed.
    pub fn into_owned(self) -> Option<Value<'static>> {
        let owned = match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(b),
            Value::Char(c) => Value::Char(c),
            Value::Int(v) => Value::Int(v),
            Value::UInt(v) => Value::UInt(v),
            Value::Float(v) => Value::Float(v),
            Value::Text(s) => Value::Text(Cow::Owned(s.into_owned())),
            Value::Enum(e) => Value::Enum(e),
            Value::Custom(_) | Value::Object(_) => return None,
        };
        Some(owned)
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "'{}'", c),
            Value::Int(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Enum(e) => match e.name() {
                Some(name) => write!(f, "{}.{}", e.descriptor.name(), name),
                None => write!(f, "{}({})", e.descriptor.name(), e.discriminant),
            },
            Value::Custom(_) => f.write_str("<custom>"),
            Value::Object(_) => f.write_str("<object>"),
        }
    }
}

impl From<bool> for Value<'static> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value<'static> {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<i64> for Value<'static> {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value<'static> {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u64> for Value<'static> {
    fn from(value: u64) -> Self {
        Value::UInt(value)
    }
}

impl From<f64> for Value<'static> {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value<'static> {
    fn from(value: String) -> Self {
        Value::Text(Cow::Owned(value))
    }
}

impl From<EnumValue> for Value<'static> {
    fn from(value: EnumValue) -> Self {
        Value::Enum(value)
    }
}
