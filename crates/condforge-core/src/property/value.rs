//! Mapping from Rust field types to property values.

use std::borrow::Cow;
use std::sync::Arc;

use super::Inspectable;
use crate::value::{EnumDescriptor, EnumValue, ObjectType, Value, ValueType};

/// A Rust type that can be exposed as a property.
pub trait PropertyValue {
    /// Declared type of properties of this Rust type.
    fn value_type() -> ValueType;

    /// Borrows the value for comparison.
    fn to_value(&self) -> Value<'_>;
}

/// A field-less enumeration exposed as a property type.
///
/// Usually derived with `#[derive(InspectEnum)]`, which also implements
/// [`PropertyValue`].
pub trait InspectEnum: Sized + 'static {
    fn enum_descriptor() -> &'static EnumDescriptor;

    fn discriminant(&self) -> i64;

    fn to_enum_value(&self) -> EnumValue {
        EnumValue::new(Self::enum_descriptor(), self.discriminant())
    }
}

macro_rules! impl_signed {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                fn value_type() -> ValueType {
                    ValueType::$variant
                }

                #[inline]
                fn to_value(&self) -> Value<'_> {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                fn value_type() -> ValueType {
                    ValueType::$variant
                }

                #[inline]
                fn to_value(&self) -> Value<'_> {
                    Value::UInt(u64::from(*self))
                }
            }
        )*
    };
}

impl_signed!(i8 => I8, i16 => I16, i32 => I32, i64 => I64);
impl_unsigned!(u8 => U8, u16 => U16, u32 => U32, u64 => U64);

impl PropertyValue for f32 {
    fn value_type() -> ValueType {
        ValueType::F32
    }

    fn to_value(&self) -> Value<'_> {
        Value::Float(f64::from(*self))
    }
}

impl PropertyValue for f64 {
    fn value_type() -> ValueType {
        ValueType::F64
    }

    fn to_value(&self) -> Value<'_> {
        Value::Float(*self)
    }
}

impl PropertyValue for bool {
    fn value_type() -> ValueType {
        ValueType::Bool
    }

    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl PropertyValue for char {
    fn value_type() -> ValueType {
        ValueType::Char
    }

    fn to_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl PropertyValue for String {
    fn value_type() -> ValueType {
        ValueType::Text
    }

    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(self.as_str()))
    }
}

impl PropertyValue for Option<String> {
    fn value_type() -> ValueType {
        ValueType::Text
    }

    fn to_value(&self) -> Value<'_> {
        match self {
            Some(s) => Value::Text(Cow::Borrowed(s.as_str())),
            None => Value::Null,
        }
    }
}

impl PropertyValue for Arc<str> {
    fn value_type() -> ValueType {
        ValueType::Text
    }

    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(&**self))
    }
}

impl PropertyValue for &'static str {
    fn value_type() -> ValueType {
        ValueType::Text
    }

    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(*self))
    }
}

impl<T: Inspectable> PropertyValue for Option<Arc<T>> {
    fn value_type() -> ValueType {
        ValueType::Object(ObjectType::of::<T>())
    }

    fn to_value(&self) -> Value<'_> {
        match self {
            Some(object) => Value::Object(&**object),
            None => Value::Null,
        }
    }
}

impl<T: Inspectable> PropertyValue for Option<Box<T>> {
    fn value_type() -> ValueType {
        ValueType::Object(ObjectType::of::<T>())
    }

    fn to_value(&self) -> Value<'_> {
        match self {
            Some(object) => Value::Object(&**object),
            None => Value::Null,
        }
    }
}

#[cfg(feature = "decimal")]
impl PropertyValue for rust_decimal::Decimal {
    fn value_type() -> ValueType {
        ValueType::Custom(crate::value::CustomType::ordered::<Self>("Decimal"))
    }

    fn to_value(&self) -> Value<'_> {
        Value::Custom(self)
    }
}

/// Implements [`PropertyValue`] for a compound value type.
///
/// The type must be `Send + Sync`; property reads hand out shared borrows.
///
/// ```ignore
/// impl_custom_property!(Point3D);           // equality only
/// impl_custom_property!(ordered Duration);  // equality and ordering
/// ```
#[macro_export]
macro_rules! impl_custom_property {
    (ordered $ty:ty) => {
        impl $crate::PropertyValue for $ty {
            fn value_type() -> $crate::ValueType {
                $crate::ValueType::Custom($crate::CustomType::ordered::<$ty>(stringify!($ty)))
            }

            fn to_value(&self) -> $crate::Value<'_> {
                $crate::Value::Custom(self)
            }
        }
    };
    ($ty:ty) => {
        impl $crate::PropertyValue for $ty {
            fn value_type() -> $crate::ValueType {
                $crate::ValueType::Custom($crate::CustomType::of::<$ty>(stringify!($ty)))
            }

            fn to_value(&self) -> $crate::Value<'_> {
                $crate::Value::Custom(self)
            }
        }
    };
}
