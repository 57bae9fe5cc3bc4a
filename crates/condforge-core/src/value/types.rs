//! Declared property types.

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::fmt;

use crate::insensitive;
use crate::property::{Inspectable, TypeDescriptor};

/// Metadata for a field-less enumeration exposed as a property type.
///
/// Descriptors are expected to live in statics, so two enum types are the
/// same when their descriptors compare equal.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    name: &'static str,
    members: &'static [(&'static str, i64)],
}

impl EnumDescriptor {
    pub const fn new(name: &'static str, members: &'static [(&'static str, i64)]) -> Self {
        Self { name, members }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn members(&self) -> &'static [(&'static str, i64)] {
        self.members
    }

    /// Looks up a member by name, ignoring case.
    pub fn member_by_name(&self, name: &str) -> Option<i64> {
        self.members
            .iter()
            .find(|(member, _)| insensitive::equals(member, name))
            .map(|(_, discriminant)| *discriminant)
    }

    /// Returns the member name for a discriminant.
    pub fn member_name(&self, discriminant: i64) -> Option<&'static str> {
        self.members
            .iter()
            .find(|(_, d)| *d == discriminant)
            .map(|(name, _)| *name)
    }
}

type EqFn = fn(&dyn Any, &dyn Any) -> bool;
type CmpFn = fn(&dyn Any, &dyn Any) -> Option<Ordering>;

fn erased_eq<T: PartialEq + Any>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn erased_cmp<T: Ord + Any>(a: &dyn Any, b: &dyn Any) -> Option<Ordering> {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// A compound value type (neither scalar nor text nor enum).
///
/// Literals of custom types are parsed once into a slot. Whether the type
/// supports relational operators is decided when the type is declared.
#[derive(Clone, Copy)]
pub struct CustomType {
    name: &'static str,
    type_id: TypeId,
    eq: EqFn,
    cmp: Option<CmpFn>,
}

impl CustomType {
    /// Declares a custom type supporting equality only.
    pub fn of<T: PartialEq + Any>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            eq: erased_eq::<T>,
            cmp: None,
        }
    }

    /// Declares a custom type supporting equality and three-way ordering.
    pub fn ordered<T: Ord + Any>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            eq: erased_eq::<T>,
            cmp: Some(erased_cmp::<T>),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn is_ordered(&self) -> bool {
        self.cmp.is_some()
    }

    pub fn values_equal(&self, a: &dyn Any, b: &dyn Any) -> bool {
        (self.eq)(a, b)
    }

    /// Three-way comparison; `None` when the type is unordered or either
    /// side is not of this type.
    pub fn compare(&self, a: &dyn Any, b: &dyn Any) -> Option<Ordering> {
        self.cmp.and_then(|cmp| cmp(a, b))
    }
}

impl PartialEq for CustomType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomType")
            .field("name", &self.name)
            .field("ordered", &self.is_ordered())
            .finish()
    }
}

/// A reference to another inspectable type, traversable in property chains.
#[derive(Clone, Copy)]
pub struct ObjectType {
    type_id: TypeId,
    descriptor: fn() -> &'static TypeDescriptor,
}

impl ObjectType {
    /// Declares a reference to `T`.
    ///
    /// The descriptor is resolved lazily, so self-referencing types can name
    /// themselves while their own descriptor is being built.
    pub fn of<T: Inspectable>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            descriptor: T::type_descriptor,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn descriptor(&self) -> &'static TypeDescriptor {
        (self.descriptor)()
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectType")
            .field(&self.descriptor().name())
            .finish()
    }
}

/// The declared type of a property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueType {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// Nullable text.
    Text,
    Enum(&'static EnumDescriptor),
    Custom(CustomType),
    /// Nullable reference to another inspectable object.
    Object(ObjectType),
}

impl ValueType {
    /// Scalar types whose literals are embedded as constants.
    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            ValueType::Text | ValueType::Enum(_) | ValueType::Custom(_) | ValueType::Object(_)
        )
    }

    /// Types whose values may be null.
    pub fn is_reference(&self) -> bool {
        matches!(self, ValueType::Text | ValueType::Object(_))
    }

    /// Types supporting a three-way comparison.
    pub fn is_ordered(&self) -> bool {
        match self {
            ValueType::Custom(custom) => custom.is_ordered(),
            ValueType::Object(_) => false,
            _ => true,
        }
    }

    /// Key used by the parser registry. Text and enums are resolved without
    /// a parser and have no key.
    pub fn type_id(&self) -> Option<TypeId> {
        let id = match self {
            ValueType::Bool => TypeId::of::<bool>(),
            ValueType::Char => TypeId::of::<char>(),
            ValueType::I8 => TypeId::of::<i8>(),
            ValueType::I16 => TypeId::of::<i16>(),
            ValueType::I32 => TypeId::of::<i32>(),
            ValueType::I64 => TypeId::of::<i64>(),
            ValueType::U8 => TypeId::of::<u8>(),
            ValueType::U16 => TypeId::of::<u16>(),
            ValueType::U32 => TypeId::of::<u32>(),
            ValueType::U64 => TypeId::of::<u64>(),
            ValueType::F32 => TypeId::of::<f32>(),
            ValueType::F64 => TypeId::of::<f64>(),
            ValueType::Custom(custom) => custom.type_id(),
            ValueType::Object(object) => object.type_id(),
            ValueType::Text | ValueType::Enum(_) => return None,
        };
        Some(id)
    }

    /// Inclusive range of a signed integer type.
    pub fn signed_range(&self) -> Option<(i64, i64)> {
        match self {
            ValueType::I8 => Some((i8::MIN.into(), i8::MAX.into())),
            ValueType::I16 => Some((i16::MIN.into(), i16::MAX.into())),
            ValueType::I32 => Some((i32::MIN.into(), i32::MAX.into())),
            ValueType::I64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Inclusive upper bound of an unsigned integer type.
    pub fn unsigned_max(&self) -> Option<u64> {
        match self {
            ValueType::U8 => Some(u8::MAX.into()),
            ValueType::U16 => Some(u16::MAX.into()),
            ValueType::U32 => Some(u32::MAX.into()),
            ValueType::U64 => Some(u64::MAX),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => f.write_str("bool"),
            ValueType::Char => f.write_str("char"),
            ValueType::I8 => f.write_str("i8"),
            ValueType::I16 => f.write_str("i16"),
            ValueType::I32 => f.write_str("i32"),
            ValueType::I64 => f.write_str("i64"),
            ValueType::U8 => f.write_str("u8"),
            ValueType::U16 => f.write_str("u16"),
            ValueType::U32 => f.write_str("u32"),
            ValueType::U64 => f.write_str("u64"),
            ValueType::F32 => f.write_str("f32"),
            ValueType::F64 => f.write_str("f64"),
            ValueType::Text => f.write_str("text"),
            ValueType::Enum(descriptor) => f.write_str(descriptor.name()),
            ValueType::Custom(custom) => f.write_str(custom.name()),
            ValueType::Object(object) => f.write_str(object.descriptor().name()),
        }
    }
}
