//! CondForge Core - value model and property access for predicate compilation
//!
//! This crate provides the pieces a predicate compiler consumes:
//! - Value types and runtime values read from candidates
//! - Property descriptors and bound property chains over `&dyn Any`
//! - Case-insensitive string comparison
//! - The literal parser registry
//! - Operator tags and the configuration error type

pub mod error;
pub mod insensitive;
pub mod operator;
pub mod property;
pub mod registry;
pub mod value;

pub use error::ConfigurationError;
pub use operator::{ComparisonOperator, StringOperator};
pub use property::{
    Getter, InspectEnum, Inspectable, Property, PropertyDescriptor, PropertyValue, TypeCatalog,
    TypeDescriptor,
};
pub use registry::{LiteralParser, NumberStyle, ParserRegistry, Parsed};
pub use value::{
    compare_floats, AnyRef, Comparator, CustomType, EnumDescriptor, EnumValue, ObjectType, Value,
    ValueType,
};

#[cfg(feature = "decimal")]
pub use rust_decimal::Decimal;
