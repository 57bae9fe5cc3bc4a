//! CondForge - compiled predicates over inspectable Rust types
//!
//! Derive `Inspectable` on a type, describe a filter as a list of
//! conditions, compile it once and verify candidates as often as needed.
//!
//! # Example
//!
//! ```rust
//! use condforge::prelude::*;
//!
//! #[derive(InspectEnum, Clone, Copy)]
//! pub enum Material {
//!     Iron,
//!     Wood,
//! }
//!
//! #[derive(Inspectable)]
//! pub struct Container {
//!     pub name: Option<String>,
//!     pub hue: i32,
//!     pub material: Material,
//! }
//!
//! let name = Property::of::<Container>("name").unwrap();
//! let hue = Property::of::<Container>("Hue").unwrap();
//! let predicate = compile(
//!     Container::type_descriptor(),
//!     &[
//!         TypeCondition::DEFAULT.into(),
//!         StringCondition::new(name, StringOperator::Contains, "bag")
//!             .with_ignore_case(true)
//!             .into(),
//!         ComparisonCondition::new(hue, ComparisonOperator::GreaterEqual, "100")
//!             .negate(true)
//!             .into(),
//!     ],
//! )
//! .unwrap();
//!
//! let bag = Container { name: Some("Bag of Tricks".into()), hue: 50, material: Material::Wood };
//! assert!(predicate.verify(&bag));
//! ```

#[cfg(feature = "console")]
pub mod console;

// Derive macros
pub use condforge_macros::{InspectEnum, Inspectable};

pub use condforge_core::{
    impl_custom_property, ComparisonOperator, ConfigurationError, InspectEnum, Inspectable,
    ParserRegistry, Property, PropertyValue, StringOperator, TypeCatalog, TypeDescriptor, Value,
    ValueType,
};

pub use condforge_compiler::{
    compile, ComparisonCondition, CompiledPredicate, Condition, LiteralResolver, PredicateCache,
    PredicateCompiler, PreparedCondition, RawLiteral, StringCondition, TypeCondition,
};

pub use condforge_config::{
    ComparisonConditionConfig, ConditionConfig, ConfigError, LiteralConfig, PredicateConfig,
    StringConditionConfig, TypeConditionConfig,
};

/// Internal types for macro-generated code. Do not use directly.
#[doc(hidden)]
pub mod __internal {
    pub use condforge_core::{
        EnumDescriptor, Getter, InspectEnum, Inspectable, PropertyDescriptor, PropertyValue,
        TypeDescriptor, Value, ValueType,
    };
}

pub mod prelude {
    pub use super::{
        compile, ComparisonCondition, ComparisonOperator, CompiledPredicate, Condition,
        ConfigurationError, InspectEnum, Inspectable, PredicateCache, PredicateCompiler,
        PredicateConfig, Property, StringCondition, StringOperator, TypeCatalog, TypeCondition,
    };
}
