//! CondForge Compiler - compiles declarative conditions into predicates
//!
//! A condition list over the properties of one candidate type is prepared
//! once: literals are resolved to the property types and operator
//! implementations are selected. The result is a [`CompiledPredicate`] whose
//! [`verify`](CompiledPredicate::verify) only reads candidates.
//!
//! # Modules
//!
//! - [`literal`] - raw literals and the literal resolver
//! - [`condition`] - type, string and comparison conditions
//! - [`compiler`] - the predicate compiler
//! - [`predicate`] - the compiled artifact
//! - [`cache`] - content-keyed predicate cache

pub mod cache;
pub mod compiler;
pub mod condition;
pub mod literal;
pub mod predicate;

#[cfg(test)]
mod tests;

pub use cache::PredicateCache;
pub use compiler::{compile, PredicateCompiler};
pub use condition::{
    ComparisonCondition, Condition, PreparedCondition, StringCondition, TypeCondition,
};
pub use literal::{Literal, LiteralResolver, RawLiteral, Slot};
pub use predicate::CompiledPredicate;
