//! Predicate compilation.

use smallvec::SmallVec;
use tracing::{debug, warn};

use condforge_config::{ConditionConfig, PredicateConfig};
use condforge_core::error::Result;
use condforge_core::{
    ComparisonOperator, ConfigurationError, Inspectable, ParserRegistry, Property,
    StringOperator, TypeCatalog, TypeDescriptor,
};

use crate::condition::{ComparisonCondition, Condition, StringCondition, TypeCondition};
use crate::literal::{LiteralResolver, RawLiteral};
use crate::predicate::CompiledPredicate;

/// Compiles condition lists into [`CompiledPredicate`]s.
///
/// # Examples
///
/// ```
/// use condforge_compiler::{Condition, PredicateCompiler, StringCondition, TypeCondition};
/// use condforge_core::{Property, StringOperator};
/// use condforge_test::{Container, Weapon};
///
/// let name = Property::of::<Container>("Name").unwrap();
/// let predicate = PredicateCompiler::new()
///     .compile_for::<Container>(&[
///         TypeCondition::DEFAULT.into(),
///         StringCondition::new(name, StringOperator::Contains, "bag")
///             .with_ignore_case(true)
///             .into(),
///     ])
///     .unwrap();
///
/// assert!(predicate.verify(&Container::named("Bag of Tricks")));
/// assert!(!predicate.verify(&Container::named("Sword")));
/// assert!(!predicate.verify(&Weapon::named("Bag")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PredicateCompiler {
    resolver: LiteralResolver,
    type_guard: bool,
}

impl PredicateCompiler {
    /// Creates a compiler using the default parser registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compiler resolving literals with `registry`.
    pub fn with_registry(registry: ParserRegistry) -> Self {
        Self {
            resolver: LiteralResolver::new(registry),
            type_guard: false,
        }
    }

    /// Prepends [`TypeCondition::DEFAULT`] to every compiled list that does
    /// not already start with a type condition.
    pub fn with_type_guard(mut self, enabled: bool) -> Self {
        self.type_guard = enabled;
        self
    }

    /// The resolver shared by every condition this compiler prepares.
    pub fn resolver(&self) -> &LiteralResolver {
        &self.resolver
    }

    /// Prepares every condition in order and returns the predicate.
    ///
    /// # Errors
    ///
    /// Fails with the first condition that cannot be prepared, wrapped in
    /// [`ConfigurationError::Condition`] with its index. No predicate is
    /// produced in that case.
    pub fn compile(
        &self,
        target: &'static TypeDescriptor,
        conditions: &[Condition],
    ) -> Result<CompiledPredicate> {
        self.build(target, conditions, self.type_guard)
    }

    /// Compiles against the descriptor of `T`.
    pub fn compile_for<T: Inspectable>(&self, conditions: &[Condition]) -> Result<CompiledPredicate> {
        self.compile(T::type_descriptor(), conditions)
    }

    /// Compiles a declarative predicate definition.
    ///
    /// The target type is looked up in `catalog`, property paths are bound
    /// against it and operator tags are parsed. A `type_guard` in the
    /// definition enables the guard for this predicate only.
    pub fn compile_config(
        &self,
        config: &PredicateConfig,
        catalog: &TypeCatalog,
    ) -> Result<CompiledPredicate> {
        let target = catalog.resolve(&config.target).inspect_err(|err| {
            warn!(event = "predicate_rejected", target_type = %config.target, error = %err);
        })?;

        let conditions = config
            .conditions
            .iter()
            .enumerate()
            .map(|(index, condition)| {
                condition_from_config(target, condition).map_err(|err| err.in_condition(index))
            })
            .collect::<Result<Vec<_>>>()
            .inspect_err(|err| {
                warn!(event = "predicate_rejected", target_type = target.name(), error = %err);
            })?;

        self.build(target, &conditions, self.type_guard || config.type_guard)
    }

    fn build(
        &self,
        target: &'static TypeDescriptor,
        conditions: &[Condition],
        type_guard: bool,
    ) -> Result<CompiledPredicate> {
        let guard = type_guard && !conditions.first().is_some_and(Condition::is_type_guard);

        let mut prepared = SmallVec::with_capacity(conditions.len() + usize::from(guard));
        if guard {
            prepared.push(TypeCondition::DEFAULT.prepare());
        }

        for (index, condition) in conditions.iter().enumerate() {
            let result = check_owner(target, condition)
                .and_then(|()| condition.prepare(&self.resolver))
                .map_err(|err| err.in_condition(index));

            match result {
                Ok(condition) => prepared.push(condition),
                Err(err) => {
                    warn!(event = "predicate_rejected", target_type = target.name(), error = %err);
                    return Err(err);
                }
            }
        }

        debug!(
            event = "predicate_compiled",
            target_type = target.name(),
            conditions = prepared.len(),
            type_guard = guard,
        );

        Ok(CompiledPredicate::new(target, prepared))
    }
}

/// Compiles `conditions` with the default registry.
pub fn compile(
    target: &'static TypeDescriptor,
    conditions: &[Condition],
) -> Result<CompiledPredicate> {
    PredicateCompiler::new().compile(target, conditions)
}

fn check_owner(target: &'static TypeDescriptor, condition: &Condition) -> Result<()> {
    match condition.property() {
        Some(property) if property.owner().type_id() != target.type_id() => {
            Err(ConfigurationError::ForeignProperty {
                property: property.path(),
                owner: property.owner().name().to_string(),
                target: target.name().to_string(),
            })
        }
        _ => Ok(()),
    }
}

fn condition_from_config(
    target: &'static TypeDescriptor,
    config: &ConditionConfig,
) -> Result<Condition> {
    let condition: Condition = match config {
        ConditionConfig::Type(c) => TypeCondition::new(c.negate).into(),
        ConditionConfig::String(c) => StringCondition::new(
            Property::bind(target, &c.property)?,
            c.operator.parse::<StringOperator>()?,
            RawLiteral::from(&c.value),
        )
        .with_ignore_case(c.ignore_case)
        .negate(c.negate)
        .into(),
        ConditionConfig::Comparison(c) => ComparisonCondition::new(
            Property::bind(target, &c.property)?,
            c.operator.parse::<ComparisonOperator>()?,
            RawLiteral::from(&c.value),
        )
        .negate(c.negate)
        .into(),
    };
    Ok(condition)
}
