use super::{Inspectable, TypeDescriptor};
use crate::error::ConfigurationError;
use crate::insensitive;

/// Name-indexed set of candidate types, used when predicates name their
/// target type as text.
#[derive(Debug, Default, Clone)]
pub struct TypeCatalog {
    types: Vec<&'static TypeDescriptor>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `T` to the catalog. Registering a type twice is a no-op.
    pub fn register<T: Inspectable>(&mut self) -> &mut Self {
        self.register_descriptor(T::type_descriptor())
    }

    pub fn register_descriptor(&mut self, descriptor: &'static TypeDescriptor) -> &mut Self {
        if !self
            .types
            .iter()
            .any(|d| d.type_id() == descriptor.type_id())
        {
            self.types.push(descriptor);
        }
        self
    }

    /// Builder-style variant of [`TypeCatalog::register`].
    pub fn with<T: Inspectable>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// Finds a type by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&'static TypeDescriptor> {
        self.types
            .iter()
            .copied()
            .find(|d| insensitive::equals(d.name(), name))
    }

    pub fn resolve(&self, name: &str) -> Result<&'static TypeDescriptor, ConfigurationError> {
        self.get(name)
            .ok_or_else(|| ConfigurationError::UnknownType(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
