//! Property accessors for candidate objects.
//!
//! Candidates are type-erased (`&dyn Any`). An [`Inspectable`] type publishes
//! a [`TypeDescriptor`] listing its readable properties; a [`Property`] binds
//! a dotted path against a descriptor once and then reads values without
//! any name lookup.

mod catalog;
mod value;

#[cfg(test)]
mod tests;

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::error::ConfigurationError;
use crate::insensitive;
use crate::value::{Value, ValueType};

pub use catalog::TypeCatalog;
pub use value::{InspectEnum, PropertyValue};

/// Reads a property from an erased candidate.
///
/// Getters return [`Value::Null`] when the candidate is not of the owner
/// type.
pub type Getter = for<'a> fn(&'a dyn Any) -> Value<'a>;

/// Types whose properties can be read by compiled predicates.
///
/// Usually derived with `#[derive(Inspectable)]`.
pub trait Inspectable: Any + Send + Sync {
    fn type_descriptor() -> &'static TypeDescriptor;
}

/// A single readable property of an inspectable type.
pub struct PropertyDescriptor {
    name: &'static str,
    value_type: ValueType,
    getter: Getter,
}

impl PropertyDescriptor {
    pub fn new(name: &'static str, value_type: ValueType, getter: Getter) -> Self {
        Self {
            name,
            value_type,
            getter,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    #[inline]
    pub fn read<'a>(&self, owner: &'a dyn Any) -> Value<'a> {
        (self.getter)(owner)
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .finish()
    }
}

/// Runtime metadata for an inspectable type.
pub struct TypeDescriptor {
    name: &'static str,
    type_id: TypeId,
    properties: Vec<PropertyDescriptor>,
}

impl TypeDescriptor {
    pub fn new<T: Any>(name: &'static str, properties: Vec<PropertyDescriptor>) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            properties,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Finds a property by name, ignoring case.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties
            .iter()
            .find(|p| insensitive::equals(p.name, name))
    }

    /// Treats `candidate` as an instance of this type.
    ///
    /// Returns `None` when the candidate is of a different type.
    #[inline]
    pub fn narrow<'a>(&self, candidate: &'a dyn Any) -> Option<&'a dyn Any> {
        if candidate.type_id() == self.type_id {
            Some(candidate)
        } else {
            None
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .finish()
    }
}

/// A property path bound against an owner type.
///
/// Binding resolves every segment once; [`Property::read`] then follows the
/// chain of getters directly. Reading through a null intermediate object
/// yields [`Value::Null`].
#[derive(Clone)]
pub struct Property {
    owner: &'static TypeDescriptor,
    chain: SmallVec<[&'static PropertyDescriptor; 2]>,
}

impl Property {
    /// Binds a dotted path such as `Name` or `Owner.Name`.
    ///
    /// # Errors
    ///
    /// Fails if a segment is empty, names no property of its owner, or if a
    /// path continues through a property that is not an object reference.
    pub fn bind(owner: &'static TypeDescriptor, path: &str) -> Result<Self, ConfigurationError> {
        let mut chain: SmallVec<[&'static PropertyDescriptor; 2]> = SmallVec::new();
        let mut current = owner;

        for segment in path.split('.') {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(ConfigurationError::InvalidPath(path.to_string()));
            }

            if let Some(previous) = chain.last() {
                current = match previous.value_type() {
                    ValueType::Object(object) => object.descriptor(),
                    other => {
                        return Err(ConfigurationError::NotAnObject {
                            property: previous.name().to_string(),
                            ty: other.to_string(),
                            name: segment.to_string(),
                        })
                    }
                };
            }

            let descriptor =
                current
                    .property(segment)
                    .ok_or_else(|| ConfigurationError::UnknownProperty {
                        owner: current.name().to_string(),
                        name: segment.to_string(),
                    })?;
            chain.push(descriptor);
        }

        Ok(Self { owner, chain })
    }

    /// Binds `path` against the descriptor of `T`.
    pub fn of<T: Inspectable>(path: &str) -> Result<Self, ConfigurationError> {
        Self::bind(T::type_descriptor(), path)
    }

    pub fn owner(&self) -> &'static TypeDescriptor {
        self.owner
    }

    /// Declared type of the last link.
    pub fn value_type(&self) -> &'static ValueType {
        let last: &'static PropertyDescriptor = self.chain[self.chain.len() - 1];
        last.value_type()
    }

    /// Canonical dotted path using the declared property names.
    pub fn path(&self) -> String {
        let names: Vec<&str> = self.chain.iter().map(|p| p.name()).collect();
        names.join(".")
    }

    /// Reads the property from a candidate already narrowed to the owner
    /// type.
    pub fn read<'a>(&self, candidate: &'a dyn Any) -> Value<'a> {
        let (last, links) = match self.chain.split_last() {
            Some(split) => split,
            None => return Value::Null,
        };

        let mut current = candidate;
        for link in links {
            current = match link.read(current) {
                Value::Object(next) => next as &dyn Any,
                _ => return Value::Null,
            };
        }
        last.read(current)
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.owner.type_id == other.owner.type_id
            && self.chain.len() == other.chain.len()
            && self
                .chain
                .iter()
                .zip(other.chain.iter())
                .all(|(a, b)| std::ptr::eq(*a, *b))
    }
}

impl Eq for Property {}

impl Hash for Property {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.type_id.hash(state);
        for link in &self.chain {
            std::ptr::hash(*link, state);
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Property({}.{})", self.owner.name, self.path())
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
