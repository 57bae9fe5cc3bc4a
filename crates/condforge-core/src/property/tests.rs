//! Tests for property binding and reading.

use std::any::Any;
use std::sync::{Arc, OnceLock};

use super::*;
use crate::value::Value;

struct Owner {
    name: String,
}

struct Item {
    hue: i32,
    name: Option<String>,
    owner: Option<Arc<Owner>>,
}

impl Inspectable for Owner {
    fn type_descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            fn name(obj: &dyn Any) -> Value<'_> {
                match obj.downcast_ref::<Owner>() {
                    Some(o) => o.name.to_value(),
                    None => Value::Null,
                }
            }
            TypeDescriptor::new::<Owner>(
                "Owner",
                vec![PropertyDescriptor::new("Name", String::value_type(), name)],
            )
        })
    }
}

impl Inspectable for Item {
    fn type_descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            fn hue(obj: &dyn Any) -> Value<'_> {
                obj.downcast_ref::<Item>()
                    .map_or(Value::Null, |i| i.hue.to_value())
            }
            fn name(obj: &dyn Any) -> Value<'_> {
                obj.downcast_ref::<Item>()
                    .map_or(Value::Null, |i| i.name.to_value())
            }
            fn owner(obj: &dyn Any) -> Value<'_> {
                obj.downcast_ref::<Item>()
                    .map_or(Value::Null, |i| i.owner.to_value())
            }
            TypeDescriptor::new::<Item>(
                "Item",
                vec![
                    PropertyDescriptor::new("Hue", i32::value_type(), hue),
                    PropertyDescriptor::new("Name", <Option<String>>::value_type(), name),
                    PropertyDescriptor::new("Owner", <Option<Arc<Owner>>>::value_type(), owner),
                ],
            )
        })
    }
}

fn item(owner: Option<&str>) -> Item {
    Item {
        hue: 0x3EA,
        name: Some("Bag".to_string()),
        owner: owner.map(|name| {
            Arc::new(Owner {
                name: name.to_string(),
            })
        }),
    }
}

#[test]
fn test_bind_is_case_insensitive() {
    let property = Property::of::<Item>("hue").unwrap();
    assert_eq!(property.path(), "Hue");
    assert_eq!(property.value_type(), &ValueType::I32);
}

#[test]
fn test_read_simple_property() {
    let candidate = item(None);
    let property = Property::of::<Item>("Hue").unwrap();
    assert_eq!(property.read(&candidate).as_i64(), Some(1002));
}

#[test]
fn test_read_chain() {
    let candidate = item(Some("Lord British"));
    let property = Property::of::<Item>("Owner.Name").unwrap();
    assert_eq!(property.path(), "Owner.Name");
    assert_eq!(property.value_type(), &ValueType::Text);
    assert_eq!(property.read(&candidate).as_str(), Some("Lord British"));
}

#[test]
fn test_read_chain_through_null_is_null() {
    let candidate = item(None);
    let property = Property::of::<Item>("Owner.Name").unwrap();
    assert!(property.read(&candidate).is_null());
}

#[test]
fn test_unknown_property() {
    let err = Property::of::<Item>("Weight").unwrap_err();
    assert!(matches!(err, ConfigurationError::UnknownProperty { ref name, .. } if name == "Weight"));
}

#[test]
fn test_chain_through_scalar_fails() {
    let err = Property::of::<Item>("Hue.Name").unwrap_err();
    assert!(matches!(err, ConfigurationError::NotAnObject { .. }));
}

#[test]
fn test_empty_segment_fails() {
    assert!(matches!(
        Property::of::<Item>("Owner..Name"),
        Err(ConfigurationError::InvalidPath(_))
    ));
    assert!(matches!(
        Property::of::<Item>(""),
        Err(ConfigurationError::InvalidPath(_))
    ));
}

#[test]
fn test_narrow() {
    let descriptor = Item::type_descriptor();
    let candidate = item(None);
    let other = Owner {
        name: "x".to_string(),
    };
    assert!(descriptor.narrow(&candidate).is_some());
    assert!(descriptor.narrow(&other).is_none());
}

#[test]
fn test_property_identity() {
    let a = Property::of::<Item>("owner.name").unwrap();
    let b = Property::of::<Item>("OWNER.NAME").unwrap();
    let c = Property::of::<Item>("Name").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_catalog() {
    let catalog = TypeCatalog::new().with::<Item>().with::<Owner>().with::<Item>();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("item").map(|d| d.name()), Some("Item"));
    assert!(matches!(
        catalog.resolve("Mobile"),
        Err(ConfigurationError::UnknownType(_))
    ));
}
