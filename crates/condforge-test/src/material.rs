//! Material enumeration fixture.

use condforge_core::{EnumDescriptor, InspectEnum, PropertyValue, Value, ValueType};

static MATERIAL: EnumDescriptor = EnumDescriptor::new(
    "Material",
    &[("Iron", 0), ("Wood", 1), ("Leather", 2), ("Cloth", 5)],
);

/// Crafting material. Discriminants are not contiguous.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Material {
    #[default]
    Iron = 0,
    Wood = 1,
    Leather = 2,
    Cloth = 5,
}

impl InspectEnum for Material {
    fn enum_descriptor() -> &'static EnumDescriptor {
        &MATERIAL
    }

    fn discriminant(&self) -> i64 {
        *self as i64
    }
}

impl PropertyValue for Material {
    fn value_type() -> ValueType {
        ValueType::Enum(&MATERIAL)
    }

    fn to_value(&self) -> Value<'_> {
        Value::Enum(self.to_enum_value())
    }
}
