//! Candidate type fixtures.
//!
//! # Example
//!
//! ```
//! use condforge_core::{Inspectable, Property};
//! use condforge_test::{Container, Mobile};
//!
//! let bag = Container::named("Bag of Tricks").with_owner(Mobile::named("Lord British"));
//! let owner_name = Property::of::<Container>("Owner.Name").unwrap();
//! assert_eq!(owner_name.read(&bag).as_str(), Some("Lord British"));
//! assert_eq!(Container::type_descriptor().name(), "Container");
//! ```

use std::any::Any;
use std::sync::{Arc, OnceLock};

use condforge_core::{
    Getter, Inspectable, PropertyDescriptor, PropertyValue, TypeDescriptor, Value,
};

use crate::material::Material;
use crate::point::Point3D;

macro_rules! property {
    ($owner:ty, $name:literal, $field:ident: $ty:ty) => {{
        fn get(obj: &dyn Any) -> Value<'_> {
            match obj.downcast_ref::<$owner>() {
                Some(owner) => <$ty as PropertyValue>::to_value(&owner.$field),
                None => Value::Null,
            }
        }
        PropertyDescriptor::new($name, <$ty as PropertyValue>::value_type(), get as Getter)
    }};
}

/// A creature that may own items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mobile {
    pub name: String,
    pub serial: u32,
    pub hue: i32,
}

impl Mobile {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl Inspectable for Mobile {
    fn type_descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::new::<Mobile>(
                "Mobile",
                vec![
                    property!(Mobile, "Name", name: String),
                    property!(Mobile, "Serial", serial: u32),
                    property!(Mobile, "Hue", hue: i32),
                ],
            )
        })
    }
}

/// An item holding other items.
#[derive(Clone, Debug, Default)]
pub struct Container {
    pub name: Option<String>,
    pub hue: i32,
    pub amount: u16,
    pub weight: f64,
    pub material: Material,
    pub location: Point3D,
    pub movable: bool,
    pub glyph: char,
    pub owner: Option<Arc<Mobile>>,
}

impl Container {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::unnamed()
        }
    }

    /// A container whose name is null.
    pub fn unnamed() -> Self {
        Self {
            movable: true,
            glyph: 'c',
            ..Self::default()
        }
    }

    pub fn with_hue(mut self, hue: i32) -> Self {
        self.hue = hue;
        self
    }

    pub fn with_amount(mut self, amount: u16) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn at(mut self, location: Point3D) -> Self {
        self.location = location;
        self
    }

    pub fn with_movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    pub fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    pub fn with_owner(mut self, owner: Mobile) -> Self {
        self.owner = Some(Arc::new(owner));
        self
    }

    pub fn with_shared_owner(mut self, owner: Arc<Mobile>) -> Self {
        self.owner = Some(owner);
        self
    }
}

impl Inspectable for Container {
    fn type_descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::new::<Container>(
                "Container",
                vec![
                    property!(Container, "Name", name: Option<String>),
                    property!(Container, "Hue", hue: i32),
                    property!(Container, "Amount", amount: u16),
                    property!(Container, "Weight", weight: f64),
                    property!(Container, "Material", material: Material),
                    property!(Container, "Location", location: Point3D),
                    property!(Container, "Movable", movable: bool),
                    property!(Container, "Glyph", glyph: char),
                    property!(Container, "Owner", owner: Option<Arc<Mobile>>),
                ],
            )
        })
    }
}

/// A weapon; shares some property names with [`Container`].
#[derive(Clone, Debug, Default)]
pub struct Weapon {
    pub name: Option<String>,
    pub hue: i32,
    pub damage: i64,
    pub speed: f32,
    pub serial: u64,
}

impl Weapon {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn with_hue(mut self, hue: i32) -> Self {
        self.hue = hue;
        self
    }

    pub fn with_damage(mut self, damage: i64) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

impl Inspectable for Weapon {
    fn type_descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::new::<Weapon>(
                "Weapon",
                vec![
                    property!(Weapon, "Name", name: Option<String>),
                    property!(Weapon, "Hue", hue: i32),
                    property!(Weapon, "Damage", damage: i64),
                    property!(Weapon, "Speed", speed: f32),
                    property!(Weapon, "Serial", serial: u64),
                ],
            )
        })
    }
}
