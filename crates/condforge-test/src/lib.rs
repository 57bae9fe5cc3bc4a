//! Shared test fixtures for CondForge crates.
//!
//! The candidate types here implement [`Inspectable`] by hand, so the
//! compiler crates can be tested without the derive macros.
//!
//! - [`items`] - `Container`, `Weapon` and `Mobile` candidates
//! - [`material`] - a field-less `Material` enumeration
//! - [`point`] - `Point3D`, a compound value type with a registered parser
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! condforge-test = { workspace = true }
//! ```
//!
//! ```
//! use condforge_test::{registry, Container};
//!
//! let bag = Container::named("Bag of Tricks").with_hue(0x3EA);
//! assert_eq!(bag.hue, 1002);
//! assert!(registry().len() > 12);
//! ```
//!
//! [`Inspectable`]: condforge_core::Inspectable

pub mod items;
pub mod material;
pub mod point;

pub use items::{Container, Mobile, Weapon};
pub use material::Material;
pub use point::Point3D;

use condforge_core::{ParserRegistry, TypeCatalog};

/// Default registry extended with a parser for [`Point3D`].
pub fn registry() -> ParserRegistry {
    let mut registry = ParserRegistry::with_defaults();
    registry.register::<Point3D, _, _>(|text: &str| text.parse::<Point3D>());
    registry
}

/// Catalog of every fixture candidate type.
pub fn catalog() -> TypeCatalog {
    TypeCatalog::new()
        .with::<Container>()
        .with::<Weapon>()
        .with::<Mobile>()
}
