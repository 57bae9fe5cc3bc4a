//! End-to-end tests for compiled predicates.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use condforge_config::PredicateConfig;
use condforge_core::{
    ComparisonOperator, ConfigurationError, Getter, Inspectable, Property, PropertyDescriptor,
    PropertyValue, StringOperator, TypeDescriptor, Value,
};
use condforge_test::{catalog, registry, Container, Material, Mobile, Point3D, Weapon};

use super::*;

fn container_prop(path: &str) -> Property {
    Property::of::<Container>(path).unwrap()
}

fn bag_filter() -> Vec<Condition> {
    vec![
        TypeCondition::DEFAULT.into(),
        StringCondition::new(container_prop("Name"), StringOperator::Contains, "bag")
            .with_ignore_case(true)
            .into(),
    ]
}

#[test]
fn test_container_name_contains_bag() {
    let predicate = compile(Container::type_descriptor(), &bag_filter()).unwrap();

    assert!(predicate.verify(&Container::named("Bag of Tricks")));
    assert!(!predicate.verify(&Container::named("Sword")));
    assert!(!predicate.verify(&Weapon::named("Bag of Tricks")));
    assert!(!predicate.verify(&Container::unnamed()));
}

#[test]
fn test_hue_greater_equal_negated() {
    let predicate = compile(
        Container::type_descriptor(),
        &[ComparisonCondition::new(
            container_prop("Hue"),
            ComparisonOperator::GreaterEqual,
            "100",
        )
        .negate(true)
        .into()],
    )
    .unwrap();

    assert!(predicate.verify(&Container::named("x").with_hue(50)));
    assert!(!predicate.verify(&Container::named("x").with_hue(150)));
    assert!(!predicate.verify(&Container::named("x").with_hue(100)));
}

#[test]
fn test_hex_literal() {
    let predicate = compile(
        Container::type_descriptor(),
        &[ComparisonCondition::new(container_prop("Hue"), ComparisonOperator::Equal, "0x3EA").into()],
    )
    .unwrap();

    assert!(predicate.verify(&Container::named("x").with_hue(1002)));
    assert!(!predicate.verify(&Container::named("x").with_hue(1)));
}

#[test]
fn test_null_literal_on_reference_property() {
    let predicate = compile(
        Container::type_descriptor(),
        &[StringCondition::new(container_prop("Name"), StringOperator::Equal, "null").into()],
    )
    .unwrap();

    assert!(predicate.verify(&Container::unnamed()));
    assert!(!predicate.verify(&Container::named("Bag")));
}

#[test]
fn test_empty_list_accepts_everything() {
    let predicate = compile(Container::type_descriptor(), &[]).unwrap();
    assert!(predicate.is_empty());
    assert!(predicate.verify(&Container::unnamed()));
    assert!(predicate.verify(&Weapon::named("Sword")));
    assert_eq!(predicate.to_string(), "Container where true");
}

#[test]
fn test_failed_narrowing_without_guard() {
    let predicate = compile(
        Container::type_descriptor(),
        &[ComparisonCondition::new(container_prop("Hue"), ComparisonOperator::Equal, "0")
            .negate(true)
            .into()],
    )
    .unwrap();
    assert!(!predicate.verify(&Weapon::named("Sword").with_hue(5)));
    assert!(predicate.verify(&Container::named("x").with_hue(5)));
}

#[test]
fn test_type_guard_is_prepended_once() {
    let compiler = PredicateCompiler::new().with_type_guard(true);

    let hue: [Condition; 1] =
        [ComparisonCondition::new(container_prop("Hue"), ComparisonOperator::Lesser, "10").into()];
    let guarded = compiler.compile_for::<Container>(&hue).unwrap();
    assert_eq!(guarded.len(), 2);
    assert_eq!(guarded.conditions()[0].label(), "is target type");

    let already = compiler.compile_for::<Container>(&bag_filter()).unwrap();
    assert_eq!(already.len(), 2);
}

#[test]
fn test_compile_error_names_condition() {
    let conditions: Vec<Condition> = vec![
        TypeCondition::DEFAULT.into(),
        ComparisonCondition::new(container_prop("Hue"), ComparisonOperator::Equal, "bag").into(),
    ];
    let err = compile(Container::type_descriptor(), &conditions).unwrap_err();

    assert!(matches!(err, ConfigurationError::Condition { index: 1, .. }));
    assert!(matches!(err.root(), ConfigurationError::Conversion { .. }));
    let message = err.to_string();
    assert!(message.starts_with("condition 1: "), "{}", message);
    assert!(message.contains("\"bag\""), "{}", message);
    assert!(message.contains("i32"), "{}", message);
}

#[test]
fn test_relational_on_unordered_type_produces_no_predicate() {
    let location = || container_prop("Location");
    let greater: [Condition; 1] =
        [ComparisonCondition::new(location(), ComparisonOperator::Greater, "(0, 0, 0)").into()];

    let err = PredicateCompiler::with_registry(registry())
        .compile_for::<Container>(&greater)
        .unwrap_err();
    assert!(matches!(err.root(), ConfigurationError::NotOrdered { .. }));
    assert!(err.root().to_string().contains("relational"), "{}", err);

    // Without a parser the ordering error still wins.
    let err = compile(Container::type_descriptor(), &greater).unwrap_err();
    assert!(matches!(err.root(), ConfigurationError::NotOrdered { .. }));

    let equal: [Condition; 1] =
        [ComparisonCondition::new(location(), ComparisonOperator::Equal, "(0, 0, 0)").into()];
    let err = compile(Container::type_descriptor(), &equal).unwrap_err();
    assert!(matches!(err.root(), ConfigurationError::NoParser { .. }));
    assert!(PredicateCompiler::with_registry(registry())
        .compile_for::<Container>(&equal)
        .is_ok());
}

#[test]
fn test_foreign_property_is_rejected() {
    let weapon_hue = Property::of::<Weapon>("Hue").unwrap();
    let err = compile(
        Container::type_descriptor(),
        &[ComparisonCondition::new(weapon_hue, ComparisonOperator::Equal, "1").into()],
    )
    .unwrap_err();
    assert!(matches!(err.root(), ConfigurationError::ForeignProperty { .. }));
}

#[test]
fn test_select_preserves_order() {
    let containers: Vec<Container> = (0..200)
        .map(|i| Container::named(if i % 3 == 0 { "Bag" } else { "Box" }).with_hue(i))
        .collect();
    let predicate = compile(Container::type_descriptor(), &bag_filter()).unwrap();

    let sequential = predicate.select(&containers);
    let parallel = predicate.par_select(&containers);
    assert_eq!(sequential.len(), 67);
    let hues: Vec<i32> = sequential.iter().map(|c| c.hue).collect();
    let par_hues: Vec<i32> = parallel.iter().map(|c| c.hue).collect();
    assert_eq!(hues, par_hues);
}

#[test]
fn test_heterogeneous_population() {
    let population: Vec<Box<dyn Any + Send + Sync>> = vec![
        Box::new(Container::named("Bag of Holding")),
        Box::new(Weapon::named("Bag Sword")),
        Box::new(Mobile::named("Bag Man")),
        Box::new(Container::named("Crate")),
    ];
    let predicate = compile(Container::type_descriptor(), &bag_filter()).unwrap();
    let matches = population
        .iter()
        .filter(|candidate| predicate.verify(&***candidate))
        .count();
    assert_eq!(matches, 1);
}

#[test]
fn test_concurrent_verify() {
    let predicate = Arc::new(compile(Container::type_descriptor(), &bag_filter()).unwrap());
    let bag = Container::named("Bag of Tricks");
    let sword = Container::named("Sword");

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let predicate = Arc::clone(&predicate);
            let (bag, sword) = (&bag, &sword);
            scope.spawn(move || {
                for _ in 0..1_000 {
                    assert!(predicate.verify(bag));
                    assert!(!predicate.verify(sword));
                }
            });
        }
    });
}

#[test]
fn test_compiled_predicate_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CompiledPredicate>();
    assert_send_sync::<PredicateCache>();
}

// Counts reads so evaluation order is observable.
static PROBE_READS: AtomicUsize = AtomicUsize::new(0);

struct Probe {
    open: bool,
    value: i32,
}

impl Inspectable for Probe {
    fn type_descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            fn open(obj: &dyn Any) -> Value<'_> {
                obj.downcast_ref::<Probe>()
                    .map_or(Value::Null, |p| Value::Bool(p.open))
            }
            fn value(obj: &dyn Any) -> Value<'_> {
                PROBE_READS.fetch_add(1, Ordering::SeqCst);
                obj.downcast_ref::<Probe>()
                    .map_or(Value::Null, |p| Value::Int(p.value.into()))
            }
            TypeDescriptor::new::<Probe>(
                "Probe",
                vec![
                    PropertyDescriptor::new("Open", bool::value_type(), open as Getter),
                    PropertyDescriptor::new("Value", i32::value_type(), value as Getter),
                ],
            )
        })
    }
}

#[test]
fn test_short_circuit() {
    let predicate = PredicateCompiler::new()
        .compile_for::<Probe>(&[
            ComparisonCondition::new(
                Property::of::<Probe>("Open").unwrap(),
                ComparisonOperator::Equal,
                "true",
            )
            .into(),
            ComparisonCondition::new(
                Property::of::<Probe>("Value").unwrap(),
                ComparisonOperator::Equal,
                "7",
            )
            .into(),
        ])
        .unwrap();

    PROBE_READS.store(0, Ordering::SeqCst);
    assert!(!predicate.verify(&Probe {
        open: false,
        value: 7
    }));
    assert_eq!(PROBE_READS.load(Ordering::SeqCst), 0);

    assert!(predicate.verify(&Probe {
        open: true,
        value: 7
    }));
    assert_eq!(PROBE_READS.load(Ordering::SeqCst), 1);
}

fn random_condition(rng: &mut ChaCha8Rng) -> Condition {
    const NAMES: [&str; 5] = ["bag", "Bag", "null", "box", "@\"null\""];
    let not = rng.random_bool(0.5);
    match rng.random_range(0..4) {
        0 => TypeCondition::new(not).into(),
        1 => {
            let mut operator = StringOperator::ALL[rng.random_range(0..StringOperator::ALL.len())];
            let name = NAMES[rng.random_range(0..NAMES.len())];
            if name == "null" && operator.is_substring() {
                operator = StringOperator::Equal;
            }
            StringCondition::new(container_prop("Name"), operator, name)
                .with_ignore_case(rng.random_bool(0.5))
                .negate(not)
                .into()
        }
        2 => {
            let operator =
                ComparisonOperator::ALL[rng.random_range(0..ComparisonOperator::ALL.len())];
            let hue = rng.random_range(-3..=3);
            ComparisonCondition::new(container_prop("Hue"), operator, hue.to_string())
                .negate(not)
                .into()
        }
        _ => {
            let operator =
                ComparisonOperator::ALL[rng.random_range(0..ComparisonOperator::ALL.len())];
            let material = ["Iron", "wood", "LEATHER", "5"][rng.random_range(0..4)];
            ComparisonCondition::new(container_prop("Material"), operator, material)
                .negate(not)
                .into()
        }
    }
}

fn random_candidate(rng: &mut ChaCha8Rng) -> Box<dyn Any + Send + Sync> {
    if rng.random_bool(0.1) {
        return Box::new(Weapon::named("bag"));
    }
    let names = [None, Some("bag"), Some("Bag of Tricks"), Some("Box"), Some("null")];
    let name = names[rng.random_range(0..names.len())];
    let materials = [Material::Iron, Material::Wood, Material::Leather, Material::Cloth];
    let container = match name {
        Some(name) => Container::named(name),
        None => Container::unnamed(),
    };
    Box::new(
        container
            .with_hue(rng.random_range(-3..=3))
            .with_material(materials[rng.random_range(0..materials.len())]),
    )
}

#[test]
fn test_verify_is_and_of_conditions() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x3EA);
    let compiler = PredicateCompiler::new();
    let resolver = compiler.resolver();

    for _ in 0..200 {
        let count = rng.random_range(0..5);
        let conditions: Vec<Condition> = (0..count).map(|_| random_condition(&mut rng)).collect();
        let predicate = compiler.compile_for::<Container>(&conditions).unwrap();
        let individual: Vec<PreparedCondition> = conditions
            .iter()
            .map(|c| c.prepare(resolver).unwrap())
            .collect();

        for _ in 0..20 {
            let candidate = random_candidate(&mut rng);
            let narrowed = Container::type_descriptor().narrow(&*candidate);
            let expected = individual.iter().all(|c| c.evaluate(narrowed));
            let first = predicate.verify(&*candidate);
            assert_eq!(first, expected, "{}", predicate);
            assert_eq!(predicate.verify(&*candidate), first);
        }
    }
}

#[test]
fn test_cache_shares_predicates() {
    let cache = PredicateCache::default();
    let first = cache
        .get_or_compile(Container::type_descriptor(), &bag_filter())
        .unwrap();
    let second = cache
        .get_or_compile(Container::type_descriptor(), &bag_filter())
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    let bad: [Condition; 1] =
        [ComparisonCondition::new(container_prop("Hue"), ComparisonOperator::Equal, "x").into()];
    assert!(cache
        .get_or_compile(Container::type_descriptor(), &bad)
        .is_err());
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_cache_concurrent_misses() {
    let cache = PredicateCache::new(PredicateCompiler::with_registry(registry()));
    let predicates: Vec<Arc<CompiledPredicate>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    cache
                        .get_or_compile(Container::type_descriptor(), &bag_filter())
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(predicates.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(cache.len(), 1);
    assert!(cache
        .compiler()
        .resolver()
        .registry()
        .contains(std::any::TypeId::of::<Point3D>()));
}

#[test]
fn test_compile_config() {
    let config = PredicateConfig::from_toml_str(
        r#"
        target = "container"
        type_guard = true

        [[conditions]]
        kind = "string"
        property = "name"
        operator = "contains"
        value = "bag"
        ignore_case = true

        [[conditions]]
        kind = "comparison"
        property = "Hue"
        operator = ">="
        value = "100"
        negate = true
        "#,
    )
    .unwrap();

    let predicate = PredicateCompiler::new()
        .compile_config(&config, &catalog())
        .unwrap();
    assert_eq!(predicate.len(), 3);
    assert!(predicate.verify(&Container::named("Bag").with_hue(50)));
    assert!(!predicate.verify(&Container::named("Bag").with_hue(150)));
    assert!(!predicate.verify(&Weapon::named("Bag")));
}

#[test]
fn test_compile_config_typed_values() {
    let config = PredicateConfig::from_yaml_str(
        r#"
        target: Container
        conditions:
          - kind: comparison
            property: Owner.Serial
            operator: eq
            value: 7
          - kind: comparison
            property: Weight
            operator: "<"
            value: 2.5
        "#,
    )
    .unwrap();

    let predicate = PredicateCompiler::new()
        .compile_config(&config, &catalog())
        .unwrap();
    let owner = Mobile {
        serial: 7,
        ..Mobile::named("Lord British")
    };
    assert!(predicate.verify(&Container::named("x").with_owner(owner).with_weight(1.0)));
    assert!(!predicate.verify(&Container::named("x").with_weight(1.0)));
}

#[test]
fn test_compile_config_errors() {
    let catalog = catalog();
    let compiler = PredicateCompiler::new();

    let unknown_type = PredicateConfig::from_toml_str(r#"target = "Dragon""#).unwrap();
    assert!(matches!(
        compiler.compile_config(&unknown_type, &catalog),
        Err(ConfigurationError::UnknownType(_))
    ));

    let unknown_operator = PredicateConfig::from_toml_str(
        r#"
        target = "Weapon"

        [[conditions]]
        kind = "comparison"
        property = "Damage"
        operator = "<=>"
        value = 3
        "#,
    )
    .unwrap();
    let err = compiler
        .compile_config(&unknown_operator, &catalog)
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::Condition { index: 0, .. }));
    assert!(matches!(err.root(), ConfigurationError::UnknownOperator(op) if op == "<=>"));

    let unknown_property = PredicateConfig::from_toml_str(
        r#"
        target = "Weapon"

        [[conditions]]
        kind = "type"

        [[conditions]]
        kind = "string"
        property = "Owner.Name"
        operator = "=="
        value = "x"
        "#,
    )
    .unwrap();
    let err = compiler
        .compile_config(&unknown_property, &catalog)
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::Condition { index: 1, .. }));
    assert!(matches!(err.root(), ConfigurationError::UnknownProperty { .. }));
}

#[cfg(feature = "decimal")]
mod decimal {
    use std::any::Any;
    use std::sync::OnceLock;

    use condforge_core::{
        ComparisonOperator, Decimal, Getter, Inspectable, Property, PropertyDescriptor,
        PropertyValue, TypeDescriptor, Value,
    };

    use crate::{compile, ComparisonCondition, Condition};

    struct Ingot {
        weight: Decimal,
    }

    impl Inspectable for Ingot {
        fn type_descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                fn weight(obj: &dyn Any) -> Value<'_> {
                    obj.downcast_ref::<Ingot>()
                        .map_or(Value::Null, |ingot| ingot.weight.to_value())
                }
                TypeDescriptor::new::<Ingot>(
                    "Ingot",
                    vec![PropertyDescriptor::new(
                        "Weight",
                        Decimal::value_type(),
                        weight as Getter,
                    )],
                )
            })
        }
    }

    fn ingot(weight: &str) -> Ingot {
        Ingot {
            weight: weight.parse().unwrap(),
        }
    }

    #[test]
    fn test_decimal_weight_range() {
        let weight = || Property::of::<Ingot>("Weight").unwrap();
        let conditions: [Condition; 2] = [
            ComparisonCondition::new(weight(), ComparisonOperator::GreaterEqual, "1.5").into(),
            ComparisonCondition::new(weight(), ComparisonOperator::Lesser, "2.25")
                .negate(true)
                .into(),
        ];
        let predicate = compile(Ingot::type_descriptor(), &conditions).unwrap();

        assert!(predicate.verify(&ingot("2.25")));
        assert!(predicate.verify(&ingot("3")));
        assert!(!predicate.verify(&ingot("2.0")));
        assert!(!predicate.verify(&ingot("1.4999")));
    }

    #[test]
    fn test_decimal_literal_must_parse() {
        let weight = Property::of::<Ingot>("Weight").unwrap();
        let err = compile(
            Ingot::type_descriptor(),
            &[ComparisonCondition::new(weight, ComparisonOperator::Equal, "heavy").into()],
        )
        .unwrap_err();
        assert!(err.to_string().contains("Decimal"), "{}", err);
    }
}
