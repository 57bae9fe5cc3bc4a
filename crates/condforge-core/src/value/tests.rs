//! Tests for values and comparators.

use std::cmp::Ordering;

use super::*;

static HUE_KIND: EnumDescriptor =
    EnumDescriptor::new("HueKind", &[("Plain", 0), ("Dyed", 1), ("Rare", 5)]);

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Weight(u32);

#[derive(Debug, PartialEq)]
struct Point(i32, i32);

#[test]
fn test_enum_descriptor_lookup() {
    assert_eq!(HUE_KIND.member_by_name("dyed"), Some(1));
    assert_eq!(HUE_KIND.member_by_name("RARE"), Some(5));
    assert_eq!(HUE_KIND.member_by_name("Missing"), None);
    assert_eq!(HUE_KIND.member_name(5), Some("Rare"));
    assert_eq!(EnumValue::new(&HUE_KIND, 0).name(), Some("Plain"));
}

#[test]
fn test_value_type_classification() {
    assert!(ValueType::I32.is_primitive());
    assert!(!ValueType::Text.is_primitive());
    assert!(ValueType::Text.is_reference());
    assert!(!ValueType::Enum(&HUE_KIND).is_reference());
    assert!(!ValueType::Custom(CustomType::of::<Point>("Point")).is_ordered());
    assert!(ValueType::Custom(CustomType::ordered::<Weight>("Weight")).is_ordered());
    assert_eq!(ValueType::Text.type_id(), None);
    assert_eq!(ValueType::U16.type_id(), Some(std::any::TypeId::of::<u16>()));
}

#[test]
fn test_value_type_display() {
    assert_eq!(ValueType::I32.to_string(), "i32");
    assert_eq!(ValueType::Enum(&HUE_KIND).to_string(), "HueKind");
    assert_eq!(
        ValueType::Custom(CustomType::of::<Point>("Point")).to_string(),
        "Point"
    );
}

#[test]
fn test_comparator_selection() {
    assert!(Comparator::for_type(&ValueType::F32).is_some());
    assert!(Comparator::for_type(&ValueType::Custom(CustomType::of::<Point>("Point"))).is_none());
}

#[test]
fn test_int_comparison() {
    let cmp = Comparator::Int;
    assert_eq!(cmp.compare(&Value::Int(3), &Value::Int(5)), Ordering::Less);
    assert_eq!(cmp.compare(&Value::Int(5), &Value::Int(5)), Ordering::Equal);
}

#[test]
fn test_null_sorts_first() {
    let cmp = Comparator::Text;
    assert_eq!(cmp.compare(&Value::Null, &Value::text("a")), Ordering::Less);
    assert_eq!(cmp.compare(&Value::text("a"), &Value::Null), Ordering::Greater);
    assert_eq!(cmp.compare(&Value::Null, &Value::Null), Ordering::Equal);
}

#[test]
fn test_float_nan_ordering() {
    assert_eq!(compare_floats(f64::NAN, f64::NAN), Ordering::Equal);
    assert_eq!(compare_floats(f64::NAN, -1.0e300), Ordering::Less);
    assert_eq!(compare_floats(0.0, f64::NAN), Ordering::Greater);
    assert_eq!(compare_floats(-0.0, 0.0), Ordering::Equal);
}

#[test]
fn test_custom_comparison() {
    let custom = CustomType::ordered::<Weight>("Weight");
    let cmp = Comparator::for_type(&ValueType::Custom(custom)).unwrap();
    let light = Weight(1);
    let heavy = Weight(9);
    assert_eq!(
        cmp.compare(&Value::Custom(&light), &Value::Custom(&heavy)),
        Ordering::Less
    );

    let point = CustomType::of::<Point>("Point");
    assert!(point.values_equal(&Point(1, 2), &Point(1, 2)));
    assert!(!point.values_equal(&Point(1, 2), &Weight(1)));
    assert_eq!(point.compare(&Point(1, 2), &Point(1, 2)), None);
}

#[test]
fn test_value_accessors() {
    let v = Value::UInt(7);
    assert_eq!(v.as_u64(), Some(7));
    assert_eq!(v.as_i64(), Some(7));
    assert_eq!(Value::Int(-1).as_u64(), None);
    assert_eq!(Value::text("bag").as_str(), Some("bag"));
    assert!(Value::Null.is_null());

    let point = Point(3, 4);
    let custom = Value::Custom(&point);
    assert_eq!(custom.downcast_ref::<Point>(), Some(&Point(3, 4)));
    assert!(custom.clone().into_owned().is_none());
    assert_eq!(
        Value::text("x").into_owned().and_then(|v| v.as_str().map(str::to_owned)),
        Some("x".to_string())
    );
}

#[test]
fn test_value_display() {
    assert_eq!(Value::Enum(EnumValue::new(&HUE_KIND, 1)).to_string(), "HueKind.Dyed");
    assert_eq!(Value::Enum(EnumValue::new(&HUE_KIND, 3)).to_string(), "HueKind(3)");
    assert_eq!(Value::text("bag").to_string(), "\"bag\"");
    assert_eq!(Value::Null.to_string(), "null");
}
