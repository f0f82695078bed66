//! Boolean, string, count and enum set tests

use std::sync::Arc;

use litset_literals::{
    BooleanSet, CountSet, EnumDomain, EnumRegistry, EnumValueSet, LiteralError, StringSet,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

// ============================================================================
// Booleans
// ============================================================================

fn t() -> BooleanSet {
    BooleanSet::from_value(true)
}

fn f() -> BooleanSet {
    BooleanSet::from_value(false)
}

fn tf() -> BooleanSet {
    BooleanSet::unbounded()
}

#[rstest]
#[case(t(), t(), t())]
#[case(t(), f(), f())]
#[case(tf(), f(), f())]
#[case(tf(), t(), tf())]
#[case(tf(), tf(), tf())]
fn test_and(#[case] a: BooleanSet, #[case] b: BooleanSet, #[case] expected: BooleanSet) {
    assert_eq!(a.and(&b), expected);
    assert_eq!(b.and(&a), expected);
}

#[rstest]
#[case(f(), f(), f())]
#[case(t(), f(), t())]
#[case(tf(), t(), t())]
#[case(tf(), f(), tf())]
fn test_or(#[case] a: BooleanSet, #[case] b: BooleanSet, #[case] expected: BooleanSet) {
    assert_eq!(a.or(&b), expected);
}

#[rstest]
#[case(t(), f(), t())]
#[case(t(), t(), f())]
#[case(tf(), t(), tf())]
fn test_xor(#[case] a: BooleanSet, #[case] b: BooleanSet, #[case] expected: BooleanSet) {
    assert_eq!(a.xor(&b), expected);
}

#[rstest]
#[case(t(), f(), f())]
#[case(f(), f(), t())]
#[case(f(), t(), t())]
#[case(tf(), t(), t())]
#[case(tf(), f(), tf())]
fn test_implies(#[case] a: BooleanSet, #[case] b: BooleanSet, #[case] expected: BooleanSet) {
    assert_eq!(a.implies(&b), expected);
}

#[test]
fn test_and_all_variadic() {
    assert_eq!(BooleanSet::and_all([&t(), &t(), &tf()]), tf());
    assert_eq!(BooleanSet::and_all([&t(), &f(), &tf()]), f());
    assert_eq!(BooleanSet::or_all([&f(), &f(), &tf()]), tf());
}

#[test]
fn test_boolean_set_equality() {
    assert_eq!(BooleanSet::new([true, false]), BooleanSet::new([false, true]));
    assert_ne!(t(), tf());
    assert!(t().is_true());
    assert!(!tf().is_true());
    assert!(tf().contains(&true) && tf().contains(&false));
    assert!(t().is_subset_of(&tf()));
    assert!(!tf().is_subset_of(&f()));
}

// ============================================================================
// Strings and counts
// ============================================================================

#[test]
fn test_string_set_algebra() {
    let a = StringSet::new(["x".to_string(), "y".to_string()]);
    let b = StringSet::new(["y".to_string(), "z".to_string()]);
    assert_eq!(a.intersect(&b), StringSet::singleton("y".to_string()));
    assert_eq!(a.union(&b).len(), 3);
    assert_eq!(a.difference(&b), StringSet::singleton("x".to_string()));
    assert_eq!(
        a.symmetric_difference(&b),
        StringSet::new(["x".to_string(), "z".to_string()])
    );
}

#[test]
fn test_count_set() {
    let counts = CountSet::new([5, 3, 2, 4, 1]);
    assert_eq!(counts.min(), Some(1));
    assert_eq!(counts.max(), Some(5));
    assert_eq!(counts.any().unwrap(), 1);
    assert!(counts.contains(&3));
    assert!(!counts.contains(&6));
    assert_eq!(CountSet::empty().min(), None);
    assert!(matches!(
        counts.get_single(),
        Err(LiteralError::NotSingleton { .. })
    ));
}

#[test]
fn test_display() {
    assert_eq!(CountSet::new([2, 1]).to_string(), "{1, 2}");
    assert_eq!(tf().to_string(), "{false, true}");
}

// ============================================================================
// Enums
// ============================================================================

fn declare(registry: &mut EnumRegistry) -> Arc<EnumDomain> {
    registry
        .declare(
            "E",
            [
                ("A".to_string(), json!(1)),
                ("B".to_string(), json!(2)),
                ("C".to_string(), json!(3)),
            ],
        )
        .unwrap()
}

#[test]
fn test_enum_intersection() {
    let mut registry = EnumRegistry::new();
    let domain = declare(&mut registry);
    let x = EnumValueSet::new(Arc::clone(&domain), ["B", "C"]).unwrap();
    let y = EnumValueSet::new(Arc::clone(&domain), ["A", "B"]).unwrap();
    let z = x.intersect(&y).unwrap();

    assert_eq!(z.domain().name(), "E");
    assert!(z.contains("B"));
    assert!(!z.contains("A"));
    assert!(z.equals(&EnumValueSet::new(domain, ["B"]).unwrap()).unwrap());
    assert_eq!(z.get_single().unwrap().value, json!(2));
}

#[test]
fn test_enum_difference_and_subset() {
    let mut registry = EnumRegistry::new();
    let domain = declare(&mut registry);
    let all = EnumValueSet::unbounded(Arc::clone(&domain));
    let a = EnumValueSet::new(Arc::clone(&domain), ["A"]).unwrap();
    assert_eq!(all.difference(&a).unwrap().member_names(), vec!["B", "C"]);
    assert!(a.is_subset_of(&all).unwrap());
    assert!(!all.is_subset_of(&a).unwrap());
}

#[test]
fn test_enum_union_not_implemented() {
    let mut registry = EnumRegistry::new();
    let domain = declare(&mut registry);
    let a = EnumValueSet::new(Arc::clone(&domain), ["A"]).unwrap();
    let b = EnumValueSet::new(domain, ["B"]).unwrap();
    assert!(matches!(a.union(&b), Err(LiteralError::NotImplemented { .. })));
    assert!(matches!(
        a.symmetric_difference(&b),
        Err(LiteralError::NotImplemented { .. })
    ));
}

#[test]
fn test_enum_domains_must_match() {
    let mut registry = EnumRegistry::new();
    let e = declare(&mut registry);
    let other = registry
        .declare("F", [("A".to_string(), Value::Null)])
        .unwrap();
    let a = EnumValueSet::new(e, ["A"]).unwrap();
    let b = EnumValueSet::new(other, ["A"]).unwrap();
    assert!(matches!(a.intersect(&b), Err(LiteralError::Value { .. })));
}

#[test]
fn test_enum_any_of_empty() {
    let mut registry = EnumRegistry::new();
    let empty = EnumValueSet::empty(declare(&mut registry));
    assert!(empty.is_empty());
    assert!(empty.any().is_err());
}
