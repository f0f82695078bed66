//! Unit-aware quantity tests

use litset_literals::{BooleanSet, IntervalSet, LiteralError, Quantity};
use litset_units::{Unit, UnitDecoder, UnitRegistry};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ============================================================================
// Helpers
// ============================================================================

fn unit(symbol: &str) -> Unit {
    UnitRegistry::si().decode_symbol(symbol).unwrap()
}

fn q(min: f64, max: f64, symbol: &str) -> Quantity {
    Quantity::from_interval(min, max, unit(symbol)).unwrap()
}

fn single(value: f64, symbol: &str) -> Quantity {
    Quantity::singleton(value, unit(symbol)).unwrap()
}

fn dimensionless(min: f64, max: f64) -> Quantity {
    Quantity::from_interval(min, max, Unit::dimensionless()).unwrap()
}

// ============================================================================
// Units
// ============================================================================

#[test]
fn test_unit_kept_through_addition() {
    assert_eq!(q(0.0, 1.0, "V").add(&q(2.0, 3.0, "V")).unwrap(), q(2.0, 4.0, "V"));
    assert_eq!(
        q(0.0, 1.0, "V").subtract(&q(2.0, 3.0, "V")).unwrap(),
        q(-3.0, -1.0, "V")
    );
}

#[test]
fn test_addition_converts_to_self_unit() {
    let sum = single(1.0, "V").add(&single(250.0, "mV")).unwrap();
    assert_eq!(sum.unit(), &unit("V"));
    assert_eq!(sum.get_single().unwrap(), 1.25);
}

#[test]
fn test_celsius_plus_kelvin() {
    let kelvin = single(0.0, "K");
    let celsius = single(0.0, "°C");
    let sum = kelvin.add(&celsius).unwrap().round(2);
    assert_eq!(sum, single(273.15, "K"));
    assert_eq!(sum.pretty_str(), "[273.15] K");
}

#[test]
fn test_incommensurable_units() {
    let err = q(0.0, 1.0, "V").add(&q(0.0, 1.0, "A")).unwrap_err();
    assert!(matches!(err, LiteralError::UnitsNotCommensurable { .. }));
    assert!(q(0.0, 1.0, "V").ge(&q(0.0, 1.0, "s")).is_err());
    assert!(!q(0.0, 1.0, "V").is_subset_of(&q(0.0, 1.0, "A")));
    assert!(!q(0.0, 1.0, "V").equals(&q(0.0, 1.0, "A")));
}

#[test]
fn test_multiplication_combines_units() {
    assert_eq!(q(0.0, 2.0, "V").multiply(&q(2.0, 3.0, "A")), q(0.0, 6.0, "W"));
}

#[test]
fn test_division_combines_units() {
    assert_eq!(q(0.0, 1.0, "V").divide(&q(2.0, 3.0, "A")), q(0.0, 0.5, "Ω"));
}

#[test]
fn test_invert_unit() {
    let inverted = q(1.0, 2.0, "V").invert();
    assert_eq!(inverted.unit(), &unit("V").invert());
    assert_eq!(inverted.values(), &IntervalSet::from_values([(0.5, 1.0)]).unwrap());
}

#[test]
fn test_multiply_affine_unit_uses_kelvin() {
    let product = single(0.0, "°C").multiply(&dimensionless(2.0, 2.0));
    assert_eq!(product, single(546.3, "K"));
}

#[test]
fn test_subset_across_prefixes() {
    assert!(q(100.0, 200.0, "mV").is_subset_of(&q(0.0, 1.0, "V")));
    assert!(!q(100.0, 2000.0, "mV").is_subset_of(&q(0.0, 1.0, "V")));
    assert!(single(1000.0, "mV").equals(&single(1.0, "V")));
}

#[test]
fn test_regression_femto_rounding() {
    let x = Quantity::discrete([2.77e-17], Unit::dimensionless()).unwrap();
    let y = dimensionless(f64::NEG_INFINITY, 0.0);
    assert!(x.is_subset_of(&y));
}

// ============================================================================
// Powers and functions
// ============================================================================

#[test]
fn test_pow_singleton_exponent() {
    let squared = q(1.0, 3.0, "m").pow(&dimensionless(2.0, 2.0)).unwrap();
    assert_eq!(squared, Quantity::from_interval(1.0, 9.0, unit("m").power(2)).unwrap());
}

#[test]
fn test_sqrt() {
    let root = Quantity::from_interval(4.0, 9.0, unit("m").power(2)).unwrap().sqrt().unwrap();
    assert_eq!(root, q(2.0, 3.0, "m"));
}

#[test]
fn test_pow_rejects_dimensioned_exponent() {
    assert!(q(1.0, 2.0, "m").pow(&single(2.0, "s")).is_err());
    assert!(q(1.0, 2.0, "m").pow(&dimensionless(2.0, 3.0)).is_err());
    assert!(dimensionless(1.0, 2.0).pow(&dimensionless(2.0, 3.0)).is_ok());
}

#[test]
fn test_log_requires_dimensionless() {
    assert!(matches!(
        q(1.0, 2.0, "V").log(None),
        Err(LiteralError::Value { .. })
    ));
    let ten = Quantity::singleton(10.0, Unit::dimensionless()).unwrap();
    assert_eq!(dimensionless(10.0, 1000.0).log(Some(&ten)).unwrap(), dimensionless(1.0, 3.0));
}

#[test]
fn test_sin_of_degrees() {
    let s = single(90.0, "°").sin().unwrap();
    assert_eq!(s, Quantity::singleton(1.0, Unit::dimensionless()).unwrap());
    assert!(single(1.0, "m").sin().is_err());
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn test_closest_elem_in_own_unit() {
    let x = q(1.0, 2.0, "V");
    assert_eq!(x.closest_elem(&single(2500.0, "mV")).unwrap(), single(2.0, "V"));
    assert!(matches!(
        x.closest_elem(&q(0.0, 1.0, "V")),
        Err(LiteralError::NotSingleton { .. })
    ));
}

#[test]
fn test_total_span() {
    let x = Quantity::new(
        IntervalSet::from_values([(0.0, 1.0), (2.0, 3.0)]).unwrap(),
        unit("V"),
    );
    assert_eq!(x.total_span().unwrap(), single(2.0, "V"));
    assert!(q(0.0, f64::INFINITY, "V").total_span().is_err());
}

#[rstest]
#[case(false, 1.0)]
#[case(true, 0.25)]
fn test_deviation(#[case] relative: bool, #[case] expected: f64) {
    let deviation = q(0.0, 4.0, "V").deviation_to(&q(0.0, 3.0, "V"), relative).unwrap();
    assert_eq!(deviation.get_single().unwrap(), expected);
}

#[test]
fn test_is_bit_set() {
    let register = dimensionless(6.0, 6.0);
    assert!(register.is_bit_set(&dimensionless(1.0, 1.0)).unwrap().is_true());
    assert!(register.is_bit_set(&dimensionless(0.0, 0.0)).unwrap().is_false());
    assert_eq!(
        register.is_bit_set(&dimensionless(0.0, 2.0)).unwrap(),
        BooleanSet::unbounded()
    );
    let empty = Quantity::empty(Unit::dimensionless());
    assert!(empty.is_bit_set(&dimensionless(0.0, 0.0)).unwrap().is_empty());
}

#[test]
fn test_comparison_with_units() {
    assert_eq!(
        q(1.0, 2.0, "V").ge(&q(0.0, 1.0, "V")).unwrap(),
        BooleanSet::from_value(true)
    );
    assert_eq!(
        q(1.0, 2.0, "V").ge(&q(2500.0, 3000.0, "mV")).unwrap(),
        BooleanSet::from_value(false)
    );
    assert_eq!(
        q(1.0, 2.0, "V").le(&q(0.0, 1.0, "V")).unwrap(),
        BooleanSet::unbounded()
    );
}

#[test]
fn test_pretty_str() {
    assert_eq!(q(90.0, 110.0, "kΩ").pretty_str(), "100 ± 10% kΩ");
    assert_eq!(dimensionless(1.0, 1.0).pretty_str(), "[1]");
}
