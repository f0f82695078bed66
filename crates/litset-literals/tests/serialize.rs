//! JSON wire format round trips

use litset_literals::{
    BooleanSet, CountSet, DeserializeContext, EnumRegistry, EnumValueSet, IntervalSet,
    LiteralError, LiteralValue, Quantity, StringSet,
};
use litset_units::{BasisVector, Dimension, Unit, UnitDecoder, UnitRegistry};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

// ============================================================================
// Helpers
// ============================================================================

fn roundtrip(value: &LiteralValue) -> LiteralValue {
    let units = UnitRegistry::si();
    let mut enums = EnumRegistry::new();
    let mut ctx = DeserializeContext::new(&units, &mut enums);
    let json = value.to_json().unwrap();
    LiteralValue::from_json(&json, &mut ctx).unwrap()
}

fn numbers(values: &[(f64, f64)], symbol: &str) -> LiteralValue {
    let unit = UnitRegistry::si().decode_symbol(symbol).unwrap();
    Quantity::new(IntervalSet::from_values(values.iter().copied()).unwrap(), unit).into()
}

fn enum_value(names: &[&str]) -> LiteralValue {
    let mut registry = EnumRegistry::new();
    let domain = registry
        .declare(
            "Package",
            [
                ("SMD0402".to_string(), json!("0402")),
                ("SMD0603".to_string(), json!("0603")),
                ("SMD0805".to_string(), json!("0805")),
            ],
        )
        .unwrap();
    EnumValueSet::new(domain, names.iter().copied()).unwrap().into()
}

// ============================================================================
// Round trips
// ============================================================================

#[rstest]
#[case(numbers(&[(-10.0, 20.0)], "dimensionless"))]
#[case(numbers(&[(-10.5, 20.5)], "dimensionless"))]
#[case(numbers(&[(f64::NEG_INFINITY, 50.0)], "dimensionless"))]
#[case(numbers(&[(-10.0, 20.0), (30.0, 40.0)], "dimensionless"))]
#[case(numbers(&[(0.0, 1.0)], "V"))]
#[case(numbers(&[(1.0, 1.0), (4.7, 4.7)], "kΩ"))]
#[case(numbers(&[(20.0, 85.0)], "°C"))]
#[case(numbers(&[], "mA"))]
#[case(numbers(&[(1.234567, 1.234567)], "pF"))]
#[case(numbers(&[(4.7, 5.3)], "nH"))]
#[case(numbers(&[(0.5, 0.5), (3.3, 3.3)], "fF"))]
#[case(numbers(&[(1.0, 2.5)], "µs"))]
#[case(BooleanSet::from_value(true).into())]
#[case(BooleanSet::unbounded().into())]
#[case(StringSet::new(["a".to_string(), "b c".to_string()]).into())]
#[case(CountSet::new([3, 1, 2]).into())]
#[case(enum_value(&["SMD0402", "SMD0805"]))]
#[case(enum_value(&["SMD0402", "SMD0603", "SMD0805"]))]
fn test_roundtrip(#[case] value: LiteralValue) {
    let back = roundtrip(&value);
    assert_eq!(back.kind(), value.kind());
    assert!(back.equals(&value).unwrap(), "{back} != {value}");
}

#[test]
fn test_roundtrip_keeps_unit() {
    let value = numbers(&[(1.0, 2.0)], "kΩ");
    let LiteralValue::Numbers(back) = roundtrip(&value) else {
        panic!("expected numbers");
    };
    assert_eq!(back.unit().symbol(), Some("kΩ"));
    assert_eq!(back.values(), &IntervalSet::from_values([(1.0, 2.0)]).unwrap());
}

#[rstest]
#[case(1.234567, "pF")]
#[case(6.8, "nH")]
#[case(12.345678, "fF")]
fn test_roundtrip_keeps_sub_milli_digits(#[case] value: f64, #[case] symbol: &str) {
    let original = numbers(&[(value, value)], symbol);
    let LiteralValue::Numbers(back) = roundtrip(&original) else {
        panic!("expected numbers");
    };
    let single = back.get_single().unwrap();
    assert!(((single - value) / value).abs() < 1e-12, "{value} {symbol} read back as {single}");
    assert!(back.equals(&Quantity::singleton(value, back.unit().clone()).unwrap()));
}

#[test]
fn test_roundtrip_unnamed_unit() {
    let unit = Unit::new(BasisVector::of(Dimension::Meter).with(Dimension::Second, -2), 1.0, 0.0);
    let value: LiteralValue = Quantity::singleton(9.81, unit.clone()).unwrap().into();
    let LiteralValue::Numbers(back) = roundtrip(&value) else {
        panic!("expected numbers");
    };
    assert_eq!(back.unit(), &unit);
    assert_eq!(back.get_single().unwrap(), 9.81);
}

// ============================================================================
// Wire shape
// ============================================================================

#[test]
fn test_discrete_tag() {
    let value = numbers(&[(1.0, 1.0), (2.0, 2.0)], "V");
    assert_eq!(value.type_tag(), "Quantity_Set_Discrete");
    assert_eq!(value.serialize().unwrap()["type"], json!("Quantity_Set_Discrete"));
    assert_eq!(numbers(&[], "V").type_tag(), "Quantity_Interval_Disjoint");
}

#[test]
fn test_celsius_written_in_kelvin() {
    let value = numbers(&[(0.0, 0.0)], "°C");
    let wire = value.serialize().unwrap();
    assert_eq!(
        wire["data"]["intervals"]["data"]["intervals"][0]["data"],
        json!({"min": 273.15, "max": 273.15})
    );
    assert_eq!(wire["data"]["unit"], json!("°C"));
}

#[test]
fn test_unit_object_shape() {
    let unit = Unit::new(BasisVector::of(Dimension::Meter).with(Dimension::Second, -1), 2.0, 0.0);
    let value: LiteralValue = Quantity::singleton(1.0, unit).unwrap().into();
    assert_eq!(
        value.serialize().unwrap()["data"]["unit"],
        json!({"basis_vector": {"second": -1, "meter": 1}, "multiplier": 2.0, "offset": 0.0})
    );
}

#[test]
fn test_count_set_sorted() {
    let value: LiteralValue = CountSet::new([3, 1, 2]).into();
    assert_eq!(
        value.serialize().unwrap(),
        json!({"type": "CountSet", "data": {"values": [1, 2, 3]}})
    );
}

#[test]
fn test_enum_set_shape() {
    assert_eq!(
        enum_value(&["SMD0805", "SMD0402"]).serialize().unwrap(),
        json!({
            "type": "EnumSet",
            "data": {
                "elements": [{"name": "SMD0402"}, {"name": "SMD0805"}],
                "enum": {
                    "name": "Package",
                    "values": {"SMD0402": "0402", "SMD0603": "0603", "SMD0805": "0805"}
                }
            }
        })
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_unit_symbol() {
    let units = UnitRegistry::si();
    let mut enums = EnumRegistry::new();
    let mut ctx = DeserializeContext::new(&units, &mut enums);
    let payload = json!({
        "intervals": {"type": "Numeric_Interval_Disjoint", "data": {"intervals": []}},
        "unit": "furlong"
    });
    let err =
        LiteralValue::deserialize("Quantity_Interval_Disjoint", payload, &mut ctx).unwrap_err();
    assert!(matches!(err, LiteralError::Unit(_)));
}

#[test]
fn test_missing_envelope_type() {
    let units = UnitRegistry::si();
    let mut enums = EnumRegistry::new();
    let mut ctx = DeserializeContext::new(&units, &mut enums);
    let err = LiteralValue::from_json(r#"{"data": {}}"#, &mut ctx).unwrap_err();
    assert!(matches!(err, LiteralError::Value { .. }));
}

#[test]
fn test_enum_declared_on_read() {
    let units = UnitRegistry::si();
    let mut enums = EnumRegistry::new();
    let json = enum_value(&["SMD0603"]).to_json().unwrap();
    {
        let mut ctx = DeserializeContext::new(&units, &mut enums);
        LiteralValue::from_json(&json, &mut ctx).unwrap();
        LiteralValue::from_json(&json, &mut ctx).unwrap();
    }
    assert_eq!(enums.len(), 1);
    assert!(enums.get("Package").is_some());
}
