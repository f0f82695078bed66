//! Symbol decoding tests for the SI registry

use litset_units::{Dimension, Unit, UnitDecoder, UnitError, UnitRegistry};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ============================================================================
// Helpers
// ============================================================================

fn registry() -> UnitRegistry {
    UnitRegistry::si()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-12 * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Decoding
// ============================================================================

#[rstest]
#[case("V", 1.0)]
#[case("mV", 1e-3)]
#[case("kΩ", 1e3)]
#[case("MOhm", 1e6)]
#[case("µF", 1e-6)]
#[case("uF", 1e-6)]
#[case("pF", 1e-12)]
#[case("GHz", 1e9)]
#[case("mm", 1e-3)]
#[case("mg", 1e-6)]
#[case("kg", 1.0)]
#[case("KiB", 8.0 * 1024.0)]
#[case("kbit", 1e3)]
#[case("%", 1e-2)]
#[case("hour", 3600.0)]
fn test_decode_multiplier(#[case] symbol: &str, #[case] multiplier: f64) {
    let unit = registry().decode_symbol(symbol).unwrap();
    assert_close(unit.multiplier(), multiplier);
    assert_eq!(unit.symbol(), Some(symbol));
}

#[rstest]
#[case("furlong")]
#[case("kkg")]
#[case("")]
#[case("xV")]
fn test_decode_unknown(#[case] symbol: &str) {
    assert_eq!(
        registry().decode_symbol(symbol),
        Err(UnitError::unknown_symbol(symbol))
    );
}

#[test]
fn test_prefixed_units_are_commensurable() {
    let r = registry();
    let mv = r.decode_symbol("mV").unwrap();
    let kv = r.decode_symbol("kV").unwrap();
    assert!(mv.is_commensurable_with(&kv));
    let (scale, offset) = kv.conversion_to(&mv).unwrap();
    assert_close(scale, 1e6);
    assert_eq!(offset, 0.0);
}

#[test]
fn test_temperature_offsets() {
    let r = registry();
    let celsius = r.decode_symbol("°C").unwrap();
    let kelvin = r.decode_symbol("K").unwrap();
    assert!(celsius.is_affine());
    assert_eq!(celsius.conversion_to(&kelvin).unwrap(), (1.0, 273.15));
}

#[test]
fn test_angles() {
    let r = registry();
    let degree = r.decode_symbol("deg").unwrap();
    assert!(degree.is_angular());
    let (scale, offset) = degree.to_base_affine();
    assert_close(180.0 * scale + offset, std::f64::consts::PI);
    assert_eq!(degree.to_base_units(), Unit::base(Dimension::Radian));
}

#[test]
fn test_derived_units() {
    let r = registry();
    let volt = r.get("V").unwrap();
    let ohm = r.get("Ω").unwrap();
    let ampere = volt.divide(ohm);
    assert_eq!(ampere, Unit::base(Dimension::Ampere));

    let farad = r.get("F").unwrap();
    let second = ohm.multiply(farad);
    assert_eq!(second, Unit::base(Dimension::Second));
}
