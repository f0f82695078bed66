//! Unit descriptors and unit algebra

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::basis::{BasisVector, Dimension};
use crate::error::{UnitError, UnitResult};

const MULTIPLIER_TOLERANCE: f64 = 1e-12;

/// A unit: dimension exponents plus the affine map to coherent SI units
///
/// A value `x` expressed in this unit equals `x * multiplier + offset` in the
/// coherent SI unit of the same basis. Only temperature scales such as `°C`
/// carry a non-zero offset.
///
/// Equality ignores the display symbol: `kΩ` and `1000·Ω` compare equal.
#[derive(Debug, Clone)]
pub struct Unit {
    basis: BasisVector,
    multiplier: f64,
    offset: f64,
    symbol: Option<String>,
}

impl Unit {
    /// Anonymous unit from its raw parts
    pub fn new(basis: BasisVector, multiplier: f64, offset: f64) -> Self {
        Self {
            basis,
            multiplier,
            offset,
            symbol: None,
        }
    }

    /// Unit with a display symbol
    pub fn named(
        symbol: impl Into<String>,
        basis: BasisVector,
        multiplier: f64,
        offset: f64,
    ) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::new(basis, multiplier, offset)
        }
    }

    pub fn dimensionless() -> Self {
        Self::new(BasisVector::ORIGIN, 1.0, 0.0)
    }

    /// Coherent SI unit of a single base dimension
    pub fn base(dimension: Dimension) -> Self {
        Self::named(dimension.symbol(), BasisVector::of(dimension), 1.0, 0.0)
    }

    pub fn basis(&self) -> &BasisVector {
        &self.basis
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Replace the display symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Same unit scaled by a prefix factor, e.g. `k` + `Ω` -> `kΩ`
    pub fn prefixed(&self, prefix: &str, factor: f64) -> Self {
        Self {
            basis: self.basis,
            multiplier: self.multiplier * factor,
            offset: self.offset,
            symbol: self.symbol.as_ref().map(|s| format!("{prefix}{s}")),
        }
    }

    pub fn is_commensurable_with(&self, other: &Unit) -> bool {
        self.basis == other.basis
    }

    pub fn is_dimensionless(&self) -> bool {
        self.basis.is_origin()
    }

    /// Plane angle units (rad, °, arcmin, ...)
    pub fn is_angular(&self) -> bool {
        self.basis == BasisVector::of(Dimension::Radian)
    }

    pub fn is_affine(&self) -> bool {
        self.offset != 0.0
    }

    /// `(scale, offset)` such that `value_in_target = scale * value_in_self + offset`
    pub fn conversion_to(&self, target: &Unit) -> UnitResult<(f64, f64)> {
        if !self.is_commensurable_with(target) {
            return Err(UnitError::not_commensurable(self, target));
        }
        let scale = self.multiplier / target.multiplier;
        let offset = (self.offset - target.offset) / target.multiplier;
        log::debug!("conversion {self} -> {target}: scale={scale}, offset={offset}");
        Ok((scale, offset))
    }

    /// `(scale, offset)` taking a value in this unit to coherent SI units
    pub fn to_base_affine(&self) -> (f64, f64) {
        (self.multiplier, self.offset)
    }

    /// `(scale, offset)` taking a coherent SI value back into this unit
    pub fn from_base_affine(&self) -> (f64, f64) {
        (1.0 / self.multiplier, -self.offset / self.multiplier)
    }

    /// The coherent SI unit with the same basis
    pub fn to_base_units(&self) -> Unit {
        Unit::new(self.basis, 1.0, 0.0)
    }

    pub fn multiply(&self, other: &Unit) -> Unit {
        Unit::new(
            self.basis.add(&other.basis),
            self.multiplier * other.multiplier,
            0.0,
        )
    }

    pub fn divide(&self, other: &Unit) -> Unit {
        Unit::new(
            self.basis.subtract(&other.basis),
            self.multiplier / other.multiplier,
            0.0,
        )
    }

    pub fn invert(&self) -> Unit {
        Unit::new(self.basis.scale(-1), 1.0 / self.multiplier, 0.0)
    }

    /// Integral power
    pub fn power(&self, exponent: i32) -> Unit {
        if exponent == 1 {
            return self.clone();
        }
        Unit::new(
            self.basis.scale(exponent),
            self.multiplier.powi(exponent),
            0.0,
        )
    }

    /// Real power; only defined when every resulting dimension exponent is integral
    pub fn powf(&self, exponent: f64) -> UnitResult<Unit> {
        if exponent.fract() == 0.0 && exponent.abs() <= f64::from(i32::MAX) {
            return Ok(self.power(exponent as i32));
        }
        let basis = self
            .basis
            .scale_fraction(exponent)
            .ok_or_else(|| UnitError::NonIntegralPower {
                unit: self.to_string(),
                exponent,
            })?;
        Ok(Unit::new(basis, self.multiplier.powf(exponent), 0.0))
    }

    /// Symbol if named, otherwise the multiplier and basis, e.g. `1000·m`
    pub fn compact_repr(&self) -> String {
        if let Some(symbol) = &self.symbol {
            return symbol.clone();
        }
        let mut out = String::new();
        if (self.multiplier - 1.0).abs() > MULTIPLIER_TOLERANCE {
            out.push_str(&format!("{}·", self.multiplier));
        }
        if self.basis.is_origin() && !out.is_empty() {
            out.pop();
        } else if !self.basis.is_origin() {
            out.push_str(&self.basis.to_string());
        }
        if self.offset != 0.0 {
            out.push_str(&format!("{:+}", self.offset));
        }
        out
    }

    /// Wire form: the symbol when known, otherwise the full unit object
    pub fn to_serialized(&self) -> SerializedUnit {
        match &self.symbol {
            Some(symbol) => SerializedUnit::Symbol(symbol.clone()),
            None => SerializedUnit::Object(UnitObject {
                basis_vector: self.basis,
                multiplier: self.multiplier,
                offset: self.offset,
            }),
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::dimensionless()
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.basis == other.basis
            && approx_eq(self.multiplier, other.multiplier)
            && approx_eq(self.offset, other.offset)
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= MULTIPLIER_TOLERANCE * a.abs().max(b.abs())
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compact_repr())
    }
}

/// Explicit unit description used when no symbol is available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitObject {
    pub basis_vector: BasisVector,
    pub multiplier: f64,
    #[serde(default)]
    pub offset: f64,
}

impl From<UnitObject> for Unit {
    fn from(object: UnitObject) -> Self {
        Unit::new(object.basis_vector, object.multiplier, object.offset)
    }
}

/// A unit as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SerializedUnit {
    Symbol(String),
    Object(UnitObject),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn celsius() -> Unit {
        Unit::named("°C", BasisVector::of(Dimension::Kelvin), 1.0, 273.15)
    }

    fn volt() -> Unit {
        let basis = BasisVector::ORIGIN
            .with(Dimension::Kilogram, 1)
            .with(Dimension::Meter, 2)
            .with(Dimension::Second, -3)
            .with(Dimension::Ampere, -1);
        Unit::named("V", basis, 1.0, 0.0)
    }

    #[test]
    fn test_conversion_celsius_to_kelvin() {
        let kelvin = Unit::base(Dimension::Kelvin);
        assert_eq!(celsius().conversion_to(&kelvin).unwrap(), (1.0, 273.15));
        assert_eq!(kelvin.conversion_to(&celsius()).unwrap(), (1.0, -273.15));
    }

    #[test]
    fn test_conversion_prefixed() {
        let meter = Unit::base(Dimension::Meter);
        let km = meter.prefixed("k", 1000.0);
        assert_eq!(km.symbol(), Some("km"));
        assert_eq!(km.conversion_to(&meter).unwrap(), (1000.0, 0.0));
    }

    #[test]
    fn test_incommensurable() {
        let err = volt().conversion_to(&Unit::base(Dimension::Meter)).unwrap_err();
        assert_eq!(err, UnitError::not_commensurable("V", "m"));
    }

    #[test]
    fn test_algebra() {
        let ampere = Unit::base(Dimension::Ampere);
        let watt = volt().multiply(&ampere);
        assert!(watt.is_commensurable_with(&Unit::new(
            BasisVector::ORIGIN
                .with(Dimension::Kilogram, 1)
                .with(Dimension::Meter, 2)
                .with(Dimension::Second, -3),
            1.0,
            0.0
        )));
        assert_eq!(watt.divide(&ampere), volt());
        assert!(volt().divide(&volt()).is_dimensionless());
        assert_eq!(volt().invert().invert(), volt());
    }

    #[test]
    fn test_powf() {
        let meter = Unit::base(Dimension::Meter);
        let area = meter.power(2);
        assert_eq!(area.powf(0.5).unwrap(), meter);
        assert!(matches!(
            meter.powf(0.5),
            Err(UnitError::NonIntegralPower { .. })
        ));
        assert!(Unit::dimensionless().powf(0.5).unwrap().is_dimensionless());
    }

    #[test]
    fn test_base_values() {
        let (scale, offset) = celsius().to_base_affine();
        assert_eq!(0.0 * scale + offset, 273.15);
        let (scale, offset) = celsius().from_base_affine();
        assert_eq!(273.15 * scale + offset, 0.0);
        assert_eq!(celsius().to_base_units(), Unit::base(Dimension::Kelvin));
    }

    #[test]
    fn test_compact_repr() {
        let mm = Unit::new(BasisVector::of(Dimension::Meter), 0.001, 0.0);
        assert_eq!(mm.compact_repr(), "0.001·m");
        assert_eq!(Unit::dimensionless().compact_repr(), "");
        assert_eq!(volt().to_string(), "V");
    }

    #[test]
    fn test_serialized_forms() {
        assert_eq!(
            serde_json::to_string(&volt().to_serialized()).unwrap(),
            r#""V""#
        );
        let anonymous = volt().multiply(&Unit::base(Dimension::Second));
        let json = serde_json::to_value(anonymous.to_serialized()).unwrap();
        assert_eq!(json["multiplier"], 1.0);
        assert_eq!(json["basis_vector"]["meter"], 2);
        let back: SerializedUnit = serde_json::from_value(json).unwrap();
        let SerializedUnit::Object(object) = back else {
            panic!("expected unit object");
        };
        assert_eq!(Unit::from(object), anonymous);
    }
}
