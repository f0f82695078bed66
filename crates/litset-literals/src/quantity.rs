//! Interval sets with a unit
//!
//! A [`Quantity`] stores its values in its own unit. Operations that combine
//! values of the same dimension (`add`, `subtract`, set operations,
//! comparisons) first convert the other operand into `self`'s unit, and fail
//! with [`LiteralError::UnitsNotCommensurable`] when no conversion exists.
//! `multiply`, `divide` and `pow` combine the units instead.

use std::fmt;

use litset_units::Unit;

use crate::boolean_set::BooleanSet;
use crate::error::{LiteralError, LiteralResult};
use crate::interval::Interval;
use crate::interval_set::IntervalSet;
use crate::precision::Precision;

/// Numeric literal: an [`IntervalSet`] paired with a [`Unit`]
#[derive(Debug, Clone)]
pub struct Quantity {
    values: IntervalSet,
    unit: Unit,
}

impl Quantity {
    pub fn new(values: IntervalSet, unit: Unit) -> Self {
        Self { values, unit }
    }

    pub fn dimensionless(values: IntervalSet) -> Self {
        Self::new(values, Unit::dimensionless())
    }

    pub fn from_interval(min: f64, max: f64, unit: Unit) -> LiteralResult<Self> {
        Ok(Self::new(Interval::new(min, max)?.into(), unit))
    }

    pub fn singleton(value: f64, unit: Unit) -> LiteralResult<Self> {
        Ok(Self::new(IntervalSet::singleton(value)?, unit))
    }

    pub fn discrete(values: impl IntoIterator<Item = f64>, unit: Unit) -> LiteralResult<Self> {
        Ok(Self::new(IntervalSet::discrete(values)?, unit))
    }

    pub fn empty(unit: Unit) -> Self {
        Self::new(IntervalSet::empty(), unit)
    }

    pub fn unbounded(unit: Unit) -> Self {
        Self::new(IntervalSet::unbounded(), unit)
    }

    pub fn values(&self) -> &IntervalSet {
        &self.values
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    fn with_values(&self, values: IntervalSet) -> Quantity {
        Self::new(values, self.unit.clone())
    }

    /// `other`'s values expressed in `self`'s unit
    fn convert_other(&self, other: &Quantity) -> LiteralResult<IntervalSet> {
        if !other.unit.is_commensurable_with(&self.unit) {
            return Err(LiteralError::units_not_commensurable(&self.unit, &other.unit));
        }
        let (scale, offset) = other.unit.conversion_to(&self.unit)?;
        if scale == 1.0 && offset == 0.0 {
            return Ok(other.values.clone());
        }
        Ok(other.values.affine(scale, offset))
    }

    /// Same quantity expressed in `target`
    pub fn to_unit(&self, target: &Unit) -> LiteralResult<Quantity> {
        let (scale, offset) = self.unit.conversion_to(target)?;
        Ok(Self::new(self.values.affine(scale, offset), target.clone()))
    }

    /// Same quantity expressed in the coherent SI unit of its dimension
    pub fn to_base_units(&self) -> Quantity {
        let (scale, offset) = self.unit.to_base_affine();
        Self::new(self.values.affine(scale, offset), self.unit.to_base_units())
    }

    fn without_offset(&self) -> Quantity {
        if self.unit.is_affine() {
            self.to_base_units()
        } else {
            self.clone()
        }
    }

    // ------------------------------------------------------------------
    // Predicates and accessors
    // ------------------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.values.is_singleton()
    }

    pub fn is_unbounded(&self) -> bool {
        self.values.is_unbounded()
    }

    pub fn is_finite(&self) -> bool {
        self.values.is_finite()
    }

    pub fn is_integer(&self) -> bool {
        self.values.is_integer()
    }

    /// Membership of a value expressed in this quantity's unit
    pub fn contains_value(&self, value: f64) -> bool {
        self.values.contains(value)
    }

    pub fn get_single(&self) -> LiteralResult<f64> {
        self.values.get_single()
    }

    pub fn any(&self) -> LiteralResult<f64> {
        self.values.any()
    }

    pub fn min_elem(&self) -> LiteralResult<f64> {
        self.values.min_elem()
    }

    pub fn max_elem(&self) -> LiteralResult<f64> {
        self.values.max_elem()
    }

    /// Subset test; incommensurable units are never subsets
    pub fn is_subset_of(&self, other: &Quantity) -> bool {
        self.is_subset_of_with(other, &Precision::DEFAULT)
    }

    pub fn is_subset_of_with(&self, other: &Quantity, precision: &Precision) -> bool {
        match other.convert_other(self) {
            Ok(values) => values.is_subset_of_with(&other.values, precision),
            Err(_) => false,
        }
    }

    /// Equality after conversion; incommensurable units are never equal
    pub fn equals(&self, other: &Quantity) -> bool {
        self.equals_with(other, &Precision::DEFAULT)
    }

    pub fn equals_with(&self, other: &Quantity, precision: &Precision) -> bool {
        match self.convert_other(other) {
            Ok(values) => self.values.equals_with(&values, precision),
            Err(_) => false,
        }
    }

    // ------------------------------------------------------------------
    // Operations in self's unit
    // ------------------------------------------------------------------

    pub fn add(&self, other: &Quantity) -> LiteralResult<Quantity> {
        Ok(self.with_values(self.values.add(&self.convert_other(other)?)))
    }

    pub fn subtract(&self, other: &Quantity) -> LiteralResult<Quantity> {
        Ok(self.with_values(self.values.subtract(&self.convert_other(other)?)))
    }

    pub fn intersect(&self, other: &Quantity) -> LiteralResult<Quantity> {
        Ok(self.with_values(self.values.intersect(&self.convert_other(other)?)))
    }

    pub fn union(&self, other: &Quantity) -> LiteralResult<Quantity> {
        Ok(self.with_values(self.values.union(&self.convert_other(other)?)))
    }

    pub fn difference(&self, other: &Quantity) -> LiteralResult<Quantity> {
        Ok(self.with_values(self.values.difference(&self.convert_other(other)?)))
    }

    pub fn symmetric_difference(&self, other: &Quantity) -> LiteralResult<Quantity> {
        Ok(self.with_values(
            self.values
                .symmetric_difference(&self.convert_other(other)?),
        ))
    }

    pub fn ge(&self, other: &Quantity) -> LiteralResult<BooleanSet> {
        self.ge_with(other, &Precision::DEFAULT)
    }

    pub fn gt(&self, other: &Quantity) -> LiteralResult<BooleanSet> {
        self.gt_with(other, &Precision::DEFAULT)
    }

    pub fn le(&self, other: &Quantity) -> LiteralResult<BooleanSet> {
        self.le_with(other, &Precision::DEFAULT)
    }

    pub fn lt(&self, other: &Quantity) -> LiteralResult<BooleanSet> {
        self.lt_with(other, &Precision::DEFAULT)
    }

    pub fn ge_with(&self, other: &Quantity, p: &Precision) -> LiteralResult<BooleanSet> {
        Ok(self.values.ge_with(&self.convert_other(other)?, p))
    }

    pub fn gt_with(&self, other: &Quantity, p: &Precision) -> LiteralResult<BooleanSet> {
        Ok(self.values.gt_with(&self.convert_other(other)?, p))
    }

    pub fn le_with(&self, other: &Quantity, p: &Precision) -> LiteralResult<BooleanSet> {
        Ok(self.values.le_with(&self.convert_other(other)?, p))
    }

    pub fn lt_with(&self, other: &Quantity, p: &Precision) -> LiteralResult<BooleanSet> {
        Ok(self.values.lt_with(&self.convert_other(other)?, p))
    }

    /// Element nearest to a singleton `target`
    pub fn closest_elem(&self, target: &Quantity) -> LiteralResult<Quantity> {
        if !target.is_singleton() {
            return Err(LiteralError::not_singleton(target.pretty_str()));
        }
        let value = self.convert_other(target)?.get_single()?;
        Quantity::singleton(self.values.closest_elem(value)?, self.unit.clone())
    }

    pub fn negate(&self) -> Quantity {
        self.with_values(self.values.negate())
    }

    pub fn abs(&self) -> Quantity {
        self.with_values(self.values.abs())
    }

    pub fn round(&self, ndigits: i32) -> Quantity {
        self.with_values(self.values.round(ndigits))
    }

    pub fn floor(&self) -> Quantity {
        self.with_values(self.values.floor())
    }

    pub fn ceil(&self) -> Quantity {
        self.with_values(self.values.ceil())
    }

    /// Sum of member widths, in the same unit; fails for unbounded sets
    pub fn total_span(&self) -> LiteralResult<Quantity> {
        Quantity::singleton(self.values.total_span(), self.unit.clone())
    }

    /// Size of the symmetric difference; relative mode divides by the
    /// largest magnitude of either operand and yields a dimensionless value
    pub fn deviation_to(&self, other: &Quantity, relative: bool) -> LiteralResult<Quantity> {
        let other_values = self.convert_other(other)?;
        let span = self.values.symmetric_difference(&other_values).total_span();
        if !relative {
            return Quantity::singleton(span, self.unit.clone());
        }
        let magnitude = |set: &IntervalSet| {
            set.iter()
                .map(|i| i.min().abs().max(i.max().abs()))
                .fold(0.0, f64::max)
        };
        let denominator = magnitude(&self.values).max(magnitude(&other_values));
        let deviation = if denominator == 0.0 { 0.0 } else { span / denominator };
        Quantity::singleton(deviation, Unit::dimensionless())
    }

    // ------------------------------------------------------------------
    // Operations that combine units
    // ------------------------------------------------------------------

    pub fn multiply(&self, other: &Quantity) -> Quantity {
        let (lhs, rhs) = (self.without_offset(), other.without_offset());
        Self::new(
            lhs.values.multiply(&rhs.values),
            lhs.unit.multiply(&rhs.unit),
        )
    }

    pub fn divide(&self, other: &Quantity) -> Quantity {
        let (lhs, rhs) = (self.without_offset(), other.without_offset());
        Self::new(lhs.values.divide(&rhs.values), lhs.unit.divide(&rhs.unit))
    }

    pub fn invert(&self) -> Quantity {
        let q = self.without_offset();
        Self::new(q.values.invert(), q.unit.invert())
    }

    /// `self ^ exponent` for a dimensionless exponent
    ///
    /// A non-singleton exponent needs a dimensionless base, since the result
    /// unit would otherwise be undetermined.
    pub fn pow(&self, exponent: &Quantity) -> LiteralResult<Quantity> {
        if !exponent.unit.is_dimensionless() {
            return Err(LiteralError::value(format!(
                "exponent must be dimensionless, got {}",
                exponent.unit
            )));
        }
        let exponent = exponent.to_base_units();
        let base = self.without_offset();
        match exponent.values.get_single() {
            Ok(e) => {
                let unit = base.unit.powf(e)?;
                Ok(Self::new(base.values.pow(&exponent.values)?, unit))
            }
            Err(_) if base.unit.is_dimensionless() => {
                let base = base.to_base_units();
                Ok(Self::new(base.values.pow(&exponent.values)?, base.unit))
            }
            Err(_) => Err(LiteralError::value(format!(
                "non-singleton exponent {} requires a dimensionless base, got {}",
                exponent.values, base.unit
            ))),
        }
    }

    pub fn sqrt(&self) -> LiteralResult<Quantity> {
        self.pow(&Quantity::singleton(0.5, Unit::dimensionless())?)
    }

    /// Natural logarithm (or to a singleton `base`) of a dimensionless quantity
    pub fn log(&self, base: Option<&Quantity>) -> LiteralResult<Quantity> {
        let q = self.require_dimensionless("log")?;
        let base = base
            .map(|b| b.require_dimensionless("log base"))
            .transpose()?;
        Ok(Quantity::dimensionless(
            q.values.log(base.as_ref().map(|b| &b.values))?,
        ))
    }

    pub fn sin(&self) -> LiteralResult<Quantity> {
        Ok(Quantity::dimensionless(self.require_angle("sin")?.values.sin()))
    }

    pub fn cos(&self) -> LiteralResult<Quantity> {
        Ok(Quantity::dimensionless(self.require_angle("cos")?.values.cos()))
    }

    /// Whether bit `bit` of an integral dimensionless value is set
    ///
    /// Undetermined (`{false, true}`) unless both operands are singletons;
    /// empty when either operand is. Negative values use two's complement,
    /// so bits past 63 repeat the sign bit.
    pub fn is_bit_set(&self, bit: &Quantity) -> LiteralResult<BooleanSet> {
        let value = self.require_dimensionless("is_bit_set")?;
        let bit = bit.require_dimensionless("is_bit_set bit index")?;
        if value.is_empty() || bit.is_empty() {
            return Ok(BooleanSet::empty());
        }
        let (Ok(value), Ok(bit)) = (value.get_single(), bit.get_single()) else {
            return Ok(BooleanSet::unbounded());
        };
        let value = exact_integer(value, "is_bit_set value")?;
        let bit = exact_integer(bit, "bit index")?;
        let shift = u32::try_from(bit).map_err(|_| {
            LiteralError::value(format!("bit index must not be negative, got {bit}"))
        })?;
        Ok(BooleanSet::from_value((value >> shift.min(63)) & 1 == 1))
    }

    fn require_dimensionless(&self, operation: &str) -> LiteralResult<Quantity> {
        if !self.unit.is_dimensionless() {
            return Err(LiteralError::value(format!(
                "{operation} requires a dimensionless quantity, got {}",
                self.unit
            )));
        }
        Ok(self.to_base_units())
    }

    /// Angle (or dimensionless) quantity in radians
    fn require_angle(&self, operation: &str) -> LiteralResult<Quantity> {
        if !self.unit.is_angular() && !self.unit.is_dimensionless() {
            return Err(LiteralError::value(format!(
                "{operation} requires an angle, got {}",
                self.unit
            )));
        }
        Ok(self.to_base_units())
    }

    /// Values followed by the unit symbol, e.g. `100 ± 10% Ω`
    pub fn pretty_str(&self) -> String {
        let unit = self.unit.compact_repr();
        if unit.is_empty() {
            self.values.to_string()
        } else {
            format!("{} {unit}", self.values)
        }
    }
}

fn exact_integer(value: f64, what: &str) -> LiteralResult<i64> {
    // 2^63, first magnitude outside i64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !value.is_finite() || value.fract() != 0.0 || value.abs() >= LIMIT {
        return Err(LiteralError::value(format!(
            "{what} must be an integer, got {value}"
        )));
    }
    Ok(value as i64)
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litset_units::{UnitDecoder, UnitRegistry};

    fn unit(symbol: &str) -> Unit {
        UnitRegistry::si().decode_symbol(symbol).unwrap()
    }

    #[test]
    fn test_convert_other_applies_scale() {
        let mv = Quantity::singleton(1500.0, unit("mV")).unwrap();
        let v = Quantity::singleton(1.0, unit("V")).unwrap();
        let sum = v.add(&mv).unwrap();
        assert_eq!(sum.values(), &IntervalSet::singleton(2.5).unwrap());
        assert_eq!(sum.unit(), &unit("V"));
    }

    #[test]
    fn test_incommensurable_subset_is_false() {
        let v = Quantity::singleton(1.0, unit("V")).unwrap();
        let m = Quantity::unbounded(unit("m"));
        assert!(!v.is_subset_of(&m));
        assert!(!v.equals(&m));
    }

    #[test]
    fn test_pretty_str() {
        let r = Quantity::from_interval(90.0, 110.0, unit("Ω")).unwrap();
        assert_eq!(r.pretty_str(), "100 ± 10% Ω");
        let x = Quantity::singleton(2.0, Unit::dimensionless()).unwrap();
        assert_eq!(x.pretty_str(), "[2]");
    }
}
