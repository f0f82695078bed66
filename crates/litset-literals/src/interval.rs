//! Closed scalar intervals
//!
//! Implements: add, negate, subtract, multiply, invert, divide, pow,
//! intersect, difference, round, floor, ceil, abs, log, sin, maybe_merge
//! and the scalar predicates.
//!
//! Operations whose result may be disjoint (`invert`, `divide`, `pow`,
//! `intersect`, `difference`) return an [`IntervalSet`].

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use smallvec::{SmallVec, smallvec};

use crate::error::{LiteralError, LiteralResult};
use crate::interval_set::IntervalSet;
use crate::precision::{Precision, cancel_noise, rel_round, round_stored};

/// Beyond `2^53` turning-point indices no longer fit the float grid
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Closed interval `[min, max]` over the extended reals
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    min: f64,
    max: f64,
}

impl Interval {
    /// Create an interval, rejecting NaN, `min > max`, `min = +inf` and `max = -inf`
    ///
    /// Bounds are rounded to their stored form before they are ordered, so
    /// `new(0.1 + 0.2, 0.3)` is the singleton `[0.3]`.
    pub fn new(min: f64, max: f64) -> LiteralResult<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(LiteralError::invalid_interval("bounds must not be NaN"));
        }
        let (min, max) = (round_stored(min), round_stored(max));
        if min > max {
            return Err(LiteralError::invalid_interval(format!(
                "min {min} exceeds max {max}"
            )));
        }
        if min == f64::INFINITY {
            return Err(LiteralError::invalid_interval("min must not be +inf"));
        }
        if max == f64::NEG_INFINITY {
            return Err(LiteralError::invalid_interval("max must not be -inf"));
        }
        Ok(Self::from_bounds(min, max))
    }

    /// `[value, value]`
    pub fn singleton(value: f64) -> LiteralResult<Self> {
        Self::new(value, value)
    }

    /// `(-inf, inf)`
    pub const fn unbounded() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    /// Bounds already known to be ordered and NaN-free
    pub(crate) fn from_bounds(min: f64, max: f64) -> Self {
        debug_assert!(!min.is_nan() && !max.is_nan(), "NaN bound");
        debug_assert!(min <= max, "unordered bounds [{min}, {max}]");
        Self {
            min: round_stored(min),
            max: round_stored(max),
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_singleton(&self) -> bool {
        self.min == self.max
    }

    /// Singleton holding an integral value
    pub fn is_integer(&self) -> bool {
        self.is_singleton() && self.min.is_finite() && self.min.fract() == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    pub fn is_unbounded(&self) -> bool {
        self.min == f64::NEG_INFINITY && self.max == f64::INFINITY
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_subset_of(&self, other: &Interval) -> bool {
        self.is_subset_of_with(other, &Precision::DEFAULT)
    }

    pub fn is_subset_of_with(&self, other: &Interval, precision: &Precision) -> bool {
        precision.approx_ge(self.min, other.min) && precision.approx_le(self.max, other.max)
    }

    pub fn equals_with(&self, other: &Interval, precision: &Precision) -> bool {
        precision.approx_eq(self.min, other.min) && precision.approx_eq(self.max, other.max)
    }

    /// Center and relative half-width, `(c, r)` with the interval `c ± c·r`
    ///
    /// Singletons give `r = 0`; unbounded intervals and intervals centered on
    /// zero give `r = inf`.
    pub fn as_center_rel(&self) -> (f64, f64) {
        if self.is_singleton() {
            return (self.min, 0.0);
        }
        if !self.is_finite() {
            return (self.min, f64::INFINITY);
        }
        let center = (self.min + self.max) / 2.0;
        if center == 0.0 {
            return (center, f64::INFINITY);
        }
        (center, ((self.max - self.min) / 2.0 / center).abs())
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    pub fn add(&self, other: &Interval) -> Interval {
        Self::from_bounds(
            cancel_noise(self.min, other.min),
            cancel_noise(self.max, other.max),
        )
    }

    pub fn negate(&self) -> Interval {
        Self::from_bounds(-self.max, -self.min)
    }

    pub fn subtract(&self, other: &Interval) -> Interval {
        self.add(&other.negate())
    }

    /// Four-corner product with `0 * ±inf = 0`
    pub fn multiply(&self, other: &Interval) -> Interval {
        let corners = [
            guarded_mul(self.min, other.min),
            guarded_mul(self.min, other.max),
            guarded_mul(self.max, other.min),
            guarded_mul(self.max, other.max),
        ];
        let (min, max) = min_max(&corners);
        Self::from_bounds(min, max)
    }

    /// `1/x`
    ///
    /// | operand          | result                        |
    /// |------------------|-------------------------------|
    /// | `[0, 0]`         | empty                         |
    /// | `min < 0 < max`  | `(-inf, 1/min] ∪ [1/max, inf)` |
    /// | `min < 0 = max`  | `(-inf, 1/min]`               |
    /// | `min = 0 < max`  | `[1/max, inf)`                |
    /// | otherwise        | `[1/max, 1/min]`              |
    pub fn invert(&self) -> IntervalSet {
        let (min, max) = (self.min, self.max);
        if min == 0.0 && max == 0.0 {
            return IntervalSet::empty();
        }
        if min < 0.0 && 0.0 < max {
            return IntervalSet::from_intervals([
                Self::from_bounds(f64::NEG_INFINITY, 1.0 / min),
                Self::from_bounds(1.0 / max, f64::INFINITY),
            ]);
        }
        if min < 0.0 && max == 0.0 {
            return IntervalSet::from_intervals([Self::from_bounds(f64::NEG_INFINITY, 1.0 / min)]);
        }
        if min == 0.0 && max > 0.0 {
            return IntervalSet::from_intervals([Self::from_bounds(1.0 / max, f64::INFINITY)]);
        }
        IntervalSet::from_intervals([Self::from_bounds(1.0 / max, 1.0 / min)])
    }

    pub fn divide(&self, other: &Interval) -> IntervalSet {
        IntervalSet::from_intervals(other.invert().iter().map(|inv| self.multiply(inv)))
    }

    /// `self ^ exponent`
    ///
    /// A negative exponent is evaluated as `1 / self^-exponent`. Exponents
    /// crossing zero and negative bases with a non-integral exponent are not
    /// supported.
    pub fn pow(&self, exponent: &Interval) -> LiteralResult<IntervalSet> {
        let (a, b) = (self.min, self.max);
        let (c, d) = (exponent.min, exponent.max);

        if d < 0.0 {
            return Ok(self.pow(&exponent.negate())?.invert());
        }
        if c < 0.0 {
            return Err(LiteralError::not_implemented(
                "exponent interval crossing zero",
            ));
        }
        if a < 0.0 && !exponent.is_integer() {
            return Err(LiteralError::not_implemented(
                "negative base with fractional exponent (complex result)",
            ));
        }

        let mut values: SmallVec<[f64; 7]> = smallvec![a.powf(c), a.powf(d), b.powf(c), b.powf(d)];
        if a < 0.0 && 0.0 < b {
            values.push(0f64.powf(c));
            values.push(0f64.powf(d));
            // odd exponent: the even power below it peaks at the negative end
            let k = d - 1.0;
            if d % 2.0 == 1.0 && k > c {
                values.push(a.powf(k));
            }
        }
        let (min, max) = min_max(&values);
        Ok(IntervalSet::from_intervals([Self::from_bounds(min, max)]))
    }

    // ------------------------------------------------------------------
    // Set operations
    // ------------------------------------------------------------------

    pub fn intersect(&self, other: &Interval) -> IntervalSet {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min <= max {
            return IntervalSet::from_intervals([Self::from_bounds(min, max)]);
        }
        IntervalSet::empty()
    }

    pub fn difference(&self, other: &Interval) -> IntervalSet {
        // disjoint
        if self.max < other.min || self.min > other.max {
            return IntervalSet::from_intervals([*self]);
        }
        // covered
        if other.min <= self.min && other.max >= self.max {
            return IntervalSet::empty();
        }
        // other strictly inside: split in two
        if self.min < other.min && self.max > other.max {
            return IntervalSet::from_intervals([
                Self::from_bounds(self.min, other.min),
                Self::from_bounds(other.max, self.max),
            ]);
        }
        // other overlaps the upper end
        if self.min < other.min {
            return IntervalSet::from_intervals([Self::from_bounds(self.min, other.min)]);
        }
        // other overlaps the lower end
        IntervalSet::from_intervals([Self::from_bounds(other.max, self.max)])
    }

    /// Merge with `other` when they touch or overlap
    pub fn maybe_merge(&self, other: &Interval) -> SmallVec<[Interval; 2]> {
        let (left, right) = if self.min <= other.min {
            (self, other)
        } else {
            (other, self)
        };
        if right.min <= left.max {
            return smallvec![Self::from_bounds(left.min, left.max.max(right.max))];
        }
        smallvec![*left, *right]
    }

    // ------------------------------------------------------------------
    // Unary functions
    // ------------------------------------------------------------------

    /// Round half up to `ndigits` decimal places
    pub fn round(&self, ndigits: i32) -> Interval {
        let mult = 10f64.powi(ndigits);
        let round = |x: f64| {
            if x.is_finite() {
                (x * mult + 0.5).floor() / mult
            } else {
                x
            }
        };
        Self::from_bounds(round(self.min), round(self.max))
    }

    pub fn floor(&self) -> Interval {
        Self::from_bounds(self.min.floor(), self.max.floor())
    }

    pub fn ceil(&self) -> Interval {
        Self::from_bounds(self.min.ceil(), self.max.ceil())
    }

    pub fn abs(&self) -> Interval {
        let (min, max) = (self.min, self.max);
        if min < 0.0 && 0.0 < max {
            return Self::from_bounds(0.0, max.max(-min));
        }
        if max < 0.0 {
            return Self::from_bounds(-max, -min);
        }
        if min < 0.0 && max == 0.0 {
            return Self::from_bounds(0.0, -min);
        }
        *self
    }

    /// Natural logarithm, or logarithm to a singleton `base`
    pub fn log(&self, base: Option<&Interval>) -> LiteralResult<Interval> {
        if self.min <= 0.0 {
            return Err(LiteralError::value(format!("invalid log of {self}")));
        }
        let (lo, hi) = (self.min.ln(), self.max.ln());
        let Some(base) = base else {
            return Ok(Self::from_bounds(lo, hi));
        };
        if !base.is_singleton() {
            return Err(LiteralError::not_implemented("log with non-singleton base"));
        }
        let b = base.min;
        if b <= 0.0 || b == 1.0 || !b.is_finite() {
            return Err(LiteralError::value(format!("invalid log base {b}")));
        }
        let (x, y) = (lo / b.ln(), hi / b.ln());
        Ok(Self::from_bounds(x.min(y), x.max(y)))
    }

    /// Range of `sin` over the interval
    pub fn sin(&self) -> Interval {
        let (start, end) = (self.min, self.max);
        let beyond_grid = start.abs() > MAX_EXACT_INTEGER || end.abs() > MAX_EXACT_INTEGER;
        if beyond_grid || end - start > TAU {
            return Self::from_bounds(-1.0, 1.0);
        }
        let mut values: SmallVec<[f64; 8]> = smallvec![start.sin(), end.sin()];
        // turning points at π/2 + kπ
        let k_start = ((start - FRAC_PI_2) / PI).ceil() as i64;
        let k_end = ((end - FRAC_PI_2) / PI).floor() as i64;
        for k in k_start..=k_end {
            values.push((FRAC_PI_2 + PI * k as f64).sin());
        }
        let (min, max) = min_max(&values);
        Self::from_bounds(min.max(-1.0), max.min(1.0))
    }

    /// Image under `x -> scale * x + offset`
    pub fn affine(&self, scale: f64, offset: f64) -> Interval {
        let (a, b) = (
            cancel_noise(guarded_mul(self.min, scale), offset),
            cancel_noise(guarded_mul(self.max, scale), offset),
        );
        Self::from_bounds(a.min(b), a.max(b))
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.equals_with(other, &Precision::DEFAULT)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_singleton() {
            return write!(f, "[{}]", self.min);
        }
        let (center, rel) = self.as_center_rel();
        if rel < 1.0 {
            return write!(f, "{center} ± {}%", rel_round(rel * 100.0, 6));
        }
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

fn guarded_mul(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == 0.0 {
        return 0.0;
    }
    let product = a * b;
    debug_assert!(!product.is_nan(), "NaN product {a} * {b}");
    product
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(min: f64, max: f64) -> Interval {
        Interval::new(min, max).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_bounds() {
        assert!(Interval::new(2.0, 1.0).is_err());
        assert!(Interval::new(f64::NAN, 1.0).is_err());
        assert!(Interval::new(f64::INFINITY, f64::INFINITY).is_err());
        assert!(Interval::new(f64::NEG_INFINITY, f64::NEG_INFINITY).is_err());
        assert!(Interval::new(f64::NEG_INFINITY, f64::INFINITY).is_ok());
    }

    #[test]
    fn test_construction_rounds_float_noise() {
        let i = iv(0.1 + 0.2, 0.3);
        assert!(i.is_singleton());
    }

    #[test]
    fn test_multiply_zero_times_infinity() {
        let product = iv(0.0, 0.0).multiply(&Interval::unbounded());
        assert_eq!(product, iv(0.0, 0.0));
    }

    #[test]
    fn test_maybe_merge() {
        assert_eq!(iv(1.0, 5.0).maybe_merge(&iv(3.0, 7.0)).as_slice(), &[iv(1.0, 7.0)]);
        assert_eq!(iv(3.0, 7.0).maybe_merge(&iv(1.0, 5.0)).as_slice(), &[iv(1.0, 7.0)]);
        assert_eq!(iv(1.0, 2.0).maybe_merge(&iv(2.0, 3.0)).as_slice(), &[iv(1.0, 3.0)]);
        assert_eq!(
            iv(4.0, 5.0).maybe_merge(&iv(1.0, 2.0)).as_slice(),
            &[iv(1.0, 2.0), iv(4.0, 5.0)]
        );
    }

    #[test]
    fn test_as_center_rel() {
        assert_eq!(iv(3.0, 3.0).as_center_rel(), (3.0, 0.0));
        assert_eq!(iv(90.0, 110.0).as_center_rel(), (100.0, 0.1));
        assert_eq!(iv(-1.0, 1.0).as_center_rel().1, f64::INFINITY);
    }

    #[test]
    fn test_display() {
        assert_eq!(iv(3.0, 3.0).to_string(), "[3]");
        assert_eq!(iv(90.0, 110.0).to_string(), "100 ± 10%");
        assert_eq!(iv(0.0, 10.0).to_string(), "[0, 10]");
    }

    #[test]
    fn test_construction_keeps_pico_digits() {
        let i = iv(1.234567e-12, 1.234567e-12);
        assert_eq!(i.min(), 1.234567e-12);
        assert_ne!(i.min(), 1.235e-12);
    }

    #[test]
    fn test_add_snaps_cancelled_sum() {
        let sum = iv(0.3, 0.3).add(&iv(-0.1 - 0.2, -0.1 - 0.2));
        assert_eq!(sum.min().to_bits(), 0.0f64.to_bits());
        assert_eq!(sum.max().to_bits(), 0.0f64.to_bits());
        assert_eq!(iv(1e-12, 1e-12).subtract(&iv(4e-13, 4e-13)).min(), 6e-13);
    }

    #[test]
    fn test_invert_twice_large_magnitudes() {
        let x = iv(3e13, 7e13);
        let back = x.invert().intervals()[0].invert().intervals()[0];
        assert!(((back.min() - 3e13) / 3e13).abs() < 1e-14, "{back}");
        assert!(((back.max() - 7e13) / 7e13).abs() < 1e-14, "{back}");
    }

    #[test]
    fn test_sin_beyond_float_grid() {
        assert_eq!(iv(1e17, 1e17).sin(), iv(-1.0, 1.0));
        assert_eq!(iv(-1e300, -1e300).sin(), iv(-1.0, 1.0));
        assert_eq!(iv(0.0, FRAC_PI_2).sin(), iv(0.0, 1.0));
    }
}
