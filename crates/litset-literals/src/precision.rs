//! Numeric tolerances
//!
//! Interval bounds are stored rounded to 15 significant digits, so float
//! noise such as `0.1 + 0.2` does not turn a singleton into a tiny interval.
//! Rounding is relative only: a pico-scale bound keeps all 15 digits. Sums
//! that cancel down to rounding error are snapped to zero by
//! [`cancel_noise`]; any other tiny residue is absorbed by the absolute
//! floor of [`Precision`] when comparing.
//!
//! Comparisons take a [`Precision`], which combines a relative tolerance of
//! `10^-(rel_digits - 1)` with an absolute floor of `10^-abs_digits`.

use serde::{Deserialize, Serialize};

/// Significant digits kept when a bound is stored
pub const STORED_SIGNIFICANT_DIGITS: usize = 15;

/// Multiples of machine epsilon below which a sum counts as cancelled
const CANCELLATION_ULPS: f64 = 4.0;

/// Comparison tolerances for numeric literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Precision {
    /// Relative digits: two numbers agreeing in this many digits are equal
    pub rel_digits: u32,
    /// Absolute digits: differences below `10^-abs_digits` are ignored
    pub abs_digits: u32,
}

impl Precision {
    pub const DEFAULT: Precision = Precision {
        rel_digits: 7,
        abs_digits: 15,
    };

    pub const fn new(rel_digits: u32, abs_digits: u32) -> Self {
        Self {
            rel_digits,
            abs_digits,
        }
    }

    pub fn epsilon_rel(&self) -> f64 {
        10f64.powi(1 - self.rel_digits as i32)
    }

    pub fn epsilon_abs(&self) -> f64 {
        10f64.powi(-(self.abs_digits as i32))
    }

    /// `a ≈ b` within the combined relative/absolute tolerance
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        if a == b {
            return true;
        }
        if !a.is_finite() || !b.is_finite() {
            return false;
        }
        let tolerance = (self.epsilon_rel() * a.abs().max(b.abs())).max(self.epsilon_abs());
        (a - b).abs() <= tolerance
    }

    /// `a ≤ b` or `a ≈ b`
    pub fn approx_le(&self, a: f64, b: f64) -> bool {
        a <= b || self.approx_eq(a, b)
    }

    /// `a ≥ b` or `a ≈ b`
    pub fn approx_ge(&self, a: f64, b: f64) -> bool {
        a >= b || self.approx_eq(a, b)
    }

    /// `a < b` and not `a ≈ b`
    pub fn definitely_lt(&self, a: f64, b: f64) -> bool {
        !self.approx_ge(a, b)
    }

    /// `a > b` and not `a ≈ b`
    pub fn definitely_gt(&self, a: f64, b: f64) -> bool {
        !self.approx_le(a, b)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Round a bound to its stored representation
///
/// Infinities pass through, `-0.0` becomes `0.0`.
pub fn round_stored(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = round_significant(value, STORED_SIGNIFICANT_DIGITS);
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// `a + b`, snapped to zero when the terms cancel to rounding error
///
/// `0.3 - 0.1 - 0.2` leaves `-2.77e-17`; that residue is noise relative to
/// the operands, not a value.
pub fn cancel_noise(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if !sum.is_finite() || sum == 0.0 {
        return sum;
    }
    let scale = a.abs().max(b.abs());
    if sum.abs() <= CANCELLATION_ULPS * f64::EPSILON * scale {
        0.0
    } else {
        sum
    }
}

/// Round to `digits` significant digits, e.g. `rel_round(1234.5678, 2) == 1200.0`
pub fn rel_round(value: f64, digits: usize) -> f64 {
    round_significant(value, digits.max(1))
}

fn round_significant(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    format!("{:.*e}", digits - 1, value)
        .parse()
        .unwrap_or(value)
}
