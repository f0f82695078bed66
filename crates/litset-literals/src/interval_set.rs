//! Canonical unions of disjoint intervals
//!
//! An [`IntervalSet`] is always sorted by `min` with no two members touching
//! or overlapping. Every constructor and every operation passes its result
//! through [`IntervalSet::canonicalize`], so that representation is unique.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use crate::boolean_set::BooleanSet;
use crate::error::{LiteralError, LiteralResult};
use crate::interval::Interval;
use crate::precision::Precision;

/// Sorted, merged union of closed intervals
#[derive(Debug, Clone, Default)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `(-inf, inf)`
    pub fn unbounded() -> Self {
        Self {
            intervals: vec![Interval::unbounded()],
        }
    }

    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> Self {
        Self {
            intervals: Self::canonicalize(intervals.into_iter().collect()),
        }
    }

    /// Build from `(min, max)` pairs, validating each pair
    pub fn from_values(values: impl IntoIterator<Item = (f64, f64)>) -> LiteralResult<Self> {
        let intervals = values
            .into_iter()
            .map(|(min, max)| Interval::new(min, max))
            .collect::<LiteralResult<Vec<_>>>()?;
        Ok(Self::from_intervals(intervals))
    }

    /// `[value]`
    pub fn singleton(value: f64) -> LiteralResult<Self> {
        Ok(Self::from(Interval::singleton(value)?))
    }

    /// Set of discrete points
    pub fn discrete(values: impl IntoIterator<Item = f64>) -> LiteralResult<Self> {
        Self::from_values(values.into_iter().map(|v| (v, v)))
    }

    /// Sort by `min` and merge touching or overlapping intervals
    pub fn canonicalize(mut intervals: Vec<Interval>) -> Vec<Interval> {
        intervals.sort_by(|a, b| a.min().total_cmp(&b.min()));
        let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
        for interval in intervals {
            match merged.last_mut() {
                Some(last) => match last.maybe_merge(&interval).as_slice() {
                    [single] => *last = *single,
                    _ => merged.push(interval),
                },
                None => merged.push(interval),
            }
        }
        log::trace!("canonicalized into {} interval(s)", merged.len());
        merged
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    // ------------------------------------------------------------------
    // Predicates and accessors
    // ------------------------------------------------------------------

    pub fn is_singleton(&self) -> bool {
        matches!(self.intervals.as_slice(), [only] if only.is_singleton())
    }

    /// Non-empty and made of singletons only
    pub fn is_discrete_set(&self) -> bool {
        !self.is_empty() && self.intervals.iter().all(Interval::is_singleton)
    }

    /// Non-empty and made of integral singletons only
    pub fn is_integer(&self) -> bool {
        !self.is_empty() && self.intervals.iter().all(Interval::is_integer)
    }

    pub fn is_finite(&self) -> bool {
        self.intervals.iter().all(Interval::is_finite)
    }

    pub fn is_unbounded(&self) -> bool {
        self.intervals.iter().any(Interval::is_unbounded)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.intervals.iter().any(|i| i.contains(value))
    }

    pub fn min_elem(&self) -> LiteralResult<f64> {
        self.intervals
            .first()
            .map(Interval::min)
            .ok_or_else(|| LiteralError::value("empty set has no minimum"))
    }

    pub fn max_elem(&self) -> LiteralResult<f64> {
        self.intervals
            .last()
            .map(Interval::max)
            .ok_or_else(|| LiteralError::value("empty set has no maximum"))
    }

    /// Smallest element
    pub fn any(&self) -> LiteralResult<f64> {
        self.min_elem()
    }

    pub fn get_single(&self) -> LiteralResult<f64> {
        match self.intervals.as_slice() {
            [only] if only.is_singleton() => Ok(only.min()),
            _ => Err(LiteralError::not_singleton(self)),
        }
    }

    /// Sum of member widths
    pub fn total_span(&self) -> f64 {
        self.intervals.iter().map(Interval::width).sum()
    }

    pub fn is_subset_of(&self, other: &IntervalSet) -> bool {
        self.is_subset_of_with(other, &Precision::DEFAULT)
    }

    pub fn is_subset_of_with(&self, other: &IntervalSet, precision: &Precision) -> bool {
        self.intervals.iter().all(|inner| {
            other
                .intervals
                .iter()
                .any(|outer| inner.is_subset_of_with(outer, precision))
        })
    }

    pub fn is_superset_of(&self, other: &IntervalSet) -> bool {
        other.is_subset_of(self)
    }

    pub fn equals_with(&self, other: &IntervalSet, precision: &Precision) -> bool {
        self.len() == other.len()
            && self
                .intervals
                .iter()
                .zip(&other.intervals)
                .all(|(a, b)| a.equals_with(b, precision))
    }

    /// Element nearest to `target`, ties going to the larger candidate
    pub fn closest_elem(&self, target: f64) -> LiteralResult<f64> {
        if self.is_empty() {
            return Err(LiteralError::value(
                "empty set cannot have a closest element",
            ));
        }
        let index = self.intervals.partition_point(|i| i.min() <= target);
        let left = index.checked_sub(1).map(|i| &self.intervals[i]);
        if let Some(left) = left {
            if left.contains(target) {
                return Ok(target);
            }
        }
        let left_bound = left.map(Interval::max);
        let right_bound = self.intervals.get(index).map(Interval::min);
        match (left_bound, right_bound) {
            (Some(l), Some(r)) if target - l < r - target => Ok(l),
            (_, Some(r)) => Ok(r),
            (Some(l), None) => Ok(l),
            (None, None) => Err(LiteralError::value("empty set cannot have a closest element")),
        }
    }

    // ------------------------------------------------------------------
    // Set operations
    // ------------------------------------------------------------------

    /// Two-pointer sweep over both sorted member lists
    pub fn intersect(&self, other: &IntervalSet) -> IntervalSet {
        let (lhs, rhs) = (&self.intervals, &other.intervals);
        let mut result = Vec::new();
        let (mut s, mut o) = (0, 0);
        while s < lhs.len() && o < rhs.len() {
            let (a, b) = (&lhs[s], &rhs[o]);
            result.extend(a.intersect(b).intervals.iter().copied());

            if a.max() < b.max() {
                s += 1;
            } else if b.max() < a.max() {
                o += 1;
            } else {
                s += 1;
                o += 1;
            }
        }
        Self::from_intervals(result)
    }

    pub fn union(&self, other: &IntervalSet) -> IntervalSet {
        Self::from_intervals(self.iter().chain(other.iter()).copied())
    }

    pub fn difference_interval(&self, other: &Interval) -> IntervalSet {
        Self::from_intervals(self.iter().flat_map(|i| i.difference(other).intervals))
    }

    pub fn difference(&self, other: &IntervalSet) -> IntervalSet {
        other
            .iter()
            .fold(self.clone(), |acc, o| acc.difference_interval(o))
    }

    pub fn symmetric_difference(&self, other: &IntervalSet) -> IntervalSet {
        self.union(other).difference(&self.intersect(other))
    }

    // ------------------------------------------------------------------
    // Arithmetic, lifted over the Cartesian product of members
    // ------------------------------------------------------------------

    fn pairs<'a>(
        &'a self,
        other: &'a IntervalSet,
    ) -> impl Iterator<Item = (&'a Interval, &'a Interval)> + 'a {
        self.iter()
            .flat_map(move |a| other.iter().map(move |b| (a, b)))
    }

    fn map(&self, f: impl Fn(&Interval) -> Interval) -> IntervalSet {
        Self::from_intervals(self.iter().map(f))
    }

    pub fn add(&self, other: &IntervalSet) -> IntervalSet {
        Self::from_intervals(self.pairs(other).map(|(a, b)| a.add(b)))
    }

    pub fn subtract(&self, other: &IntervalSet) -> IntervalSet {
        Self::from_intervals(self.pairs(other).map(|(a, b)| a.subtract(b)))
    }

    pub fn multiply(&self, other: &IntervalSet) -> IntervalSet {
        Self::from_intervals(self.pairs(other).map(|(a, b)| a.multiply(b)))
    }

    pub fn divide(&self, other: &IntervalSet) -> IntervalSet {
        self.multiply(&other.invert())
    }

    pub fn pow(&self, exponent: &IntervalSet) -> LiteralResult<IntervalSet> {
        let mut out = Vec::new();
        for (base, exp) in self.pairs(exponent) {
            out.extend(base.pow(exp)?.intervals);
        }
        Ok(Self::from_intervals(out))
    }

    pub fn negate(&self) -> IntervalSet {
        self.map(Interval::negate)
    }

    pub fn invert(&self) -> IntervalSet {
        Self::from_intervals(self.iter().flat_map(|i| i.invert().intervals))
    }

    pub fn round(&self, ndigits: i32) -> IntervalSet {
        self.map(|i| i.round(ndigits))
    }

    pub fn floor(&self) -> IntervalSet {
        self.map(Interval::floor)
    }

    pub fn ceil(&self) -> IntervalSet {
        self.map(Interval::ceil)
    }

    pub fn abs(&self) -> IntervalSet {
        self.map(Interval::abs)
    }

    /// Logarithm of every member; `base`, when given, must be a singleton
    pub fn log(&self, base: Option<&IntervalSet>) -> LiteralResult<IntervalSet> {
        let base = match base {
            None => None,
            Some(set) if set.is_singleton() => set.intervals.first(),
            Some(_) => {
                return Err(LiteralError::not_implemented(
                    "log with non-singleton base",
                ));
            }
        };
        let intervals = self
            .iter()
            .map(|i| i.log(base))
            .collect::<LiteralResult<Vec<_>>>()?;
        Ok(Self::from_intervals(intervals))
    }

    pub fn sin(&self) -> IntervalSet {
        self.map(Interval::sin)
    }

    /// `cos(x) = sin(x + π/2)`
    pub fn cos(&self) -> IntervalSet {
        self.map(|i| i.add(&Interval::from_bounds(FRAC_PI_2, FRAC_PI_2)).sin())
    }

    /// Image under `x -> scale * x + offset`
    pub fn affine(&self, scale: f64, offset: f64) -> IntervalSet {
        self.map(|i| i.affine(scale, offset))
    }

    // ------------------------------------------------------------------
    // Tri-valued comparisons
    // ------------------------------------------------------------------

    pub fn ge(&self, other: &IntervalSet) -> BooleanSet {
        self.ge_with(other, &Precision::DEFAULT)
    }

    pub fn gt(&self, other: &IntervalSet) -> BooleanSet {
        self.gt_with(other, &Precision::DEFAULT)
    }

    pub fn le(&self, other: &IntervalSet) -> BooleanSet {
        self.le_with(other, &Precision::DEFAULT)
    }

    pub fn lt(&self, other: &IntervalSet) -> BooleanSet {
        self.lt_with(other, &Precision::DEFAULT)
    }

    /// `{true}` if every element is ≥ every element of `other`, `{false}` if
    /// none is, `{true, false}` when the ranges overlap
    pub fn ge_with(&self, other: &IntervalSet, p: &Precision) -> BooleanSet {
        self.compare(other, |lo, hi, olo, ohi| {
            if p.approx_ge(lo, ohi) {
                Some(true)
            } else if p.definitely_lt(hi, olo) {
                Some(false)
            } else {
                None
            }
        })
    }

    pub fn gt_with(&self, other: &IntervalSet, p: &Precision) -> BooleanSet {
        self.compare(other, |lo, hi, olo, ohi| {
            if p.definitely_gt(lo, ohi) {
                Some(true)
            } else if p.approx_le(hi, olo) {
                Some(false)
            } else {
                None
            }
        })
    }

    pub fn le_with(&self, other: &IntervalSet, p: &Precision) -> BooleanSet {
        self.compare(other, |lo, hi, olo, ohi| {
            if p.approx_le(hi, olo) {
                Some(true)
            } else if p.definitely_gt(lo, ohi) {
                Some(false)
            } else {
                None
            }
        })
    }

    pub fn lt_with(&self, other: &IntervalSet, p: &Precision) -> BooleanSet {
        self.compare(other, |lo, hi, olo, ohi| {
            if p.definitely_lt(hi, olo) {
                Some(true)
            } else if p.approx_ge(lo, ohi) {
                Some(false)
            } else {
                None
            }
        })
    }

    fn compare(
        &self,
        other: &IntervalSet,
        decide: impl Fn(f64, f64, f64, f64) -> Option<bool>,
    ) -> BooleanSet {
        let (Some(lo), Some(hi), Some(olo), Some(ohi)) = (
            self.intervals.first().map(Interval::min),
            self.intervals.last().map(Interval::max),
            other.intervals.first().map(Interval::min),
            other.intervals.last().map(Interval::max),
        ) else {
            return BooleanSet::empty();
        };
        match decide(lo, hi, olo, ohi) {
            Some(value) => BooleanSet::from_value(value),
            None => BooleanSet::unbounded(),
        }
    }
}

impl From<Interval> for IntervalSet {
    fn from(interval: Interval) -> Self {
        Self {
            intervals: vec![interval],
        }
    }
}

impl PartialEq for IntervalSet {
    fn eq(&self, other: &Self) -> bool {
        self.equals_with(other, &Precision::DEFAULT)
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.intervals.as_slice() {
            [] => write!(f, "{{}}"),
            [only] => write!(f, "{only}"),
            many => {
                write!(f, "{{")?;
                for (i, interval) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{interval}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[(f64, f64)]) -> IntervalSet {
        IntervalSet::from_values(values.iter().copied()).unwrap()
    }

    #[test]
    fn test_canonicalize_merges_touching() {
        let s = set(&[(4.0, 5.0), (0.0, 1.0), (1.0, 2.0), (4.5, 6.0)]);
        assert_eq!(s, set(&[(0.0, 2.0), (4.0, 6.0)]));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let s = set(&[(3.0, 4.0), (0.0, 1.0), (0.5, 2.0)]);
        let again = IntervalSet::canonicalize(s.intervals().to_vec());
        assert_eq!(again.as_slice(), s.intervals());
    }

    #[test]
    fn test_get_single() {
        assert_eq!(IntervalSet::singleton(3.0).unwrap().get_single().unwrap(), 3.0);
        assert!(set(&[(1.0, 2.0)]).get_single().is_err());
        assert!(IntervalSet::empty().get_single().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(IntervalSet::empty().to_string(), "{}");
        assert_eq!(set(&[(1.0, 1.0), (4.0, 4.0)]).to_string(), "{[1], [4]}");
    }

    #[test]
    fn test_cos() {
        let zero = IntervalSet::singleton(0.0).unwrap();
        assert_eq!(zero.cos(), IntervalSet::singleton(1.0).unwrap());
    }
}
