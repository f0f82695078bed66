//! Sets of truth values with tri-valued logic
//!
//! A [`BooleanSet`] holds the truth values a proposition may still take:
//! `{true}` and `{false}` are decided, `{true, false}` is undetermined and
//! `{}` is a contradiction. The connectives act on the sets element-wise:
//!
//! | A              | B         | A and B        | A or B         |
//! |----------------|-----------|----------------|----------------|
//! | {true}         | {true}    | {true}         | {true}         |
//! | {true, false}  | {false}   | {false}        | {true, false}  |
//! | {true, false}  | {true}    | {true, false}  | {true}         |
//! | {}             | any       | {}             | {}             |

use std::ops::Not;

use crate::discrete_set::DiscreteSet;

/// Set of booleans
pub type BooleanSet = DiscreteSet<bool>;

impl BooleanSet {
    /// `{true, false}`
    pub fn unbounded() -> Self {
        Self::new([false, true])
    }

    pub fn from_value(value: bool) -> Self {
        Self::singleton(value)
    }

    /// Exactly `{true}`
    pub fn is_true(&self) -> bool {
        self.is_singleton() && self.contains(&true)
    }

    /// Exactly `{false}`
    pub fn is_false(&self) -> bool {
        self.is_singleton() && self.contains(&false)
    }

    pub fn logical_not(&self) -> Self {
        self.iter().map(|v| !v).collect()
    }

    /// Conjunction of any number of operands
    ///
    /// Contains `true` iff every operand does, `false` iff any operand does,
    /// and is empty as soon as one operand is empty.
    pub fn and_all<'a>(operands: impl IntoIterator<Item = &'a BooleanSet>) -> BooleanSet {
        let operands: Vec<&BooleanSet> = operands.into_iter().collect();
        if operands.iter().any(|s| s.is_empty()) {
            return Self::empty();
        }
        let mut out = Vec::with_capacity(2);
        if operands.iter().all(|s| s.contains(&true)) {
            out.push(true);
        }
        if operands.iter().any(|s| s.contains(&false)) {
            out.push(false);
        }
        Self::new(out)
    }

    /// Disjunction of any number of operands
    pub fn or_all<'a>(operands: impl IntoIterator<Item = &'a BooleanSet>) -> BooleanSet {
        let operands: Vec<&BooleanSet> = operands.into_iter().collect();
        if operands.iter().any(|s| s.is_empty()) {
            return Self::empty();
        }
        let mut out = Vec::with_capacity(2);
        if operands.iter().any(|s| s.contains(&true)) {
            out.push(true);
        }
        if operands.iter().all(|s| s.contains(&false)) {
            out.push(false);
        }
        Self::new(out)
    }

    pub fn and(&self, other: &BooleanSet) -> BooleanSet {
        Self::and_all([self, other])
    }

    pub fn or(&self, other: &BooleanSet) -> BooleanSet {
        Self::or_all([self, other])
    }

    /// `{a != b : a ∈ self, b ∈ other}`
    pub fn xor(&self, other: &BooleanSet) -> BooleanSet {
        self.combine(other, |a, b| a != b)
    }

    /// `{!a || b : a ∈ self, b ∈ other}`
    pub fn implies(&self, other: &BooleanSet) -> BooleanSet {
        self.combine(other, |a, b| !a || b)
    }

    fn combine(&self, other: &BooleanSet, f: impl Fn(bool, bool) -> bool) -> BooleanSet {
        self.iter()
            .flat_map(|&a| other.iter().map(move |&b| (a, b)))
            .map(|(a, b)| f(a, b))
            .collect()
    }
}

impl Not for &BooleanSet {
    type Output = BooleanSet;

    fn not(self) -> BooleanSet {
        self.logical_not()
    }
}
