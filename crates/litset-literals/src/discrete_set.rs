//! Finite sets of discrete values
//!
//! [`DiscreteSet`] backs the string, count and boolean literals. Values are
//! kept in a `BTreeSet`, so iteration order and [`DiscreteSet::any`] are
//! deterministic.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{LiteralError, LiteralResult};

/// Finite ordered set of values
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscreteSet<T: Ord> {
    values: BTreeSet<T>,
}

/// Set of strings
pub type StringSet = DiscreteSet<String>;

/// Set of integer counts
pub type CountSet = DiscreteSet<i64>;

impl<T: Ord> Default for DiscreteSet<T> {
    fn default() -> Self {
        Self {
            values: BTreeSet::new(),
        }
    }
}

impl<T: Ord + Clone> DiscreteSet<T> {
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn singleton(value: T) -> Self {
        Self::new([value])
    }

    pub fn values(&self) -> &BTreeSet<T> {
        &self.values
    }

    pub fn iter(&self) -> std::collections::btree_set::Iter<'_, T> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.values.len() == 1
    }

    pub fn get_single(&self) -> LiteralResult<T> {
        match self.values.len() {
            1 => self
                .values
                .first()
                .cloned()
                .ok_or_else(|| LiteralError::not_singleton("an empty set")),
            n => Err(LiteralError::not_singleton(format!("{n} elements"))),
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.values.contains(value)
    }

    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.values.is_subset(&other.values)
    }

    pub fn equals(&self, other: &Self) -> bool {
        self.values == other.values
    }

    /// Smallest element
    pub fn any(&self) -> LiteralResult<T> {
        self.values
            .first()
            .cloned()
            .ok_or_else(|| LiteralError::value("empty set has no elements"))
    }

    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            values: self.values.intersection(&other.values).cloned().collect(),
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            values: self.values.union(&other.values).cloned().collect(),
        }
    }

    pub fn difference(&self, other: &Self) -> Self {
        Self {
            values: self.values.difference(&other.values).cloned().collect(),
        }
    }

    pub fn symmetric_difference(&self, other: &Self) -> Self {
        Self {
            values: self
                .values
                .symmetric_difference(&other.values)
                .cloned()
                .collect(),
        }
    }
}

impl CountSet {
    pub fn min(&self) -> Option<i64> {
        self.values.first().copied()
    }

    pub fn max(&self) -> Option<i64> {
        self.values.last().copied()
    }
}

impl<T: Ord + Clone> FromIterator<T> for DiscreteSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: Ord + fmt::Debug> fmt::Display for DiscreteSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(&self.values).finish()
    }
}
