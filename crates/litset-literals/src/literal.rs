//! The closed sum type over all literal kinds
//!
//! [`LiteralValue`] forwards the common operations to the concrete set type.
//! Operations between two different kinds fail with a `Value` error rather
//! than coercing one side.

use std::fmt;

use crate::boolean_set::BooleanSet;
use crate::discrete_set::{CountSet, StringSet};
use crate::enum_set::{EnumMember, EnumValueSet};
use crate::error::{LiteralError, LiteralResult};
use crate::precision::Precision;
use crate::quantity::Quantity;

/// Which concrete set a literal holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Numbers,
    Booleans,
    Strings,
    Counts,
    Enums,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LiteralKind::Numbers => "Numbers",
            LiteralKind::Booleans => "Booleans",
            LiteralKind::Strings => "Strings",
            LiteralKind::Counts => "Counts",
            LiteralKind::Enums => "Enums",
        };
        f.write_str(name)
    }
}

/// A single element extracted from a literal
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralScalar {
    /// Number in the quantity's own unit
    Number(f64),
    Boolean(bool),
    String(String),
    Count(i64),
    Enum(EnumMember),
}

impl fmt::Display for LiteralScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralScalar::Number(v) => write!(f, "{v}"),
            LiteralScalar::Boolean(v) => write!(f, "{v}"),
            LiteralScalar::String(v) => write!(f, "{v:?}"),
            LiteralScalar::Count(v) => write!(f, "{v}"),
            LiteralScalar::Enum(m) => write!(f, "{}", m.name),
        }
    }
}

/// A literal value set of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Numbers(Quantity),
    Booleans(BooleanSet),
    Strings(StringSet),
    Counts(CountSet),
    Enums(EnumValueSet),
}

impl LiteralValue {
    pub fn kind(&self) -> LiteralKind {
        match self {
            LiteralValue::Numbers(_) => LiteralKind::Numbers,
            LiteralValue::Booleans(_) => LiteralKind::Booleans,
            LiteralValue::Strings(_) => LiteralKind::Strings,
            LiteralValue::Counts(_) => LiteralKind::Counts,
            LiteralValue::Enums(_) => LiteralKind::Enums,
        }
    }

    fn incompatible(&self, other: &LiteralValue) -> LiteralError {
        LiteralError::incompatible_types(self.kind(), other.kind())
    }

    pub fn is_subset_of(&self, other: &LiteralValue) -> LiteralResult<bool> {
        self.is_subset_of_with(other, &Precision::DEFAULT)
    }

    pub fn is_subset_of_with(
        &self,
        other: &LiteralValue,
        precision: &Precision,
    ) -> LiteralResult<bool> {
        match (self, other) {
            (LiteralValue::Numbers(a), LiteralValue::Numbers(b)) => {
                Ok(a.is_subset_of_with(b, precision))
            }
            (LiteralValue::Booleans(a), LiteralValue::Booleans(b)) => Ok(a.is_subset_of(b)),
            (LiteralValue::Strings(a), LiteralValue::Strings(b)) => Ok(a.is_subset_of(b)),
            (LiteralValue::Counts(a), LiteralValue::Counts(b)) => Ok(a.is_subset_of(b)),
            (LiteralValue::Enums(a), LiteralValue::Enums(b)) => a.is_subset_of(b),
            _ => Err(self.incompatible(other)),
        }
    }

    pub fn equals(&self, other: &LiteralValue) -> LiteralResult<bool> {
        self.equals_with(other, &Precision::DEFAULT)
    }

    pub fn equals_with(&self, other: &LiteralValue, precision: &Precision) -> LiteralResult<bool> {
        match (self, other) {
            (LiteralValue::Numbers(a), LiteralValue::Numbers(b)) => {
                Ok(a.equals_with(b, precision))
            }
            (LiteralValue::Booleans(a), LiteralValue::Booleans(b)) => Ok(a.equals(b)),
            (LiteralValue::Strings(a), LiteralValue::Strings(b)) => Ok(a.equals(b)),
            (LiteralValue::Counts(a), LiteralValue::Counts(b)) => Ok(a.equals(b)),
            (LiteralValue::Enums(a), LiteralValue::Enums(b)) => a.equals(b),
            _ => Err(self.incompatible(other)),
        }
    }

    /// Index of the first candidate equal to `self`
    pub fn multi_equals<'a>(
        &self,
        candidates: impl IntoIterator<Item = &'a LiteralValue>,
    ) -> LiteralResult<Option<usize>> {
        for (index, candidate) in candidates.into_iter().enumerate() {
            if self.equals(candidate)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Whether any element of `container` equals `self`
    pub fn in_container<'a>(
        &self,
        container: impl IntoIterator<Item = &'a LiteralValue>,
    ) -> LiteralResult<bool> {
        Ok(self.multi_equals(container)?.is_some())
    }

    pub fn is_singleton(&self) -> bool {
        match self {
            LiteralValue::Numbers(q) => q.is_singleton(),
            LiteralValue::Booleans(s) => s.is_singleton(),
            LiteralValue::Strings(s) => s.is_singleton(),
            LiteralValue::Counts(s) => s.is_singleton(),
            LiteralValue::Enums(s) => s.is_singleton(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            LiteralValue::Numbers(q) => q.is_empty(),
            LiteralValue::Booleans(s) => s.is_empty(),
            LiteralValue::Strings(s) => s.is_empty(),
            LiteralValue::Counts(s) => s.is_empty(),
            LiteralValue::Enums(s) => s.is_empty(),
        }
    }

    /// A deterministic representative element
    pub fn any(&self) -> LiteralResult<LiteralScalar> {
        Ok(match self {
            LiteralValue::Numbers(q) => LiteralScalar::Number(q.any()?),
            LiteralValue::Booleans(s) => LiteralScalar::Boolean(s.any()?),
            LiteralValue::Strings(s) => LiteralScalar::String(s.any()?),
            LiteralValue::Counts(s) => LiteralScalar::Count(s.any()?),
            LiteralValue::Enums(s) => LiteralScalar::Enum(s.any()?.clone()),
        })
    }

    pub fn get_single(&self) -> LiteralResult<LiteralScalar> {
        Ok(match self {
            LiteralValue::Numbers(q) => LiteralScalar::Number(q.get_single()?),
            LiteralValue::Booleans(s) => LiteralScalar::Boolean(s.get_single()?),
            LiteralValue::Strings(s) => LiteralScalar::String(s.get_single()?),
            LiteralValue::Counts(s) => LiteralScalar::Count(s.get_single()?),
            LiteralValue::Enums(s) => LiteralScalar::Enum(s.get_single()?.clone()),
        })
    }

    pub fn pretty_str(&self) -> String {
        match self {
            LiteralValue::Numbers(q) => q.pretty_str(),
            LiteralValue::Booleans(s) => s.to_string(),
            LiteralValue::Strings(s) => s.to_string(),
            LiteralValue::Counts(s) => s.to_string(),
            LiteralValue::Enums(s) => s.to_string(),
        }
    }

    pub fn intersect(&self, other: &LiteralValue) -> LiteralResult<LiteralValue> {
        Ok(match (self, other) {
            (LiteralValue::Numbers(a), LiteralValue::Numbers(b)) => a.intersect(b)?.into(),
            (LiteralValue::Booleans(a), LiteralValue::Booleans(b)) => a.intersect(b).into(),
            (LiteralValue::Strings(a), LiteralValue::Strings(b)) => a.intersect(b).into(),
            (LiteralValue::Counts(a), LiteralValue::Counts(b)) => a.intersect(b).into(),
            (LiteralValue::Enums(a), LiteralValue::Enums(b)) => a.intersect(b)?.into(),
            _ => return Err(self.incompatible(other)),
        })
    }

    pub fn union(&self, other: &LiteralValue) -> LiteralResult<LiteralValue> {
        Ok(match (self, other) {
            (LiteralValue::Numbers(a), LiteralValue::Numbers(b)) => a.union(b)?.into(),
            (LiteralValue::Booleans(a), LiteralValue::Booleans(b)) => a.union(b).into(),
            (LiteralValue::Strings(a), LiteralValue::Strings(b)) => a.union(b).into(),
            (LiteralValue::Counts(a), LiteralValue::Counts(b)) => a.union(b).into(),
            (LiteralValue::Enums(a), LiteralValue::Enums(b)) => a.union(b)?.into(),
            _ => return Err(self.incompatible(other)),
        })
    }

    pub fn difference(&self, other: &LiteralValue) -> LiteralResult<LiteralValue> {
        Ok(match (self, other) {
            (LiteralValue::Numbers(a), LiteralValue::Numbers(b)) => a.difference(b)?.into(),
            (LiteralValue::Booleans(a), LiteralValue::Booleans(b)) => a.difference(b).into(),
            (LiteralValue::Strings(a), LiteralValue::Strings(b)) => a.difference(b).into(),
            (LiteralValue::Counts(a), LiteralValue::Counts(b)) => a.difference(b).into(),
            (LiteralValue::Enums(a), LiteralValue::Enums(b)) => a.difference(b)?.into(),
            _ => return Err(self.incompatible(other)),
        })
    }

    pub fn symmetric_difference(&self, other: &LiteralValue) -> LiteralResult<LiteralValue> {
        Ok(match (self, other) {
            (LiteralValue::Numbers(a), LiteralValue::Numbers(b)) => {
                a.symmetric_difference(b)?.into()
            }
            (LiteralValue::Booleans(a), LiteralValue::Booleans(b)) => {
                a.symmetric_difference(b).into()
            }
            (LiteralValue::Strings(a), LiteralValue::Strings(b)) => {
                a.symmetric_difference(b).into()
            }
            (LiteralValue::Counts(a), LiteralValue::Counts(b)) => a.symmetric_difference(b).into(),
            (LiteralValue::Enums(a), LiteralValue::Enums(b)) => a.symmetric_difference(b)?.into(),
            _ => return Err(self.incompatible(other)),
        })
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_str())
    }
}

impl From<Quantity> for LiteralValue {
    fn from(value: Quantity) -> Self {
        LiteralValue::Numbers(value)
    }
}

impl From<BooleanSet> for LiteralValue {
    fn from(value: BooleanSet) -> Self {
        LiteralValue::Booleans(value)
    }
}

impl From<StringSet> for LiteralValue {
    fn from(value: StringSet) -> Self {
        LiteralValue::Strings(value)
    }
}

impl From<CountSet> for LiteralValue {
    fn from(value: CountSet) -> Self {
        LiteralValue::Counts(value)
    }
}

impl From<EnumValueSet> for LiteralValue {
    fn from(value: EnumValueSet) -> Self {
        LiteralValue::Enums(value)
    }
}
