//! Folding operators over literal operands
//!
//! [`fold`] applies an [`Operator`] to already-known literal values and
//! produces a new literal. Associative operators (`Add`, `Multiply`,
//! `Intersection`, `Union`, `And`, `Or`) accept any number of operands and
//! are folded left to right; the others have a fixed arity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arena::{Handle, LiteralStore};
use crate::boolean_set::BooleanSet;
use crate::error::{LiteralError, LiteralResult};
use crate::literal::LiteralValue;
use crate::precision::Precision;
use crate::quantity::Quantity;

/// Operators that can be folded over literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Negate,
    Invert,
    Sqrt,
    Abs,
    /// Natural logarithm, or logarithm to the base given as second operand
    Log,
    Sin,
    Cos,
    /// Round to the number of digits given as optional second operand
    Round,
    Floor,
    Ceil,
    /// Sum of member widths; gaps between members do not count
    TotalSpan,

    // Set algebra
    Intersection,
    Union,
    SymmetricDifference,
    Difference,

    // Comparisons, producing booleans
    GreaterOrEqual,
    GreaterThan,
    LessOrEqual,
    LessThan,
    IsSubset,
    /// Set equality
    Is,
    /// Bit of the first operand at the index given by the second
    IsBitSet,

    // Logic
    And,
    Or,
    Not,
    Xor,
    Implies,
}

/// Number of operands an operator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub const fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::Between(lo, hi) => lo <= count && count <= hi,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::Between(lo, hi) => write!(f, "{lo} to {hi}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

impl Operator {
    pub const ALL: [Operator; 32] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Power,
        Operator::Negate,
        Operator::Invert,
        Operator::Sqrt,
        Operator::Abs,
        Operator::Log,
        Operator::Sin,
        Operator::Cos,
        Operator::Round,
        Operator::Floor,
        Operator::Ceil,
        Operator::TotalSpan,
        Operator::Intersection,
        Operator::Union,
        Operator::SymmetricDifference,
        Operator::Difference,
        Operator::GreaterOrEqual,
        Operator::GreaterThan,
        Operator::LessOrEqual,
        Operator::LessThan,
        Operator::IsSubset,
        Operator::Is,
        Operator::IsBitSet,
        Operator::And,
        Operator::Or,
        Operator::Not,
        Operator::Xor,
        Operator::Implies,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Negate => "negate",
            Self::Invert => "invert",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Log => "log",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Round => "round",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::TotalSpan => "total_span",
            Self::Intersection => "intersection",
            Self::Union => "union",
            Self::SymmetricDifference => "symmetric_difference",
            Self::Difference => "difference",
            Self::GreaterOrEqual => "greater_or_equal",
            Self::GreaterThan => "greater_than",
            Self::LessOrEqual => "less_or_equal",
            Self::LessThan => "less_than",
            Self::IsSubset => "is_subset",
            Self::Is => "is",
            Self::IsBitSet => "is_bit_set",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Xor => "xor",
            Self::Implies => "implies",
        }
    }

    pub const fn arity(&self) -> Arity {
        match self {
            Self::Add | Self::Multiply | Self::Intersection | Self::Union => Arity::AtLeast(2),
            Self::And | Self::Or => Arity::AtLeast(1),
            Self::Log | Self::Round => Arity::Between(1, 2),
            Self::Negate
            | Self::Invert
            | Self::Sqrt
            | Self::Abs
            | Self::Sin
            | Self::Cos
            | Self::Floor
            | Self::Ceil
            | Self::TotalSpan
            | Self::Not => Arity::Exactly(1),
            _ => Arity::Exactly(2),
        }
    }

    /// Operators whose result is a `BooleanSet` regardless of operand kind
    pub const fn is_predicate(&self) -> bool {
        matches!(
            self,
            Self::GreaterOrEqual
                | Self::GreaterThan
                | Self::LessOrEqual
                | Self::LessThan
                | Self::IsSubset
                | Self::Is
                | Self::IsBitSet
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = LiteralError;

    /// Case-insensitive; `-` and `_` are interchangeable and may be omitted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.name().replace('_', "") == key)
            .ok_or_else(|| LiteralError::value(format!("unknown operator '{s}'")))
    }
}

/// Fold `op` over `operands` with the default precision
pub fn fold(op: Operator, operands: &[LiteralValue]) -> LiteralResult<LiteralValue> {
    fold_with(op, operands, &Precision::default())
}

/// Fold `op` over `operands`, comparing with `precision`
pub fn fold_with(
    op: Operator,
    operands: &[LiteralValue],
    precision: &Precision,
) -> LiteralResult<LiteralValue> {
    let refs: Vec<&LiteralValue> = operands.iter().collect();
    apply(op, &refs, precision)
}

/// Fold `op` over stored literals and store the result
pub fn fold_handles<S: LiteralStore>(
    store: &mut S,
    op: Operator,
    handles: &[Handle],
    precision: &Precision,
) -> LiteralResult<Handle> {
    let result = apply(op, &store.bind_all(handles)?, precision)?;
    store.create_instance(result)
}

fn apply(
    op: Operator,
    operands: &[&LiteralValue],
    precision: &Precision,
) -> LiteralResult<LiteralValue> {
    let arity = op.arity();
    if !arity.accepts(operands.len()) {
        return Err(LiteralError::arity(
            op.name(),
            arity.to_string(),
            operands.len(),
        ));
    }
    log::debug!("folding {op} over {} operand(s)", operands.len());

    let result: LiteralValue = match op {
        Operator::Add => fold_numbers(op, operands, |a, b| a.add(b))?.into(),
        Operator::Multiply => fold_numbers(op, operands, |a, b| Ok(a.multiply(b)))?.into(),
        Operator::Subtract => numbers(op, operands[0])?
            .subtract(numbers(op, operands[1])?)?
            .into(),
        Operator::Divide => numbers(op, operands[0])?
            .divide(numbers(op, operands[1])?)
            .into(),
        Operator::Power => numbers(op, operands[0])?
            .pow(numbers(op, operands[1])?)?
            .into(),
        Operator::Negate => numbers(op, operands[0])?.negate().into(),
        Operator::Invert => numbers(op, operands[0])?.invert().into(),
        Operator::Sqrt => numbers(op, operands[0])?.sqrt()?.into(),
        Operator::Abs => numbers(op, operands[0])?.abs().into(),
        Operator::Log => {
            let base = operands.get(1).map(|b| numbers(op, b)).transpose()?;
            numbers(op, operands[0])?.log(base)?.into()
        }
        Operator::Sin => numbers(op, operands[0])?.sin()?.into(),
        Operator::Cos => numbers(op, operands[0])?.cos()?.into(),
        Operator::Round => {
            let ndigits = match operands.get(1) {
                Some(digits) => round_digits(digits)?,
                None => 0,
            };
            numbers(op, operands[0])?.round(ndigits).into()
        }
        Operator::Floor => numbers(op, operands[0])?.floor().into(),
        Operator::Ceil => numbers(op, operands[0])?.ceil().into(),
        Operator::TotalSpan => numbers(op, operands[0])?.total_span()?.into(),

        Operator::Intersection => fold_values(operands, LiteralValue::intersect)?,
        Operator::Union => fold_values(operands, LiteralValue::union)?,
        Operator::SymmetricDifference => operands[0].symmetric_difference(operands[1])?,
        Operator::Difference => operands[0].difference(operands[1])?,

        Operator::GreaterOrEqual => numbers(op, operands[0])?
            .ge_with(numbers(op, operands[1])?, precision)?
            .into(),
        Operator::GreaterThan => numbers(op, operands[0])?
            .gt_with(numbers(op, operands[1])?, precision)?
            .into(),
        Operator::LessOrEqual => numbers(op, operands[0])?
            .le_with(numbers(op, operands[1])?, precision)?
            .into(),
        Operator::LessThan => numbers(op, operands[0])?
            .lt_with(numbers(op, operands[1])?, precision)?
            .into(),
        Operator::IsSubset => {
            BooleanSet::from_value(operands[0].is_subset_of_with(operands[1], precision)?).into()
        }
        Operator::Is => {
            BooleanSet::from_value(operands[0].equals_with(operands[1], precision)?).into()
        }
        Operator::IsBitSet => numbers(op, operands[0])?
            .is_bit_set(numbers(op, operands[1])?)?
            .into(),

        Operator::And => {
            let sets = booleans_all(op, operands)?;
            BooleanSet::and_all(sets).into()
        }
        Operator::Or => {
            let sets = booleans_all(op, operands)?;
            BooleanSet::or_all(sets).into()
        }
        Operator::Not => booleans(op, operands[0])?.logical_not().into(),
        Operator::Xor => booleans(op, operands[0])?
            .xor(booleans(op, operands[1])?)
            .into(),
        Operator::Implies => booleans(op, operands[0])?
            .implies(booleans(op, operands[1])?)
            .into(),
    };
    Ok(result)
}

fn numbers<'a>(op: Operator, value: &'a LiteralValue) -> LiteralResult<&'a Quantity> {
    match value {
        LiteralValue::Numbers(q) => Ok(q),
        other => Err(LiteralError::value(format!(
            "{op} expects Numbers, found {}",
            other.kind()
        ))),
    }
}

fn booleans<'a>(op: Operator, value: &'a LiteralValue) -> LiteralResult<&'a BooleanSet> {
    match value {
        LiteralValue::Booleans(s) => Ok(s),
        other => Err(LiteralError::value(format!(
            "{op} expects Booleans, found {}",
            other.kind()
        ))),
    }
}

fn booleans_all<'a>(
    op: Operator,
    operands: &[&'a LiteralValue],
) -> LiteralResult<Vec<&'a BooleanSet>> {
    operands.iter().map(|&v| booleans(op, v)).collect()
}

fn fold_numbers(
    op: Operator,
    operands: &[&LiteralValue],
    f: impl Fn(&Quantity, &Quantity) -> LiteralResult<Quantity>,
) -> LiteralResult<Quantity> {
    let mut acc = numbers(op, operands[0])?.clone();
    for operand in &operands[1..] {
        acc = f(&acc, numbers(op, operand)?)?;
    }
    Ok(acc)
}

fn fold_values(
    operands: &[&LiteralValue],
    f: impl Fn(&LiteralValue, &LiteralValue) -> LiteralResult<LiteralValue>,
) -> LiteralResult<LiteralValue> {
    let mut acc = operands[0].clone();
    for operand in &operands[1..] {
        acc = f(&acc, operand)?;
    }
    Ok(acc)
}

/// Digit count for `Round`, from a singleton integral number or count
fn round_digits(value: &LiteralValue) -> LiteralResult<i32> {
    let digits = match value {
        LiteralValue::Numbers(q) if q.unit().is_dimensionless() => {
            let single = q.get_single()?;
            if single.fract() != 0.0 {
                return Err(LiteralError::value(format!(
                    "round digits must be an integer, found {single}"
                )));
            }
            single as i64
        }
        LiteralValue::Counts(c) => c.get_single()?,
        other => {
            return Err(LiteralError::value(format!(
                "round digits must be a dimensionless number or a count, found {}",
                other.pretty_str()
            )));
        }
    };
    i32::try_from(digits)
        .map_err(|_| LiteralError::value(format!("round digits out of range: {digits}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("add", Operator::Add)]
    #[case("SymmetricDifference", Operator::SymmetricDifference)]
    #[case("symmetric-difference", Operator::SymmetricDifference)]
    #[case("GREATER_OR_EQUAL", Operator::GreaterOrEqual)]
    #[case("total_span", Operator::TotalSpan)]
    #[case("is", Operator::Is)]
    fn test_parse_operator(#[case] input: &str, #[case] expected: Operator) {
        assert_eq!(input.parse::<Operator>().unwrap(), expected);
    }

    #[test]
    fn test_names_roundtrip() {
        for op in Operator::ALL {
            assert_eq!(op.name().parse::<Operator>().unwrap(), op);
        }
        assert!("frobnicate".parse::<Operator>().is_err());
    }

    #[test]
    fn test_arity_error() {
        let t: LiteralValue = BooleanSet::from_value(true).into();
        let err = fold(Operator::Xor, &[t]).unwrap_err();
        assert!(matches!(err, LiteralError::Arity { found: 1, .. }));
        assert!(fold(Operator::And, &[]).is_err());
    }

    #[test]
    fn test_kind_error() {
        let t: LiteralValue = BooleanSet::from_value(true).into();
        let n: LiteralValue = Quantity::dimensionless(crate::IntervalSet::unbounded()).into();
        assert!(matches!(
            fold(Operator::Negate, &[t.clone()]),
            Err(LiteralError::Value { .. })
        ));
        assert!(fold(Operator::Not, &[n]).is_err());
    }
}
