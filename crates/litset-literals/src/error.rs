//! Errors for literal value operations

use litset_units::UnitError;
use thiserror::Error;

/// Result type for literal operations
pub type LiteralResult<T> = Result<T, LiteralError>;

/// Errors that can occur while constructing or combining literals
#[derive(Debug, Error)]
pub enum LiteralError {
    /// Scalar extraction from a set that does not hold exactly one element
    #[error("Expected a single element, found {found}")]
    NotSingleton { found: String },

    /// Combination of quantities whose units have different dimensions
    #[error("Units not commensurable: {lhs_unit} and {rhs_unit}")]
    UnitsNotCommensurable { lhs_unit: String, rhs_unit: String },

    /// Malformed interval bounds
    #[error("Invalid interval: {message}")]
    InvalidInterval { message: String },

    /// Invalid argument, mismatched literal kinds, cross-domain enum use, bad payload
    #[error("{message}")]
    Value { message: String },

    /// Deliberately unsupported branch of an operation
    #[error("Not implemented: {message}")]
    NotImplemented { message: String },

    /// Error raised by the unit model
    #[error(transparent)]
    Unit(UnitError),

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operator applied to the wrong number of operands
    #[error("{operator} expects {expected} operand(s), found {found}")]
    Arity {
        operator: String,
        expected: String,
        found: usize,
    },
}

impl LiteralError {
    /// Create a not-singleton error describing what was found instead
    pub fn not_singleton(found: impl ToString) -> Self {
        Self::NotSingleton {
            found: found.to_string(),
        }
    }

    /// Create a units-not-commensurable error from the display form of both units
    pub fn units_not_commensurable(lhs: impl ToString, rhs: impl ToString) -> Self {
        Self::UnitsNotCommensurable {
            lhs_unit: lhs.to_string(),
            rhs_unit: rhs.to_string(),
        }
    }

    /// Create an invalid-interval error
    pub fn invalid_interval(message: impl Into<String>) -> Self {
        Self::InvalidInterval {
            message: message.into(),
        }
    }

    /// Create a value error
    pub fn value(message: impl Into<String>) -> Self {
        Self::Value {
            message: message.into(),
        }
    }

    /// Create a not-implemented error
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented {
            message: message.into(),
        }
    }

    /// Error for operations between literals of different kinds
    pub fn incompatible_types(lhs: impl std::fmt::Display, rhs: impl std::fmt::Display) -> Self {
        Self::value(format!("incompatible types: {lhs} and {rhs}"))
    }

    /// Create an arity error
    pub fn arity(operator: impl Into<String>, expected: impl Into<String>, found: usize) -> Self {
        Self::Arity {
            operator: operator.into(),
            expected: expected.into(),
            found,
        }
    }
}

impl From<UnitError> for LiteralError {
    fn from(err: UnitError) -> Self {
        match err {
            UnitError::NotCommensurable { lhs, rhs } => Self::UnitsNotCommensurable {
                lhs_unit: lhs,
                rhs_unit: rhs,
            },
            other => Self::Unit(other),
        }
    }
}
