//! Errors raised by the unit model

use thiserror::Error;

/// Result type for unit operations
pub type UnitResult<T> = Result<T, UnitError>;

/// Errors that can occur while combining, converting or decoding units
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnitError {
    /// The two units describe different physical dimensions
    #[error("Units {lhs} and {rhs} are not commensurable")]
    NotCommensurable { lhs: String, rhs: String },

    /// No registered unit (with or without prefix) matches the symbol
    #[error("Unknown unit symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    /// Raising a unit to this exponent would leave a fractional dimension
    #[error("Cannot raise {unit} to non-integral power {exponent}")]
    NonIntegralPower { unit: String, exponent: f64 },

    /// A serialized unit that could not be interpreted
    #[error("Malformed unit: {message}")]
    Malformed { message: String },
}

impl UnitError {
    /// Create a not-commensurable error from the display form of both units
    pub fn not_commensurable(lhs: impl ToString, rhs: impl ToString) -> Self {
        Self::NotCommensurable {
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
        }
    }

    /// Create an unknown-symbol error
    pub fn unknown_symbol(symbol: impl Into<String>) -> Self {
        Self::UnknownSymbol {
            symbol: symbol.into(),
        }
    }

    /// Create a malformed-unit error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}
