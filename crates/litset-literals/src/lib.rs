//! Literal value sets and their algebra
//!
//! A literal is the set of values a parameter may still take. This crate
//! implements the set types and the operations a constraint solver folds over
//! them:
//!
//! - **Numbers**: [`Quantity`], a canonical [`IntervalSet`] of closed
//!   [`Interval`]s carrying a [`litset_units::Unit`]
//! - **Booleans**: [`BooleanSet`] with tri-valued `and`/`or`/`not`
//! - **Strings** and **Counts**: [`StringSet`] and [`CountSet`]
//! - **Enums**: [`EnumValueSet`] over a domain declared in an [`EnumRegistry`]
//!
//! [`LiteralValue`] is the closed sum over all kinds. Literals are immutable:
//! every operation returns a new value.
//!
//! # Example
//!
//! ```
//! use litset_literals::{fold, IntervalSet, LiteralValue, Operator, Quantity};
//! use litset_units::{UnitDecoder, UnitRegistry};
//!
//! let units = UnitRegistry::si();
//! let celsius = units.decode_symbol("°C").unwrap();
//! let kelvin = units.decode_symbol("K").unwrap();
//!
//! let a: LiteralValue = Quantity::singleton(0.0, kelvin).unwrap().into();
//! let b: LiteralValue = Quantity::singleton(0.0, celsius).unwrap().into();
//! let sum = fold(Operator::Add, &[a, b]).unwrap();
//! assert_eq!(sum.pretty_str(), "[273.15] K");
//! ```
//!
//! # Rounding
//!
//! Interval bounds are stored rounded to 15 significant digits, whatever
//! their magnitude, and sums that cancel to rounding error become exact
//! zeros. Subset, equality and comparison tests use a [`Precision`] with
//! relative and absolute tolerances, so a residue like `2.77e-17` still
//! compares equal to zero.
//!
//! # Comparisons
//!
//! Comparing two interval sets yields a [`BooleanSet`]: `{true}` when the
//! relation holds for every pair of elements, `{false}` when it holds for
//! none and `{true, false}` otherwise.

pub mod arena;
pub mod boolean_set;
pub mod discrete_set;
pub mod enum_set;
pub mod error;
pub mod fold;
pub mod interval;
pub mod interval_set;
pub mod literal;
pub mod precision;
pub mod quantity;
pub mod serialize;

pub use arena::{Handle, LiteralArena, LiteralStore};
pub use boolean_set::BooleanSet;
pub use discrete_set::{CountSet, DiscreteSet, StringSet};
pub use enum_set::{EnumDomain, EnumDomainId, EnumMember, EnumRegistry, EnumValueSet};
pub use error::{LiteralError, LiteralResult};
pub use fold::{Arity, Operator, fold, fold_handles, fold_with};
pub use interval::Interval;
pub use interval_set::IntervalSet;
pub use literal::{LiteralKind, LiteralScalar, LiteralValue};
pub use precision::Precision;
pub use quantity::Quantity;
pub use serialize::DeserializeContext;
