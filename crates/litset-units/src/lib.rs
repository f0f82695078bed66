//! Physical units for litset literals
//!
//! This crate provides the unit model that numeric literals carry:
//!
//! - [`BasisVector`]: exponents of the base dimensions (ampere, second, meter, ...)
//! - [`Unit`]: a basis plus the multiplier/offset that map it onto coherent SI units
//! - [`UnitRegistry`]: symbol table with SI and binary prefix decoding
//!
//! Units are combined with [`Unit::multiply`], [`Unit::divide`] and
//! [`Unit::power`]; values move between commensurable units through the
//! `(scale, offset)` pair returned by [`Unit::conversion_to`].
//!
//! # Example
//!
//! ```
//! use litset_units::{UnitDecoder, UnitRegistry};
//!
//! let registry = UnitRegistry::si();
//! let kohm = registry.decode_symbol("kΩ").unwrap();
//! let ohm = registry.decode_symbol("Ohm").unwrap();
//! assert_eq!(kohm.conversion_to(&ohm).unwrap(), (1000.0, 0.0));
//! ```

pub mod basis;
pub mod error;
pub mod registry;
pub mod unit;

pub use basis::{BasisVector, Dimension};
pub use error::{UnitError, UnitResult};
pub use registry::{PrefixKind, UnitDecoder, UnitRegistry};
pub use unit::{SerializedUnit, Unit, UnitObject};
