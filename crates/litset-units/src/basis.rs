//! Dimension exponents of a unit
//!
//! A [`BasisVector`] records the exponent of each base dimension, so `m·s⁻²`
//! is `{meter: 1, second: -2}`. Two units are commensurable exactly when their
//! basis vectors are equal.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// Base dimensions tracked by the unit model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Ampere,
    Second,
    Meter,
    Kilogram,
    Kelvin,
    Mole,
    Candela,
    Radian,
    Steradian,
    Bit,
}

impl Dimension {
    /// Every dimension, in basis-vector order
    pub const ALL: [Dimension; 10] = [
        Dimension::Ampere,
        Dimension::Second,
        Dimension::Meter,
        Dimension::Kilogram,
        Dimension::Kelvin,
        Dimension::Mole,
        Dimension::Candela,
        Dimension::Radian,
        Dimension::Steradian,
        Dimension::Bit,
    ];

    /// Name used as the key in serialized basis vectors
    pub const fn name(self) -> &'static str {
        match self {
            Dimension::Ampere => "ampere",
            Dimension::Second => "second",
            Dimension::Meter => "meter",
            Dimension::Kilogram => "kilogram",
            Dimension::Kelvin => "kelvin",
            Dimension::Mole => "mole",
            Dimension::Candela => "candela",
            Dimension::Radian => "radian",
            Dimension::Steradian => "steradian",
            Dimension::Bit => "bit",
        }
    }

    /// Symbol of the coherent base unit
    pub const fn symbol(self) -> &'static str {
        match self {
            Dimension::Ampere => "A",
            Dimension::Second => "s",
            Dimension::Meter => "m",
            Dimension::Kilogram => "kg",
            Dimension::Kelvin => "K",
            Dimension::Mole => "mol",
            Dimension::Candela => "cd",
            Dimension::Radian => "rad",
            Dimension::Steradian => "sr",
            Dimension::Bit => "bit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

/// Exponents of the base dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(
    into = "IndexMap<String, i32>",
    try_from = "IndexMap<String, i32>"
)]
pub struct BasisVector([i32; Dimension::ALL.len()]);

impl BasisVector {
    /// The dimensionless basis
    pub const ORIGIN: BasisVector = BasisVector([0; Dimension::ALL.len()]);

    /// Basis of a single base dimension with exponent one
    pub const fn of(dimension: Dimension) -> Self {
        Self::ORIGIN.with(dimension, 1)
    }

    /// Copy of this basis with `dimension` set to `exponent`
    pub const fn with(mut self, dimension: Dimension, exponent: i32) -> Self {
        self.0[dimension as usize] = exponent;
        self
    }

    pub const fn get(&self, dimension: Dimension) -> i32 {
        self.0[dimension as usize]
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }

    /// Basis of a product of units
    pub fn add(&self, other: &BasisVector) -> BasisVector {
        self.zip_with(other, |a, b| a + b)
    }

    /// Basis of a quotient of units
    pub fn subtract(&self, other: &BasisVector) -> BasisVector {
        self.zip_with(other, |a, b| a - b)
    }

    /// Basis of a unit raised to an integral power
    pub fn scale(&self, factor: i32) -> BasisVector {
        let mut out = *self;
        out.0.iter_mut().for_each(|e| *e *= factor);
        out
    }

    /// Basis of a unit raised to a fractional power, if every exponent stays integral
    pub fn scale_fraction(&self, factor: f64) -> Option<BasisVector> {
        let mut out = Self::ORIGIN;
        for (slot, exponent) in out.0.iter_mut().zip(self.0) {
            let scaled = f64::from(exponent) * factor;
            if scaled.fract() != 0.0 || !scaled.is_finite() {
                return None;
            }
            *slot = scaled as i32;
        }
        Some(out)
    }

    /// Non-zero exponents in basis order
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, i32)> + '_ {
        Dimension::ALL
            .into_iter()
            .map(|d| (d, self.get(d)))
            .filter(|(_, e)| *e != 0)
    }

    fn zip_with(&self, other: &BasisVector, f: impl Fn(i32, i32) -> i32) -> BasisVector {
        let mut out = Self::ORIGIN;
        for (i, slot) in out.0.iter_mut().enumerate() {
            *slot = f(self.0[i], other.0[i]);
        }
        out
    }
}

impl fmt::Display for BasisVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_origin() {
            return write!(f, "1");
        }
        let mut first = true;
        for (dimension, exponent) in self.iter() {
            if !first {
                write!(f, "·")?;
            }
            first = false;
            match exponent {
                1 => write!(f, "{}", dimension.symbol())?,
                e => write!(f, "{}^{}", dimension.symbol(), e)?,
            }
        }
        Ok(())
    }
}

impl From<BasisVector> for IndexMap<String, i32> {
    fn from(basis: BasisVector) -> Self {
        basis
            .iter()
            .map(|(d, e)| (d.name().to_string(), e))
            .collect()
    }
}

impl TryFrom<IndexMap<String, i32>> for BasisVector {
    type Error = UnitError;

    fn try_from(map: IndexMap<String, i32>) -> Result<Self, Self::Error> {
        map.into_iter().try_fold(Self::ORIGIN, |basis, (name, exponent)| {
            let dimension = Dimension::from_name(&name)
                .ok_or_else(|| UnitError::malformed(format!("unknown dimension '{name}'")))?;
            Ok(basis.with(dimension, exponent))
        })
    }
}
