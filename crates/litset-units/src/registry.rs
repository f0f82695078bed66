//! Symbol lookup for units
//!
//! [`UnitRegistry::si`] knows the SI base and derived units, a handful of
//! customary units (°C, degrees, hours, bytes, ...) and accepts SI prefixes
//! (`k`, `m`, `µ`/`u`, ...) and, for information units, binary prefixes
//! (`Ki`, `Mi`, ...).

use std::f64::consts::PI;

use indexmap::IndexMap;

use crate::basis::{BasisVector, Dimension};
use crate::error::{UnitError, UnitResult};
use crate::unit::{SerializedUnit, Unit};

/// Decoding of unit symbols, injected wherever serialized units are read
pub trait UnitDecoder {
    /// Resolve a symbol such as `kΩ` or `°C`
    fn decode_symbol(&self, symbol: &str) -> UnitResult<Unit>;

    /// Resolve a wire-format unit
    fn decode(&self, serialized: &SerializedUnit) -> UnitResult<Unit> {
        match serialized {
            SerializedUnit::Symbol(symbol) => self.decode_symbol(symbol),
            SerializedUnit::Object(object) => {
                if !object.multiplier.is_finite() || object.multiplier == 0.0 {
                    return Err(UnitError::malformed(format!(
                        "multiplier must be finite and non-zero, got {}",
                        object.multiplier
                    )));
                }
                Ok(Unit::from(object.clone()))
            }
        }
    }
}

/// Which prefixes a registered unit accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixKind {
    None,
    Si,
    /// SI and binary prefixes
    SiAndBinary,
}

pub const SI_PREFIXES: &[(&str, f64)] = &[
    ("Q", 1e30),
    ("R", 1e27),
    ("Y", 1e24),
    ("Z", 1e21),
    ("E", 1e18),
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("h", 1e2),
    ("da", 1e1),
    ("d", 1e-1),
    ("c", 1e-2),
    ("m", 1e-3),
    ("µ", 1e-6),
    ("u", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
    ("a", 1e-18),
    ("z", 1e-21),
    ("y", 1e-24),
    ("r", 1e-27),
    ("q", 1e-30),
];

pub const BINARY_PREFIXES: &[(&str, f64)] = &[
    ("Ki", 1024.0),
    ("Mi", 1_048_576.0),
    ("Gi", 1_073_741_824.0),
    ("Ti", 1_099_511_627_776.0),
    ("Pi", 1_125_899_906_842_624.0),
    ("Ei", 1_152_921_504_606_846_976.0),
    ("Zi", 1_180_591_620_717_411_303_424.0),
    ("Yi", 1_208_925_819_614_629_174_706_176.0),
];

#[derive(Debug, Clone)]
struct Entry {
    unit: Unit,
    prefixes: PrefixKind,
}

/// Table of known unit symbols
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: IndexMap<String, Entry>,
}

impl UnitRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the SI system and common customary units
    pub fn si() -> Self {
        use Dimension::{
            Ampere, Bit, Candela, Kelvin, Kilogram, Meter, Mole, Radian, Second, Steradian,
        };

        let o = BasisVector::ORIGIN;
        let mut registry = Self::new();
        let mut add =
            |symbols: &[&str], basis: BasisVector, multiplier: f64, offset: f64, prefixes| {
                registry.register(symbols, basis, multiplier, offset, prefixes);
            };

        add(&["dimensionless"], o, 1.0, 0.0, PrefixKind::None);
        add(&["%"], o, 1e-2, 0.0, PrefixKind::None);
        add(&["ppm"], o, 1e-6, 0.0, PrefixKind::None);

        add(&["A"], o.with(Ampere, 1), 1.0, 0.0, PrefixKind::Si);
        add(&["s"], o.with(Second, 1), 1.0, 0.0, PrefixKind::Si);
        add(&["m"], o.with(Meter, 1), 1.0, 0.0, PrefixKind::Si);
        add(&["kg"], o.with(Kilogram, 1), 1.0, 0.0, PrefixKind::None);
        add(&["g"], o.with(Kilogram, 1), 1e-3, 0.0, PrefixKind::Si);
        add(&["K"], o.with(Kelvin, 1), 1.0, 0.0, PrefixKind::Si);
        add(&["mol"], o.with(Mole, 1), 1.0, 0.0, PrefixKind::Si);
        add(&["cd"], o.with(Candela, 1), 1.0, 0.0, PrefixKind::Si);
        add(&["rad"], o.with(Radian, 1), 1.0, 0.0, PrefixKind::Si);
        add(&["sr"], o.with(Steradian, 1), 1.0, 0.0, PrefixKind::Si);
        add(&["bit"], o.with(Bit, 1), 1.0, 0.0, PrefixKind::SiAndBinary);
        add(&["B", "byte"], o.with(Bit, 1), 8.0, 0.0, PrefixKind::SiAndBinary);

        let kg_m2 = o.with(Kilogram, 1).with(Meter, 2);
        add(&["Hz"], o.with(Second, -1), 1.0, 0.0, PrefixKind::Si);
        let newton = o.with(Kilogram, 1).with(Meter, 1).with(Second, -2);
        add(&["N"], newton, 1.0, 0.0, PrefixKind::Si);
        add(&["Pa"], newton.with(Meter, -1), 1.0, 0.0, PrefixKind::Si);
        add(&["J"], kg_m2.with(Second, -2), 1.0, 0.0, PrefixKind::Si);
        add(&["W"], kg_m2.with(Second, -3), 1.0, 0.0, PrefixKind::Si);
        add(&["C"], o.with(Ampere, 1).with(Second, 1), 1.0, 0.0, PrefixKind::Si);
        add(&["V"], kg_m2.with(Second, -3).with(Ampere, -1), 1.0, 0.0, PrefixKind::Si);
        add(
            &["F"],
            o.with(Kilogram, -1).with(Meter, -2).with(Second, 4).with(Ampere, 2),
            1.0,
            0.0,
            PrefixKind::Si,
        );
        add(&["Ω", "Ohm"], kg_m2.with(Second, -3).with(Ampere, -2), 1.0, 0.0, PrefixKind::Si);
        add(
            &["S"],
            o.with(Kilogram, -1).with(Meter, -2).with(Second, 3).with(Ampere, 2),
            1.0,
            0.0,
            PrefixKind::Si,
        );
        add(&["Wb"], kg_m2.with(Second, -2).with(Ampere, -1), 1.0, 0.0, PrefixKind::Si);
        let tesla = o.with(Kilogram, 1).with(Second, -2).with(Ampere, -1);
        add(&["T"], tesla, 1.0, 0.0, PrefixKind::Si);
        add(&["H"], kg_m2.with(Second, -2).with(Ampere, -2), 1.0, 0.0, PrefixKind::Si);
        add(&["lm"], o.with(Candela, 1).with(Steradian, 1), 1.0, 0.0, PrefixKind::Si);
        add(
            &["lx"],
            o.with(Candela, 1).with(Steradian, 1).with(Meter, -2),
            1.0,
            0.0,
            PrefixKind::Si,
        );
        add(&["Bq"], o.with(Second, -1), 1.0, 0.0, PrefixKind::Si);
        add(&["Gy"], o.with(Meter, 2).with(Second, -2), 1.0, 0.0, PrefixKind::Si);
        add(&["Sv"], o.with(Meter, 2).with(Second, -2), 1.0, 0.0, PrefixKind::Si);
        add(&["kat"], o.with(Mole, 1).with(Second, -1), 1.0, 0.0, PrefixKind::Si);

        add(&["°C", "degC"], o.with(Kelvin, 1), 1.0, 273.15, PrefixKind::None);
        add(&["°", "deg"], o.with(Radian, 1), PI / 180.0, 0.0, PrefixKind::None);
        add(&["arcmin"], o.with(Radian, 1), PI / 10_800.0, 0.0, PrefixKind::None);
        add(&["arcsec"], o.with(Radian, 1), PI / 648_000.0, 0.0, PrefixKind::None);
        add(&["min"], o.with(Second, 1), 60.0, 0.0, PrefixKind::None);
        add(&["h", "hour"], o.with(Second, 1), 3_600.0, 0.0, PrefixKind::None);
        add(&["day"], o.with(Second, 1), 86_400.0, 0.0, PrefixKind::None);
        add(&["week"], o.with(Second, 1), 604_800.0, 0.0, PrefixKind::None);
        add(&["month"], o.with(Second, 1), 2_629_746.0, 0.0, PrefixKind::None);
        add(&["year"], o.with(Second, 1), 31_556_952.0, 0.0, PrefixKind::None);
        add(&["L", "liter"], o.with(Meter, 3), 1e-3, 0.0, PrefixKind::Si);
        add(&["rpm", "RPM"], o.with(Second, -1), 1.0 / 60.0, 0.0, PrefixKind::None);

        registry
    }

    /// Register a unit under one or more symbols; the first symbol is the display name
    pub fn register(
        &mut self,
        symbols: &[&str],
        basis: BasisVector,
        multiplier: f64,
        offset: f64,
        prefixes: PrefixKind,
    ) {
        let Some(display) = symbols.first() else {
            return;
        };
        let unit = Unit::named(*display, basis, multiplier, offset);
        for symbol in symbols {
            self.units.insert(
                (*symbol).to_string(),
                Entry {
                    unit: unit.clone(),
                    prefixes,
                },
            );
        }
    }

    /// Unit registered under exactly this symbol
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        self.units.get(symbol).map(|e| &e.unit)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// First registered unit equal to `unit`, used to give derived units a name
    pub fn find_named(&self, unit: &Unit) -> Option<&Unit> {
        self.units.values().map(|e| &e.unit).find(|u| *u == unit)
    }

    fn prefix_factor(kind: PrefixKind, prefix: &str) -> Option<f64> {
        let lookup = |table: &[(&str, f64)]| {
            table
                .iter()
                .find(|(p, _)| *p == prefix)
                .map(|(_, factor)| *factor)
        };
        match kind {
            PrefixKind::None => None,
            PrefixKind::Si => lookup(SI_PREFIXES),
            PrefixKind::SiAndBinary => lookup(SI_PREFIXES).or_else(|| lookup(BINARY_PREFIXES)),
        }
    }
}

impl UnitDecoder for UnitRegistry {
    fn decode_symbol(&self, symbol: &str) -> UnitResult<Unit> {
        if let Some(unit) = self.get(symbol) {
            return Ok(unit.clone().with_symbol(symbol));
        }

        // prefer the longest unit symbol when several suffixes match
        let best = self
            .units
            .iter()
            .filter_map(|(known, entry)| {
                let prefix = symbol.strip_suffix(known.as_str())?;
                if prefix.is_empty() {
                    return None;
                }
                let factor = Self::prefix_factor(entry.prefixes, prefix)?;
                Some((known.len(), prefix, factor, entry))
            })
            .max_by_key(|(len, ..)| *len);

        match best {
            Some((_, prefix, factor, entry)) => {
                log::debug!("decoded unit symbol '{symbol}' as prefix '{prefix}' x{factor}");
                Ok(entry.unit.prefixed(prefix, factor).with_symbol(symbol))
            }
            None => Err(UnitError::unknown_symbol(symbol)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_symbols_win_over_prefixes() {
        let registry = UnitRegistry::si();
        let minute = registry.decode_symbol("min").unwrap();
        assert_eq!(minute.multiplier(), 60.0);
        let pascal = registry.decode_symbol("Pa").unwrap();
        assert_eq!(pascal.multiplier(), 1.0);
    }

    #[test]
    fn test_find_named() {
        let registry = UnitRegistry::si();
        let volt = registry.get("V").unwrap();
        let watt = volt.multiply(registry.get("A").unwrap());
        assert_eq!(registry.find_named(&watt).and_then(Unit::symbol), Some("W"));
    }

    #[test]
    fn test_unprefixable_units_reject_prefixes() {
        let registry = UnitRegistry::si();
        assert!(registry.decode_symbol("k°C").is_err());
        assert!(registry.decode_symbol("KiV").is_err());
    }
}
