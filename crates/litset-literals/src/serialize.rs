//! JSON wire format for literals
//!
//! Every literal is an adjacently tagged object `{"type": ..., "data": ...}`:
//!
//! ```text
//! Quantity_Interval_Disjoint | Quantity_Set_Discrete
//!     {"intervals": {"type": "Numeric_Interval_Disjoint",
//!                    "data": {"intervals": [{"type": "Numeric_Interval",
//!                                            "data": {"min": f64|null, "max": f64|null}}]}},
//!      "unit": "<symbol>" | {"basis_vector": {...}, "multiplier": f64, "offset": f64}}
//! BooleanSet  {"values": [bool, ...]}
//! StringSet   {"values": [str, ...]}
//! CountSet    {"values": [int, ...]}
//! EnumSet     {"elements": [{"name": str}], "enum": {"name": str, "values": {name: value}}}
//! ```
//!
//! Numeric bounds are written in the coherent SI unit of the quantity's
//! dimension; `null` stands for an infinite bound.

use indexmap::IndexMap;
use litset_units::{SerializedUnit, UnitDecoder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::boolean_set::BooleanSet;
use crate::discrete_set::{CountSet, StringSet};
use crate::enum_set::{EnumRegistry, EnumValueSet};
use crate::error::{LiteralError, LiteralResult};
use crate::interval_set::IntervalSet;
use crate::literal::LiteralValue;
use crate::quantity::Quantity;

pub const TAG_QUANTITY_DISJOINT: &str = "Quantity_Interval_Disjoint";
pub const TAG_QUANTITY_DISCRETE: &str = "Quantity_Set_Discrete";
pub const TAG_BOOLEAN_SET: &str = "BooleanSet";
pub const TAG_STRING_SET: &str = "StringSet";
pub const TAG_COUNT_SET: &str = "CountSet";
pub const TAG_ENUM_SET: &str = "EnumSet";

/// Collaborators needed to rebuild literals from the wire
pub struct DeserializeContext<'a> {
    /// Resolves unit symbols and unit objects
    pub units: &'a dyn UnitDecoder,
    /// Receives the enum domains carried by `EnumSet` payloads
    pub enums: &'a mut EnumRegistry,
}

impl<'a> DeserializeContext<'a> {
    pub fn new(units: &'a dyn UnitDecoder, enums: &'a mut EnumRegistry) -> Self {
        Self { units, enums }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data")]
enum WireLiteral {
    #[serde(rename = "Quantity_Interval_Disjoint")]
    QuantityIntervalDisjoint(WireQuantity),
    #[serde(rename = "Quantity_Set_Discrete")]
    QuantitySetDiscrete(WireQuantity),
    BooleanSet(WireValues<bool>),
    StringSet(WireValues<String>),
    CountSet(WireValues<i64>),
    EnumSet(WireEnumSet),
}

#[derive(Debug, Serialize, Deserialize)]
struct WireQuantity {
    intervals: WireNumericSet,
    unit: SerializedUnit,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
enum WireNumericSet {
    #[serde(rename = "Numeric_Interval_Disjoint")]
    Disjoint { intervals: Vec<WireInterval> },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
enum WireInterval {
    #[serde(rename = "Numeric_Interval")]
    Interval { min: Option<f64>, max: Option<f64> },
}

#[derive(Debug, Serialize, Deserialize)]
struct WireValues<T> {
    values: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireEnumSet {
    elements: Vec<WireEnumElement>,
    #[serde(rename = "enum")]
    domain: WireEnumDomain,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireEnumElement {
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireEnumDomain {
    name: String,
    values: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    tag: String,
    #[serde(default)]
    data: Value,
}

fn finite_or_none(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn wire_quantity(quantity: &Quantity) -> WireQuantity {
    let base = quantity.to_base_units();
    let intervals = base
        .values()
        .iter()
        .map(|i| WireInterval::Interval {
            min: finite_or_none(i.min()),
            max: finite_or_none(i.max()),
        })
        .collect();
    WireQuantity {
        intervals: WireNumericSet::Disjoint { intervals },
        unit: quantity.unit().to_serialized(),
    }
}

fn wire_literal(value: &LiteralValue) -> WireLiteral {
    match value {
        LiteralValue::Numbers(q) if q.values().is_discrete_set() => {
            WireLiteral::QuantitySetDiscrete(wire_quantity(q))
        }
        LiteralValue::Numbers(q) => WireLiteral::QuantityIntervalDisjoint(wire_quantity(q)),
        LiteralValue::Booleans(s) => WireLiteral::BooleanSet(WireValues {
            values: s.iter().copied().collect(),
        }),
        LiteralValue::Strings(s) => WireLiteral::StringSet(WireValues {
            values: s.iter().cloned().collect(),
        }),
        LiteralValue::Counts(s) => WireLiteral::CountSet(WireValues {
            values: s.iter().copied().collect(),
        }),
        LiteralValue::Enums(s) => WireLiteral::EnumSet(WireEnumSet {
            elements: s
                .members()
                .map(|m| WireEnumElement {
                    name: m.name.clone(),
                })
                .collect(),
            domain: WireEnumDomain {
                name: s.domain().name().to_string(),
                values: s
                    .domain()
                    .members()
                    .iter()
                    .map(|m| (m.name.clone(), m.value.clone()))
                    .collect(),
            },
        }),
    }
}

fn payload<T: for<'de> Deserialize<'de>>(tag: &str, data: Value) -> LiteralResult<T> {
    serde_json::from_value(data)
        .map_err(|err| LiteralError::value(format!("invalid {tag} payload: {err}")))
}

impl LiteralValue {
    /// Wire tag this literal serializes under
    pub fn type_tag(&self) -> &'static str {
        match self {
            LiteralValue::Numbers(q) if q.values().is_discrete_set() => TAG_QUANTITY_DISCRETE,
            LiteralValue::Numbers(_) => TAG_QUANTITY_DISJOINT,
            LiteralValue::Booleans(_) => TAG_BOOLEAN_SET,
            LiteralValue::Strings(_) => TAG_STRING_SET,
            LiteralValue::Counts(_) => TAG_COUNT_SET,
            LiteralValue::Enums(_) => TAG_ENUM_SET,
        }
    }

    /// Tagged JSON object for this literal
    pub fn serialize(&self) -> LiteralResult<Value> {
        Ok(serde_json::to_value(wire_literal(self))?)
    }

    pub fn to_json(&self) -> LiteralResult<String> {
        Ok(serde_json::to_string(&wire_literal(self))?)
    }

    /// Rebuild a literal from its type tag and `data` payload
    pub fn deserialize(
        tag: &str,
        data: Value,
        ctx: &mut DeserializeContext<'_>,
    ) -> LiteralResult<LiteralValue> {
        log::debug!("deserializing {tag} literal");
        match tag {
            TAG_QUANTITY_DISJOINT | TAG_QUANTITY_DISCRETE => {
                let wire: WireQuantity = payload(tag, data)?;
                let unit = ctx.units.decode(&wire.unit)?;
                let WireNumericSet::Disjoint { intervals } = wire.intervals;
                let base = IntervalSet::from_values(intervals.into_iter().map(
                    |WireInterval::Interval { min, max }| {
                        (
                            min.unwrap_or(f64::NEG_INFINITY),
                            max.unwrap_or(f64::INFINITY),
                        )
                    },
                ))?;
                let (scale, offset) = unit.from_base_affine();
                Ok(Quantity::new(base.affine(scale, offset), unit).into())
            }
            TAG_BOOLEAN_SET => {
                let wire: WireValues<bool> = payload(tag, data)?;
                Ok(BooleanSet::new(wire.values).into())
            }
            TAG_STRING_SET => {
                let wire: WireValues<String> = payload(tag, data)?;
                Ok(StringSet::new(wire.values).into())
            }
            TAG_COUNT_SET => {
                let wire: WireValues<i64> = payload(tag, data)?;
                Ok(CountSet::new(wire.values).into())
            }
            TAG_ENUM_SET => {
                let wire: WireEnumSet = payload(tag, data)?;
                let domain = ctx.enums.declare(wire.domain.name, wire.domain.values)?;
                let set =
                    EnumValueSet::new(domain, wire.elements.iter().map(|e| e.name.as_str()))?;
                Ok(set.into())
            }
            other => Err(LiteralError::value(format!(
                "unknown literal type tag '{other}'"
            ))),
        }
    }

    /// Rebuild a literal from a full tagged JSON object
    pub fn from_json_value(
        value: Value,
        ctx: &mut DeserializeContext<'_>,
    ) -> LiteralResult<LiteralValue> {
        let envelope: Envelope = serde_json::from_value(value)
            .map_err(|err| LiteralError::value(format!("invalid literal envelope: {err}")))?;
        Self::deserialize(&envelope.tag, envelope.data, ctx)
    }

    pub fn from_json(json: &str, ctx: &mut DeserializeContext<'_>) -> LiteralResult<LiteralValue> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value, ctx)
    }
}
