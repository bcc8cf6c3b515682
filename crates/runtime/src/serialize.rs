//! Serialization of runtime values
//!
//! `TypedValue` is an owned, serde-serializable mirror of the data-only
//! part of the value universe. It is used to exchange values with test
//! harnesses and other processes and to snapshot program state.
//!
//! # What can be serialized
//!
//! Everything except objects and functions: those carry identity or code,
//! not data. An array is serialized as a snapshot of its shape and cells,
//! and deserializing it yields a fresh array with no shared identity.
//!
//! # Representation
//!
//! Integers and rational components are stored as decimal strings so the
//! encoding does not depend on the big-number library. Collection order is
//! the runtime's stored order, so the same value always encodes to the
//! same bytes.
//!
//! Uses bincode for the compact binary form and serde_json for a readable
//! one.

use crate::array::Array;
use crate::map::Map;
use crate::multiset::MultiSet;
use crate::seq::Seq;
use crate::set::Set;
use crate::tuple::Tuple;
use crate::value::{NativeInt, Value};
use dafny_core::{Char, Int, Real};
use serde::{Deserialize, Serialize};

/// Error during serialization/deserialization
#[derive(Debug)]
pub enum SerializeError {
    /// Objects have identity, not data
    ObjectNotSerializable,
    /// Functions are code, not data
    FunctionNotSerializable,
    /// Bincode encoding/decoding error (preserves original error for debugging)
    BincodeError(Box<bincode::Error>),
    JsonError(serde_json::Error),
    /// Structurally valid input that does not describe a runtime value
    InvalidData(String),
}

impl std::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializeError::ObjectNotSerializable => {
                write!(f, "Objects cannot be serialized - identity is not data")
            }
            SerializeError::FunctionNotSerializable => {
                write!(f, "Functions cannot be serialized - code is not data")
            }
            SerializeError::BincodeError(e) => write!(f, "Bincode error: {}", e),
            SerializeError::JsonError(e) => write!(f, "JSON error: {}", e),
            SerializeError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
        }
    }
}

impl std::error::Error for SerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerializeError::BincodeError(e) => Some(e.as_ref()),
            SerializeError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bincode::Error> for SerializeError {
    fn from(e: bincode::Error) -> Self {
        SerializeError::BincodeError(Box::new(e))
    }
}

impl From<serde_json::Error> for SerializeError {
    fn from(e: serde_json::Error) -> Self {
        SerializeError::JsonError(e)
    }
}

/// Serializable representation of runtime values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TypedValue {
    Null,
    Bool(bool),
    /// Code point
    Char(u32),
    /// Decimal digits with optional leading `-`
    Int(String),
    Real {
        num: String,
        den: String,
    },
    Native(NativeInt),
    Seq {
        values: Vec<TypedValue>,
        is_string: bool,
    },
    Set(Vec<TypedValue>),
    /// Distinct elements with their (positive) multiplicities
    MultiSet(Vec<(TypedValue, String)>),
    Map(Vec<(TypedValue, TypedValue)>),
    Tuple(Vec<TypedValue>),
    Array {
        dims: Vec<usize>,
        cells: Vec<TypedValue>,
    },
}

fn typed_all<'a>(
    values: impl IntoIterator<Item = &'a Value>,
) -> Result<Vec<TypedValue>, SerializeError> {
    values.into_iter().map(TypedValue::from_value).collect()
}

fn values_all(typed: &[TypedValue]) -> Result<Vec<Value>, SerializeError> {
    typed.iter().map(TypedValue::to_value).collect()
}

fn parse_int(text: &str) -> Result<Int, SerializeError> {
    Int::parse(text).map_err(|f| SerializeError::InvalidData(f.to_string()))
}

impl TypedValue {
    /// Convert from runtime Value
    ///
    /// Returns error if Value contains an object or a function anywhere
    /// inside it.
    pub fn from_value(value: &Value) -> Result<Self, SerializeError> {
        Ok(match value {
            Value::Null => TypedValue::Null,
            Value::Bool(b) => TypedValue::Bool(*b),
            Value::Char(c) => TypedValue::Char(c.code()),
            Value::Int(n) => TypedValue::Int(n.to_string()),
            Value::Real(r) => TypedValue::Real {
                num: r.num().to_string(),
                den: r.denom().to_string(),
            },
            Value::Native(n) => TypedValue::Native(*n),
            Value::Seq(s) => TypedValue::Seq {
                values: typed_all(s.iter())?,
                is_string: s.is_string(),
            },
            Value::Set(s) => TypedValue::Set(typed_all(s.elements())?),
            Value::MultiSet(m) => TypedValue::MultiSet(
                m.entries()
                    .map(|(v, n)| Ok((TypedValue::from_value(v)?, n.to_string())))
                    .collect::<Result<_, SerializeError>>()?,
            ),
            Value::Map(m) => TypedValue::Map(
                m.iter()
                    .map(|(k, v)| Ok((TypedValue::from_value(k)?, TypedValue::from_value(v)?)))
                    .collect::<Result<_, SerializeError>>()?,
            ),
            Value::Tuple(t) => TypedValue::Tuple(typed_all(t.iter())?),
            Value::Array(a) => TypedValue::Array {
                dims: a.dims().to_vec(),
                cells: typed_all(a.snapshot().iter())?,
            },
            Value::Object(_) => return Err(SerializeError::ObjectNotSerializable),
            Value::Func(_) => return Err(SerializeError::FunctionNotSerializable),
        })
    }

    /// Convert to runtime Value
    ///
    /// Fails on data no runtime value could have produced: malformed
    /// numbers, a zero denominator, a non-positive multiplicity, or an
    /// array whose cell count does not match its shape.
    pub fn to_value(&self) -> Result<Value, SerializeError> {
        Ok(match self {
            TypedValue::Null => Value::Null,
            TypedValue::Bool(b) => Value::Bool(*b),
            TypedValue::Char(c) => Value::Char(Char(*c)),
            TypedValue::Int(text) => Value::Int(parse_int(text)?),
            TypedValue::Real { num, den } => {
                let den = parse_int(den)?;
                if den.is_zero() {
                    return Err(SerializeError::InvalidData(
                        "real with zero denominator".to_string(),
                    ));
                }
                Value::Real(Real::of_frac(&parse_int(num)?, &den))
            }
            TypedValue::Native(n) => Value::Native(*n),
            TypedValue::Seq { values, is_string } => {
                Value::Seq(Seq::of(values_all(values)?).set_string(*is_string))
            }
            TypedValue::Set(values) => Value::Set(Set::of(values_all(values)?)),
            TypedValue::MultiSet(entries) => {
                let mut ms = MultiSet::empty();
                for (v, n) in entries {
                    let n = parse_int(n)?;
                    if n.sign() <= 0 {
                        return Err(SerializeError::InvalidData(format!(
                            "multiset multiplicity {}",
                            n
                        )));
                    }
                    ms = ms.update(v.to_value()?, &n);
                }
                Value::MultiSet(ms)
            }
            TypedValue::Map(entries) => {
                let pairs = entries
                    .iter()
                    .map(|(k, v)| Ok((k.to_value()?, v.to_value()?)))
                    .collect::<Result<Vec<_>, SerializeError>>()?;
                Value::Map(Map::of(pairs))
            }
            TypedValue::Tuple(values) => Value::Tuple(Tuple::of(values_all(values)?)),
            TypedValue::Array { dims, cells } => {
                let array = Array::from_shape(dims, values_all(cells)?).ok_or_else(|| {
                    SerializeError::InvalidData(format!(
                        "{} cells for array of shape {:?}",
                        cells.len(),
                        dims
                    ))
                })?;
                Value::Array(array)
            }
        })
    }

    /// Serialize to binary format (bincode)
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        bincode::serialize(self).map_err(SerializeError::from)
    }

    /// Deserialize from binary format (bincode)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError> {
        bincode::deserialize(bytes).map_err(SerializeError::from)
    }

    /// Human-readable JSON, for debugging output
    pub fn to_json(&self) -> Result<String, SerializeError> {
        serde_json::to_string(self).map_err(SerializeError::from)
    }
}

/// Extension trait for Value to add serialization methods
pub trait ValueSerialize: Sized {
    /// Convert to serializable TypedValue
    fn to_typed(&self) -> Result<TypedValue, SerializeError>;

    /// Serialize directly to bytes
    fn to_bytes(&self) -> Result<Vec<u8>, SerializeError>;

    fn to_json(&self) -> Result<String, SerializeError>;

    /// Rebuild a value from bytes written by `to_bytes`
    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError>;
}

impl ValueSerialize for Value {
    fn to_typed(&self) -> Result<TypedValue, SerializeError> {
        TypedValue::from_value(self)
    }

    fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        TypedValue::from_value(self)?.to_bytes()
    }

    fn to_json(&self) -> Result<String, SerializeError> {
        TypedValue::from_value(self)?.to_json()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError> {
        TypedValue::from_bytes(bytes)?.to_value()
    }
}
