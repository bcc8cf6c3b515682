//! The generic equality protocol
//!
//! One total, symmetric equality over the whole value universe. Every
//! container's deduplication, key lookup and comparison goes through
//! `are_equal`, never through hashing.
//!
//! - `Null` equals only `Null`
//! - values of different kinds are never equal (no fault)
//! - collections, Int, Real, Tuple and Array use their structural equality
//! - objects and functions compare by identity

use crate::value::Value;
use std::sync::Arc;

pub fn are_equal(x: &Value, y: &Value) -> bool {
    match (x, y) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Char(a), Value::Char(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Real(a), Value::Real(b)) => a == b,
        (Value::Native(a), Value::Native(b)) => a == b,
        (Value::Seq(a), Value::Seq(b)) => a.equals(b),
        (Value::Set(a), Value::Set(b)) => a.equals(b),
        (Value::MultiSet(a), Value::MultiSet(b)) => a.equals(b),
        (Value::Map(a), Value::Map(b)) => a.equals(b),
        (Value::Tuple(a), Value::Tuple(b)) => a.equals(b),
        (Value::Array(a), Value::Array(b)) => a.equals(b),
        (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
        (Value::Func(a), Value::Func(b)) => a.ptr_eq(b),
        _ => false,
    }
}

/// Element-wise equality of two slices of equal length
pub fn slices_equal(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| are_equal(x, y))
}

/// Whether `value` occurs in `values` under the equality protocol
pub fn contains(values: impl IntoIterator<Item = impl AsRef<Value>>, value: &Value) -> bool {
    values.into_iter().any(|v| are_equal(v.as_ref(), value))
}

impl AsRef<Value> for Value {
    fn as_ref(&self) -> &Value {
        self
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        are_equal(self, other)
    }
}

impl Eq for Value {}
