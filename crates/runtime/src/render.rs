//! Canonical text rendering
//!
//! Every runtime for the language prints identical text for identical
//! values, so these formats are fixed:
//!
//! | Value | Text |
//! |---|---|
//! | null | `null` |
//! | char | the character itself |
//! | string-flagged seq | the characters, unquoted |
//! | other seq | `[a, b]` |
//! | set | `{a, b}` |
//! | multiset | `multiset{a, a, b}` |
//! | map | `map[k := v, ...]` |
//! | tuple | `(a, b)` |
//! | array | one bracket level per dimension |
//! | function | its type name |

use crate::array::Array;
use crate::map::Map;
use crate::multiset::MultiSet;
use crate::seq::Seq;
use crate::set::Set;
use crate::tuple::Tuple;
use crate::value::{NativeInt, Value};
use std::fmt::{self, Display, Formatter, Write as _};
use std::io::Write as _;

fn write_elements<'a>(
    f: &mut Formatter<'_>,
    elements: impl IntoIterator<Item = &'a Value>,
) -> fmt::Result {
    for (i, v) in elements.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", v)?;
    }
    Ok(())
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::Int(n) => write!(f, "{}", n),
            Value::Real(r) => write!(f, "{}", r),
            Value::Native(n) => write!(f, "{}", n),
            Value::Seq(s) => write!(f, "{}", s),
            Value::Set(s) => write!(f, "{}", s),
            Value::MultiSet(m) => write!(f, "{}", m),
            Value::Map(m) => write!(f, "{}", m),
            Value::Tuple(t) => write!(f, "{}", t),
            Value::Array(a) => write!(f, "{}", a),
            Value::Object(o) => f.write_str(o.type_name()),
            Value::Func(func) => f.write_str(func.type_name()),
        }
    }
}

impl Display for NativeInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NativeInt::I8(n) => write!(f, "{}", n),
            NativeInt::I16(n) => write!(f, "{}", n),
            NativeInt::I32(n) => write!(f, "{}", n),
            NativeInt::I64(n) => write!(f, "{}", n),
            NativeInt::U8(n) => write!(f, "{}", n),
            NativeInt::U16(n) => write!(f, "{}", n),
            NativeInt::U32(n) => write!(f, "{}", n),
            NativeInt::U64(n) => write!(f, "{}", n),
        }
    }
}

impl Display for Seq {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_string() {
            return self.iter().try_for_each(|c| write!(f, "{}", c));
        }
        f.write_char('[')?;
        write_elements(f, self.iter())?;
        f.write_char(']')
    }
}

impl Display for Set {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        write_elements(f, self.elements())?;
        f.write_char('}')
    }
}

impl Display for MultiSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("multiset{")?;
        for (i, v) in self.elements().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_char('}')
    }
}

impl Display for Map {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("map[")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} := {}", k, v)?;
        }
        f.write_char(']')
    }
}

impl Display for Tuple {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        write_elements(f, self.iter())?;
        f.write_char(')')
    }
}

impl Display for Array {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let cells = self.snapshot();
        write_subspace(f, self.dims(), &cells)
    }
}

/// Render the row-major block `cells` whose shape is `dims`
fn write_subspace(f: &mut Formatter<'_>, dims: &[usize], cells: &[Value]) -> fmt::Result {
    let Some((&outer, inner)) = dims.split_first() else {
        return match cells.first() {
            Some(v) => write!(f, "{}", v),
            None => Ok(()),
        };
    };
    let block: usize = inner.iter().product();
    f.write_char('[')?;
    for i in 0..outer {
        if i > 0 {
            f.write_str(", ")?;
        }
        let start = i * block;
        write_subspace(f, inner, &cells[start..start + block])?;
    }
    f.write_char(']')
}

/// The canonical rendering of `value`
pub fn string(value: &Value) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write!(out, "{}", value);
    out
}

/// Write the canonical rendering of `value` to stdout, without a newline
pub fn print(value: &Value) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = write!(stdout, "{}", value).and_then(|_| stdout.flush()) {
        tracing::warn!(error = %e, "failed to write to stdout");
    }
}
