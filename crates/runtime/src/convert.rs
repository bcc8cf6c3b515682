use crate::value::Value;
use dafny_core::{Fault, Int, fault};

/// Convert any integral runtime value to an `Int`.
///
/// Accepts `Int`, every native width, characters (their code point) and
/// string-flagged sequences holding an integer literal.
pub fn int_of_any(value: &Value) -> Int {
    match value {
        Value::Int(n) => n.clone(),
        Value::Native(n) => n.to_int(),
        Value::Char(c) => Int::from(c.code()),
        Value::Seq(s) => match s.text() {
            Some(text) => Int::of_string(&text),
            None => unsupported(value),
        },
        other => unsupported(other),
    }
}

fn unsupported(value: &Value) -> ! {
    fault(Fault::UnsupportedConversion {
        target: "int",
        found: value.kind_name().to_string(),
    })
}
