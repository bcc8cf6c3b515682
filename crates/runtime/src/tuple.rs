use crate::equality::slices_equal;
use crate::value::Value;
use dafny_core::{Fault, fault};
use std::sync::Arc;

/// Fixed-arity heterogeneous immutable value
#[derive(Debug, Clone)]
pub struct Tuple {
    slots: Arc<[Value]>,
}

impl Tuple {
    pub fn of(values: impl IntoIterator<Item = Value>) -> Tuple {
        Tuple {
            slots: values.into_iter().collect(),
        }
    }

    pub fn pair(first: Value, second: Value) -> Tuple {
        Tuple::of([first, second])
    }

    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    pub fn index(&self, i: usize) -> &Value {
        match self.slots.get(i) {
            Some(v) => v,
            None => fault(Fault::IndexOutOfRange {
                index: i.to_string(),
                len: self.arity(),
            }),
        }
    }

    pub fn equals(&self, other: &Tuple) -> bool {
        Arc::ptr_eq(&self.slots, &other.slots) || slices_equal(&self.slots, &other.slots)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dafny_core::Int;

    #[test]
    fn test_slots() {
        let t = Tuple::of([Value::from(true), Value::from('c'), Value::from(Int::two())]);
        assert_eq!(t.arity(), 3);
        assert_eq!(t.index(1), &Value::from('c'));
    }

    #[test]
    fn test_equality_per_slot() {
        let a = Tuple::pair(Value::from(Int::one()), Value::Null);
        let b = Tuple::pair(Value::from(Int::one()), Value::Null);
        let c = Tuple::pair(Value::from(Int::one()), Value::from(false));
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
        assert!(!a.equals(&Tuple::of([Value::from(Int::one())])));
    }

    #[test]
    #[should_panic(expected = "index out of range: 2 (length 2)")]
    fn test_index_out_of_range() {
        Tuple::pair(Value::Null, Value::Null).index(2);
    }
}
