//! Lazy iteration sources
//!
//! Quantifiers and comprehensions range over these. Each source is a small
//! state machine behind `Iterator`: single pass, not restartable.
//!
//! # Sources
//!
//! - `AllIntegers`: 0, 1, -1, 2, -2, ... forever
//! - `IntegerRange`: a half-open range whose bounds may be absent
//! - `AllChars`: every 16-bit character, 0 through 0xFFFF
//! - `AllBooleans`: false, then true
//! - `SingleValue`: exactly one value
//! - `iterate`: the elements of any iterable runtime value

use crate::value::Value;
use dafny_core::{Char, Fault, Int, fault};

/// Every integer, ordered by magnitude with the positive value first
#[derive(Debug, Clone, Default)]
pub struct AllIntegers {
    last: Option<Int>,
}

impl AllIntegers {
    pub fn new() -> AllIntegers {
        AllIntegers::default()
    }
}

impl Iterator for AllIntegers {
    type Item = Int;

    fn next(&mut self) -> Option<Int> {
        let next = match &self.last {
            None => Int::zero(),
            Some(n) if n.sign() > 0 => n.negated(),
            Some(n) => n.negated().plus(&Int::one()),
        };
        self.last = Some(next.clone());
        Some(next)
    }
}

/// Integers in `[lo, hi)`, where either bound may be absent (`Int::NIL`).
///
/// With `lo` present the range counts up from `lo`, stopping before `hi`
/// if there is one. With only `hi` present it counts down from `hi - 1`
/// forever. With neither it enumerates every integer.
#[derive(Debug, Clone)]
pub enum IntegerRange {
    Up { next: Int, hi: Int },
    Down { next: Int },
    All(AllIntegers),
}

impl IntegerRange {
    pub fn new(lo: &Int, hi: &Int) -> IntegerRange {
        match (lo.is_nil(), hi.is_nil()) {
            (false, _) => IntegerRange::Up {
                next: lo.clone(),
                hi: hi.clone(),
            },
            (true, false) => IntegerRange::Down {
                next: hi.minus(&Int::one()),
            },
            (true, true) => IntegerRange::All(AllIntegers::new()),
        }
    }
}

impl Iterator for IntegerRange {
    type Item = Int;

    fn next(&mut self) -> Option<Int> {
        match self {
            IntegerRange::Up { next, hi } => {
                if !hi.is_nil() && *next >= *hi {
                    return None;
                }
                let current = next.clone();
                *next = current.plus(&Int::one());
                Some(current)
            }
            IntegerRange::Down { next } => {
                let current = next.clone();
                *next = current.minus(&Int::one());
                Some(current)
            }
            IntegerRange::All(all) => all.next(),
        }
    }
}

/// Every character from U+0000 through U+FFFF
#[derive(Debug, Clone, Default)]
pub struct AllChars {
    next: u32,
}

impl AllChars {
    pub fn new() -> AllChars {
        AllChars::default()
    }
}

impl Iterator for AllChars {
    type Item = Char;

    fn next(&mut self) -> Option<Char> {
        if self.next > 0xFFFF {
            return None;
        }
        let c = Char(self.next);
        self.next += 1;
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = 0x10000usize.saturating_sub(self.next as usize);
        (left, Some(left))
    }
}

/// `false`, then `true`
#[derive(Debug, Clone, Default)]
pub struct AllBooleans {
    yielded: u8,
}

impl AllBooleans {
    pub fn new() -> AllBooleans {
        AllBooleans::default()
    }
}

impl Iterator for AllBooleans {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let b = match self.yielded {
            0 => false,
            1 => true,
            _ => return None,
        };
        self.yielded += 1;
        Some(b)
    }
}

/// Yields one value, then is exhausted
#[derive(Debug, Clone)]
pub struct SingleValue(Option<Value>);

impl SingleValue {
    pub fn new(value: Value) -> SingleValue {
        SingleValue(Some(value))
    }
}

impl Iterator for SingleValue {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.0.take()
    }
}

/// An iteration source over runtime values
pub type ValueIter = Box<dyn Iterator<Item = Value> + Send>;

/// The elements of an iterable value.
///
/// Sequences and arrays yield in order, sets in their stored order and
/// multisets each element once per occurrence. Arrays are read from a
/// snapshot taken now. Anything else faults.
pub fn iterate(value: &Value) -> ValueIter {
    match value {
        Value::Seq(s) => Box::new(s.clone().into_vector().into_iter()),
        Value::Set(s) => Box::new(s.clone().into_vector().into_iter()),
        Value::MultiSet(m) => Box::new(m.elements()),
        Value::Array(a) => Box::new(a.snapshot().into_iter()),
        other => fault(Fault::NotIterable(other.kind_name().to_string())),
    }
}

/// Evaluate a quantifier over `source`.
///
/// For all (`is_forall`) stops at the first `false`; exists stops at the
/// first `true`. An exhausted source yields the quantifier's unit
/// (`true` for all, `false` for exists).
pub fn quantifier<I: IntoIterator>(
    source: I,
    is_forall: bool,
    mut predicate: impl FnMut(I::Item) -> bool,
) -> bool {
    for item in source {
        if predicate(item) != is_forall {
            return !is_forall;
        }
    }
    is_forall
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array, MultiSet, Seq, Set, Tuple};

    fn ints(ns: &[i64]) -> Vec<Int> {
        ns.iter().map(|&n| Int::from(n)).collect()
    }

    #[test]
    fn test_all_integers_order() {
        let first: Vec<Int> = AllIntegers::new().take(7).collect();
        assert_eq!(first, ints(&[0, 1, -1, 2, -2, 3, -3]));
    }

    #[test]
    fn test_integer_ranges() {
        let up: Vec<Int> = IntegerRange::new(&Int::from(-1), &Int::two()).collect();
        assert_eq!(up, ints(&[-1, 0, 1]));

        let empty: Vec<Int> = IntegerRange::new(&Int::five(), &Int::two()).collect();
        assert!(empty.is_empty());

        let open_up: Vec<Int> = IntegerRange::new(&Int::ten(), &Int::NIL).take(3).collect();
        assert_eq!(open_up, ints(&[10, 11, 12]));

        let down: Vec<Int> = IntegerRange::new(&Int::NIL, &Int::two()).take(3).collect();
        assert_eq!(down, ints(&[1, 0, -1]));

        let all: Vec<Int> = IntegerRange::new(&Int::NIL, &Int::NIL).take(3).collect();
        assert_eq!(all, ints(&[0, 1, -1]));
    }

    #[test]
    fn test_all_chars_covers_16_bits() {
        let mut chars = AllChars::new();
        assert_eq!(chars.next(), Some(Char(0)));
        assert_eq!(chars.size_hint(), (0xFFFF, Some(0xFFFF)));
        assert_eq!(chars.last(), Some(Char(0xFFFF)));
        assert_eq!(AllChars::new().count(), 0x10000);
    }

    #[test]
    fn test_all_booleans_and_single_value() {
        assert_eq!(AllBooleans::new().collect::<Vec<_>>(), vec![false, true]);
        let single: Vec<Value> = SingleValue::new(Value::from('z')).collect();
        assert_eq!(single, vec![Value::from('z')]);
    }

    #[test]
    fn test_quantifier_short_circuits() {
        let mut seen = 0;
        let all_small = quantifier(AllIntegers::new(), true, |n| {
            seen += 1;
            n.abs() < Int::two()
        });
        assert!(!all_small);
        assert_eq!(seen, 4);

        assert!(quantifier(AllBooleans::new(), false, |b| b));
        assert!(quantifier(Vec::<Int>::new(), true, |_| false));
        assert!(!quantifier(Vec::<Int>::new(), false, |_| true));
    }

    #[test]
    fn test_iterate_collections() {
        let seq = Value::Seq(Seq::of_string("ab"));
        assert_eq!(iterate(&seq).count(), 2);

        let set = Value::Set(Set::of([Value::from(true), Value::from(true)]));
        assert_eq!(iterate(&set).count(), 1);

        let ms = Value::MultiSet(MultiSet::of([Value::from(true), Value::from(true)]));
        assert_eq!(iterate(&ms).count(), 2);

        let arr = Value::Array(Array::with_value(&ints(&[2, 2]), Value::Null));
        assert_eq!(iterate(&arr).count(), 4);
    }

    #[test]
    #[should_panic(expected = "not iterable: tuple")]
    fn test_iterate_tuple_faults() {
        let _ = iterate(&Value::Tuple(Tuple::of([])));
    }

    #[test]
    #[should_panic(expected = "not iterable: int")]
    fn test_iterate_int_faults() {
        let _ = iterate(&Value::Int(Int::one()));
    }
}
