//! Immutable sequences
//!
//! Backed by a persistent vector, so `update`, `concat` and `subseq` share
//! structure with their inputs instead of copying. A sequence may carry a
//! string flag; it only affects rendering (`"abc"` rather than
//! `['a', 'b', 'c']`), never equality.

use crate::equality::are_equal;
use crate::set::Set;
use crate::value::{Value, checked_count, checked_index};
use dafny_core::{Char, Fault, Int, fault};
use im::Vector;

#[derive(Debug, Clone, Default)]
pub struct Seq {
    contents: Vector<Value>,
    is_string: bool,
}

impl Seq {
    pub fn empty() -> Seq {
        Seq::default()
    }

    pub fn of(values: impl IntoIterator<Item = Value>) -> Seq {
        Seq {
            contents: values.into_iter().collect(),
            is_string: false,
        }
    }

    /// A string-flagged sequence of characters
    pub fn of_chars(chars: impl IntoIterator<Item = Char>) -> Seq {
        Seq {
            contents: chars.into_iter().map(Value::Char).collect(),
            is_string: true,
        }
    }

    pub fn of_string(s: &str) -> Seq {
        Seq::of_chars(s.chars().map(Char::from))
    }

    /// `[init(0), init(1), ..., init(n-1)]`
    pub fn create(n: &Int, mut init: impl FnMut(&Int) -> Value) -> Seq {
        let n = checked_count(n, "sequence length");
        Seq::of((0..n).map(|i| init(&Int::from(i))))
    }

    pub fn is_string(&self) -> bool {
        self.is_string
    }

    /// The same elements with the string flag set to `is_string`
    pub fn set_string(&self, is_string: bool) -> Seq {
        Seq {
            contents: self.contents.clone(),
            is_string,
        }
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn cardinality(&self) -> Int {
        Int::from(self.len())
    }

    pub fn index(&self, ix: &Int) -> Value {
        self.contents[checked_index(ix, self.len())].clone()
    }

    pub fn get(&self, i: usize) -> Option<&Value> {
        self.contents.get(i)
    }

    /// A new sequence with the element at `ix` replaced
    pub fn update(&self, ix: &Int, value: Value) -> Seq {
        let i = checked_index(ix, self.len());
        Seq {
            contents: self.contents.update(i, value),
            is_string: self.is_string,
        }
    }

    pub fn concat(&self, other: &Seq) -> Seq {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let is_string = self.is_string || other.is_string;
        let mut contents = self.contents.clone();
        contents.append(other.contents.clone());
        Seq {
            contents,
            is_string,
        }
    }

    /// Elements `[lo, hi)`; an absent bound (`Int::NIL`) is open
    pub fn subseq(&self, lo: &Int, hi: &Int) -> Seq {
        let len = self.len();
        let hi = if hi.is_nil() {
            len
        } else {
            bound(hi, len)
        };
        let lo = if lo.is_nil() {
            0
        } else {
            bound(lo, hi)
        };
        Seq {
            contents: self.contents.clone().slice(lo..hi),
            is_string: self.is_string,
        }
    }

    /// Elements from `lo` to the end
    pub fn drop(&self, lo: &Int) -> Seq {
        self.subseq(lo, &Int::NIL)
    }

    /// The first `hi` elements
    pub fn take(&self, hi: &Int) -> Seq {
        self.subseq(&Int::NIL, hi)
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.contents.iter().any(|v| are_equal(v, value))
    }

    /// Whether `self` is a prefix of `other`
    pub fn is_prefix_of(&self, other: &Seq) -> bool {
        self.len() <= other.len()
            && self
                .contents
                .iter()
                .zip(other.contents.iter())
                .all(|(a, b)| are_equal(a, b))
    }

    pub fn is_proper_prefix_of(&self, other: &Seq) -> bool {
        self.len() < other.len() && self.is_prefix_of(other)
    }

    /// The distinct elements, first occurrence first
    pub fn unique_elements(&self) -> Set {
        Set::of(self.contents.iter().cloned())
    }

    /// Element-wise equality; the string flag is ignored
    pub fn equals(&self, other: &Seq) -> bool {
        self.len() == other.len() && self.is_prefix_of(other)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.contents.iter()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.contents.iter().cloned().collect()
    }

    /// The text of a string-flagged sequence of characters
    pub fn text(&self) -> Option<String> {
        if !self.is_string {
            return None;
        }
        self.contents
            .iter()
            .map(|v| v.as_char().map(|c| c.to_string()))
            .collect()
    }

    pub(crate) fn into_vector(self) -> Vector<Value> {
        self.contents
    }
}

/// A range bound, which must lie within `[0, limit]`
fn bound(ix: &Int, limit: usize) -> usize {
    match ix.to_usize() {
        Some(i) if i <= limit => i,
        _ => fault(Fault::IndexOutOfRange {
            index: ix.to_string(),
            len: limit,
        }),
    }
}

impl FromIterator<Value> for Seq {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Seq::of(iter)
    }
}

impl<'a> IntoIterator for &'a Seq {
    type Item = &'a Value;
    type IntoIter = im::vector::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(ns: &[i64]) -> Seq {
        ns.iter().map(|&n| Value::Int(Int::from(n))).collect()
    }

    #[test]
    fn test_update_leaves_original_unchanged() {
        let s = ints(&[1, 2, 3]);
        let t = s.update(&Int::one(), Value::Int(Int::ten()));
        assert_eq!(s.index(&Int::one()), Value::Int(Int::two()));
        assert_eq!(t.index(&Int::one()), Value::Int(Int::ten()));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_concat() {
        let s = ints(&[1, 2]);
        let t = ints(&[3]);
        assert!(s.concat(&t).equals(&ints(&[1, 2, 3])));
        assert!(Seq::empty().concat(&t).equals(&t));
        assert!(s.concat(&Seq::empty()).equals(&s));
    }

    #[test]
    fn test_concat_keeps_string_flag() {
        let s = Seq::of_string("ab");
        assert!(Seq::empty().concat(&s).is_string());
        assert!(s.concat(&Seq::of_string("c")).is_string());
        assert_eq!(s.concat(&Seq::of_string("c")).text().as_deref(), Some("abc"));
    }

    #[test]
    fn test_concat_with_empty_string_keeps_other_kind() {
        let numbers = ints(&[1, 2]);
        let joined = Seq::of_string("").concat(&numbers);
        assert!(!joined.is_string());
        assert_eq!(crate::string(&Value::Seq(joined)), "[1, 2]");
        assert!(!numbers.concat(&Seq::of_string("")).is_string());
    }

    #[test]
    fn test_subseq_bounds() {
        let s = ints(&[0, 1, 2, 3, 4]);
        assert!(s.subseq(&Int::one(), &Int::from(3)).equals(&ints(&[1, 2])));
        assert!(s.drop(&Int::from(3)).equals(&ints(&[3, 4])));
        assert!(s.take(&Int::two()).equals(&ints(&[0, 1])));
        assert!(s.subseq(&Int::NIL, &Int::NIL).equals(&s));
        assert!(s.subseq(&Int::from(5), &Int::NIL).is_empty());
    }

    #[test]
    #[should_panic(expected = "index out of range: 6 (length 5)")]
    fn test_subseq_past_end_faults() {
        ints(&[0, 1, 2, 3, 4]).take(&Int::from(6));
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_subseq_crossed_bounds_fault() {
        ints(&[0, 1, 2, 3, 4]).subseq(&Int::from(3), &Int::two());
    }

    #[test]
    fn test_prefixes() {
        let s = ints(&[1, 2]);
        let t = ints(&[1, 2, 3]);
        assert!(s.is_prefix_of(&t));
        assert!(s.is_proper_prefix_of(&t));
        assert!(s.is_prefix_of(&s));
        assert!(!s.is_proper_prefix_of(&s));
        assert!(!t.is_prefix_of(&s));
        assert!(!ints(&[2]).is_prefix_of(&t));
    }

    #[test]
    fn test_equality_ignores_string_flag() {
        let s = Seq::of_string("hi");
        let t = s.set_string(false);
        assert!(s.equals(&t));
        assert!(!t.is_string());
    }

    #[test]
    fn test_unique_elements() {
        let s = ints(&[3, 1, 3, 2, 1]);
        let u = s.unique_elements();
        assert_eq!(u.len(), 3);
        assert!(u.contains(&Value::Int(Int::from(3))));
    }

    #[test]
    fn test_create() {
        let s = Seq::create(&Int::from(4), |i| Value::Int(i.times(i)));
        assert!(s.equals(&ints(&[0, 1, 4, 9])));
    }

    #[test]
    fn test_text_only_for_strings() {
        assert_eq!(Seq::of_string("dafny").text().as_deref(), Some("dafny"));
        assert_eq!(ints(&[1]).text(), None);
        assert!(Seq::of_string("x").contains(&Value::from('x')));
    }
}
