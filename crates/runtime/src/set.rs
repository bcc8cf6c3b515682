//! Immutable sets
//!
//! Elements are deduplicated through the equality protocol, not hashing,
//! and kept in first-occurrence order. That order is not part of a set's
//! meaning, but it is what rendering and iteration observe.

use crate::equality::are_equal;
use crate::value::Value;
use dafny_core::Int;
use im::Vector;
use num_bigint::BigUint;
use num_traits::{One, Zero};

#[derive(Debug, Clone, Default)]
pub struct Set {
    contents: Vector<Value>,
}

impl Set {
    pub fn empty() -> Set {
        Set::default()
    }

    /// Build a set, dropping later duplicates
    pub fn of(values: impl IntoIterator<Item = Value>) -> Set {
        let mut contents = Vector::new();
        for v in values {
            if !contents.iter().any(|e| are_equal(e, &v)) {
                contents.push_back(v);
            }
        }
        Set { contents }
    }

    /// Wrap values already known to be distinct
    pub(crate) fn from_distinct(contents: Vector<Value>) -> Set {
        Set { contents }
    }

    pub(crate) fn into_vector(self) -> Vector<Value> {
        self.contents
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

    pub fn contains(&self, value: &Value) -> bool {
        self.contents.iter().any(|e| are_equal(e, value))
    }

    pub fn elements(&self) -> impl Iterator<Item = &Value> {
        self.contents.iter()
    }

    pub fn union(&self, other: &Set) -> Set {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let mut contents = self.contents.clone();
        for v in other.elements() {
            if !self.contains(v) {
                contents.push_back(v.clone());
            }
        }
        Set { contents }
    }

    pub fn intersection(&self, other: &Set) -> Set {
        if self.is_empty() || other.is_empty() {
            return Set::empty();
        }
        self.filter(|v| other.contains(v))
    }

    pub fn difference(&self, other: &Set) -> Set {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        self.filter(|v| !other.contains(v))
    }

    fn filter(&self, keep: impl Fn(&Value) -> bool) -> Set {
        Set {
            contents: self.contents.iter().filter(|v| keep(v)).cloned().collect(),
        }
    }

    pub fn is_disjoint_from(&self, other: &Set) -> bool {
        !self.elements().any(|v| other.contains(v))
    }

    pub fn is_subset_of(&self, other: &Set) -> bool {
        self.len() <= other.len() && self.elements().all(|v| other.contains(v))
    }

    pub fn is_proper_subset_of(&self, other: &Set) -> bool {
        self.len() < other.len() && self.is_subset_of(other)
    }

    pub fn is_superset_of(&self, other: &Set) -> bool {
        other.is_subset_of(self)
    }

    pub fn equals(&self, other: &Set) -> bool {
        self.len() == other.len() && self.is_subset_of(other)
    }

    /// Every subset, each exactly once, in the cross-runtime order.
    ///
    /// A counter runs from 0 to 2^n - 1; bit `i` selects the element `i`
    /// places from the end, and each subset lists its elements in set order.
    /// For `{1, 2}` that is `{}`, `{2}`, `{1}`, `{1, 2}`.
    pub fn all_subsets(&self) -> AllSubsets {
        AllSubsets {
            elements: self.contents.clone(),
            counter: BigUint::zero(),
            limit: BigUint::one() << self.len(),
        }
    }
}

/// Iterator returned by [`Set::all_subsets`]
pub struct AllSubsets {
    elements: Vector<Value>,
    counter: BigUint,
    limit: BigUint,
}

impl Iterator for AllSubsets {
    type Item = Set;

    fn next(&mut self) -> Option<Set> {
        if self.counter >= self.limit {
            return None;
        }
        let n = self.elements.len();
        let contents = self
            .elements
            .iter()
            .enumerate()
            .filter(|(i, _)| self.counter.bit((n - 1 - i) as u64))
            .map(|(_, v)| v.clone())
            .collect();
        self.counter += 1u32;
        Some(Set::from_distinct(contents))
    }
}

impl FromIterator<Value> for Set {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Set::of(iter)
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a Value;
    type IntoIter = im::vector::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.iter()
    }
}
