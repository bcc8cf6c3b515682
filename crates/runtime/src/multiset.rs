//! Immutable multisets
//!
//! Stored as `(value, multiplicity)` entries in first-occurrence order.
//! Multiplicities are always positive: an entry whose count drops to zero
//! is removed, so a zero count and absence are the same thing everywhere.

use crate::equality::are_equal;
use crate::seq::Seq;
use crate::set::Set;
use crate::value::Value;
use dafny_core::{Fault, Int, fault};
use im::Vector;

#[derive(Debug, Clone, Default)]
pub struct MultiSet {
    entries: Vector<(Value, Int)>,
}

impl MultiSet {
    pub fn empty() -> MultiSet {
        MultiSet::default()
    }

    /// Count equal elements
    pub fn of(values: impl IntoIterator<Item = Value>) -> MultiSet {
        let mut entries: Vector<(Value, Int)> = Vector::new();
        for v in values {
            match entries.iter().position(|(e, _)| are_equal(e, &v)) {
                Some(i) => {
                    let bumped = entries[i].1.plus(&Int::one());
                    entries[i].1 = bumped;
                }
                None => entries.push_back((v, Int::one())),
            }
        }
        MultiSet { entries }
    }

    pub fn from_seq(seq: &Seq) -> MultiSet {
        MultiSet::of(seq.iter().cloned())
    }

    pub fn from_set(set: &Set) -> MultiSet {
        MultiSet {
            entries: set.elements().map(|v| (v.clone(), Int::one())).collect(),
        }
    }

    fn position(&self, value: &Value) -> Option<usize> {
        self.entries.iter().position(|(e, _)| are_equal(e, value))
    }

    /// Occurrences of `value` (zero when absent)
    pub fn multiplicity(&self, value: &Value) -> Int {
        match self.position(value) {
            Some(i) => self.entries[i].1.clone(),
            None => Int::zero(),
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.position(value).is_some()
    }

    /// A new multiset in which `value` occurs exactly `n` times
    pub fn update(&self, value: Value, n: &Int) -> MultiSet {
        if n.sign() < 0 {
            fault(Fault::NegativeMultiplicity(n.to_string()));
        }
        match self.position(&value) {
            Some(i) if self.entries[i].1 == *n => self.clone(),
            Some(i) if n.is_zero() => {
                let mut entries = self.entries.clone();
                entries.remove(i);
                MultiSet { entries }
            }
            Some(i) => MultiSet {
                entries: self.entries.update(i, (value, n.clone())),
            },
            None if n.is_zero() => self.clone(),
            None => {
                let mut entries = self.entries.clone();
                entries.push_back((value, n.clone()));
                MultiSet { entries }
            }
        }
    }

    /// Total number of occurrences
    pub fn cardinality(&self) -> Int {
        self.entries
            .iter()
            .fold(Int::zero(), |acc, (_, n)| acc.plus(n))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct elements
    pub fn distinct_len(&self) -> usize {
        self.entries.len()
    }

    pub fn union(&self, other: &MultiSet) -> MultiSet {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let mut entries = self.entries.clone();
        for (v, n) in other.entries.iter() {
            match entries.iter().position(|(e, _)| are_equal(e, v)) {
                Some(i) => {
                    let summed = entries[i].1.plus(n);
                    entries[i].1 = summed;
                }
                None => entries.push_back((v.clone(), n.clone())),
            }
        }
        MultiSet { entries }
    }

    pub fn intersection(&self, other: &MultiSet) -> MultiSet {
        if self.is_empty() || other.is_empty() {
            return MultiSet::empty();
        }
        let entries = self
            .entries
            .iter()
            .filter_map(|(v, n)| {
                let m = n.clone().min(other.multiplicity(v));
                (!m.is_zero()).then(|| (v.clone(), m))
            })
            .collect();
        MultiSet { entries }
    }

    pub fn difference(&self, other: &MultiSet) -> MultiSet {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        let entries = self
            .entries
            .iter()
            .filter_map(|(v, n)| {
                let d = n.minus(&other.multiplicity(v));
                (d.sign() > 0).then(|| (v.clone(), d))
            })
            .collect();
        MultiSet { entries }
    }

    pub fn is_subset_of(&self, other: &MultiSet) -> bool {
        self.entries
            .iter()
            .all(|(v, n)| *n <= other.multiplicity(v))
    }

    pub fn is_proper_subset_of(&self, other: &MultiSet) -> bool {
        self.is_subset_of(other) && self.cardinality() < other.cardinality()
    }

    pub fn is_disjoint_from(&self, other: &MultiSet) -> bool {
        !self.entries.iter().any(|(v, _)| other.contains(v))
    }

    pub fn equals(&self, other: &MultiSet) -> bool {
        self.distinct_len() == other.distinct_len()
            && self
                .entries
                .iter()
                .all(|(v, n)| *n == other.multiplicity(v))
    }

    /// Each distinct element once
    pub fn unique_elements(&self) -> Set {
        Set::from_distinct(self.entries.iter().map(|(v, _)| v.clone()).collect())
    }

    /// Distinct elements with their multiplicities
    pub fn entries(&self) -> impl Iterator<Item = (&Value, &Int)> {
        self.entries.iter().map(|(v, n)| (v, n))
    }

    /// Every element, repeated per its multiplicity
    pub fn elements(&self) -> MultiSetElements {
        MultiSetElements {
            entries: self.entries.clone(),
            current: None,
        }
    }
}

/// Iterator returned by [`MultiSet::elements`]
pub struct MultiSetElements {
    entries: Vector<(Value, Int)>,
    current: Option<(Value, Int)>,
}

impl Iterator for MultiSetElements {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        loop {
            if let Some((v, remaining)) = &mut self.current {
                if remaining.sign() > 0 {
                    *remaining = remaining.minus(&Int::one());
                    return Some(v.clone());
                }
            }
            self.current = Some(self.entries.pop_front()?);
        }
    }
}

impl FromIterator<Value> for MultiSet {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        MultiSet::of(iter)
    }
}
