//! Immutable maps
//!
//! Entries are kept in insertion order. Updating an existing key replaces
//! its value in place; a new key is appended.

use crate::equality::are_equal;
use crate::set::Set;
use crate::tuple::Tuple;
use crate::value::Value;
use dafny_core::Int;
use im::Vector;

#[derive(Debug, Clone, Default)]
pub struct Map {
    entries: Vector<(Value, Value)>,
}

impl Map {
    pub fn empty() -> Map {
        Map::default()
    }

    /// Build a map from pairs; a repeated key keeps its first slot and its
    /// last value
    pub fn of(pairs: impl IntoIterator<Item = (Value, Value)>) -> Map {
        let mut builder = MapBuilder::new();
        for (k, v) in pairs {
            builder.add(k, v);
        }
        builder.to_map()
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.entries.iter().position(|(k, _)| are_equal(k, key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cardinality(&self) -> Int {
        Int::from(self.len())
    }

    pub fn find(&self, key: &Value) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// The value at `key`, or `Null` when absent
    pub fn get(&self, key: &Value) -> Value {
        self.find(key).cloned().unwrap_or(Value::Null)
    }

    pub fn contains(&self, key: &Value) -> bool {
        self.position(key).is_some()
    }

    pub fn update(&self, key: Value, value: Value) -> Map {
        let entries = match self.position(&key) {
            Some(i) => self.entries.update(i, (key, value)),
            None => {
                let mut entries = self.entries.clone();
                entries.push_back((key, value));
                entries
            }
        };
        Map { entries }
    }

    /// All of `other`'s entries, then ours whose key `other` lacks
    pub fn merge(&self, other: &Map) -> Map {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let mut entries = other.entries.clone();
        for (k, v) in self.entries.iter() {
            if !other.contains(k) {
                entries.push_back((k.clone(), v.clone()));
            }
        }
        Map { entries }
    }

    /// Remove every key in `keys`
    pub fn subtract(&self, keys: &Set) -> Map {
        if self.is_empty() || keys.is_empty() {
            return self.clone();
        }
        Map {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| !keys.contains(k))
                .cloned()
                .collect(),
        }
    }

    pub fn keys(&self) -> Set {
        Set::from_distinct(self.entries.iter().map(|(k, _)| k.clone()).collect())
    }

    pub fn values(&self) -> Set {
        Set::of(self.entries.iter().map(|(_, v)| v.clone()))
    }

    /// The entries as a set of `(key, value)` pairs
    pub fn items(&self) -> Set {
        Set::from_distinct(
            self.entries
                .iter()
                .map(|(k, v)| Value::Tuple(Tuple::pair(k.clone(), v.clone())))
                .collect(),
        )
    }

    pub fn equals(&self, other: &Map) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.find(k).is_some_and(|w| are_equal(v, w)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

/// Single-writer accumulator for map literals and comprehensions
#[derive(Debug, Default)]
pub struct MapBuilder {
    entries: Vector<(Value, Value)>,
}

impl MapBuilder {
    pub fn new() -> MapBuilder {
        MapBuilder::default()
    }

    /// Add an entry; a key already present has its value replaced in place
    pub fn add(&mut self, key: Value, value: Value) {
        match self.entries.iter().position(|(k, _)| are_equal(k, &key)) {
            Some(i) => {
                self.entries.set(i, (key, value));
            }
            None => self.entries.push_back((key, value)),
        }
    }

    pub fn to_map(&self) -> Map {
        Map {
            entries: self.entries.clone(),
        }
    }
}

impl FromIterator<(Value, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        Map::of(iter)
    }
}
