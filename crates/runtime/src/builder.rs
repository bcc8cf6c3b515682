use crate::array::Array;
use crate::multiset::MultiSet;
use crate::seq::Seq;
use crate::set::Set;
use crate::value::Value;

/// Append-only accumulator for comprehensions and literals
///
/// Single writer; consumed once into the finished value.
#[derive(Debug, Default)]
pub struct Builder {
    values: Vec<Value>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn with_capacity(n: usize) -> Builder {
        Builder {
            values: Vec::with_capacity(n),
        }
    }

    pub fn add(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// A one-dimensional array of the accumulated values
    pub fn to_array(&self) -> Array {
        Array::from_values(self.values.iter().cloned())
    }

    /// The accumulated values, deduplicated
    pub fn to_set(&self) -> Set {
        Set::of(self.values.iter().cloned())
    }

    pub fn to_multiset(&self) -> MultiSet {
        MultiSet::of(self.values.iter().cloned())
    }

    pub fn to_seq(&self) -> Seq {
        Seq::of(self.values.iter().cloned())
    }
}

impl Extend<Value> for Builder {
    fn extend<T: IntoIterator<Item = Value>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}

impl IntoIterator for Builder {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
