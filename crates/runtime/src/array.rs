//! Mutable multi-dimensional arrays
//!
//! The one collection with reference identity: clones share storage, and
//! writes through any clone are visible through all of them.
//!
//! # Layout
//!
//! Cells live in one flat row-major buffer. The index `(i0, ..., ik)` maps
//! to `sum(i_d * stride_d)`, where `stride_d` is the product of the
//! dimensions after `d`.
//!
//! # Concurrency
//!
//! Cells sit behind an `RwLock`, so concurrent reads are safe. Callers
//! that mutate an array shared between threads still have to order their
//! writes themselves; the lock only keeps individual cell accesses sound.

use crate::equality::slices_equal;
use crate::rtd::TypeDescriptor;
use crate::seq::Seq;
use crate::value::{Value, checked_count, checked_index};
use dafny_core::{Fault, Int, fault};
use smallvec::SmallVec;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Dims = SmallVec<[usize; 4]>;

struct ArrayData {
    dims: Dims,
    cells: RwLock<Vec<Value>>,
}

#[derive(Clone)]
pub struct Array {
    data: Arc<ArrayData>,
}

impl Array {
    fn alloc(dims: Dims, cells: Vec<Value>) -> Array {
        tracing::trace!(dims = ?dims.as_slice(), cells = cells.len(), "array allocated");
        Array {
            data: Arc::new(ArrayData {
                dims,
                cells: RwLock::new(cells),
            }),
        }
    }

    fn shape(dims: &[Int]) -> (Dims, usize) {
        let dims: Dims = dims
            .iter()
            .map(|d| checked_count(d, "array dimension"))
            .collect();
        let size = dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d));
        match size {
            Some(size) => (dims, size),
            None => fault(Fault::UnsupportedConversion {
                target: "array size",
                found: format!("{:?}", dims.as_slice()),
            }),
        }
    }

    /// An array of the given shape with every cell `Null`
    pub fn new(dims: &[Int]) -> Array {
        Array::with_value(dims, Value::Null)
    }

    /// An array of the given shape with every cell `init`
    pub fn with_value(dims: &[Int], init: Value) -> Array {
        let (dims, size) = Array::shape(dims);
        Array::alloc(dims, vec![init; size])
    }

    /// An array of the given shape filled with the type's default value
    pub fn with_default(dims: &[Int], rtd: &dyn TypeDescriptor) -> Array {
        Array::with_value(dims, rtd.default_value())
    }

    /// A one-dimensional array holding `values`
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Array {
        let cells: Vec<Value> = values.into_iter().collect();
        Array::alloc(SmallVec::from_slice(&[cells.len()]), cells)
    }

    /// Rebuild an array from a shape and its row-major cells; `None` when
    /// the cell count does not match the shape
    pub(crate) fn from_shape(dims: &[usize], cells: Vec<Value>) -> Option<Array> {
        let size = dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))?;
        if size != cells.len() {
            return None;
        }
        Some(Array::alloc(SmallVec::from_slice(dims), cells))
    }

    pub fn empty() -> Array {
        Array::from_values([])
    }

    pub fn rank(&self) -> usize {
        self.data.dims.len()
    }

    pub fn dims(&self) -> &[usize] {
        &self.data.dims
    }

    /// Length along dimension `dim`
    pub fn len(&self, dim: usize) -> Int {
        match self.data.dims.get(dim) {
            Some(&n) => Int::from(n),
            None => fault(Fault::IndexOutOfRange {
                index: dim.to_string(),
                len: self.rank(),
            }),
        }
    }

    /// Total number of cells
    pub fn size(&self) -> usize {
        self.data.dims.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether both handles refer to the same array
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.data.cells.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Value>> {
        self.data.cells.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn flat_index(&self, ixs: &[Int], operation: &'static str) -> usize {
        let dims = &self.data.dims;
        if ixs.len() != dims.len() {
            fault(Fault::RankMismatch {
                operation,
                expected: dims.len(),
                actual: ixs.len(),
            });
        }
        let mut flat = 0;
        let mut stride = 1;
        for (ix, &dim) in ixs.iter().zip(dims.iter()).rev() {
            flat += stride * checked_index(ix, dim);
            stride *= dim;
        }
        flat
    }

    fn require_one_dimension(&self, operation: &'static str) {
        if self.rank() != 1 {
            fault(Fault::RankMismatch {
                operation,
                expected: 1,
                actual: self.rank(),
            });
        }
    }

    /// Read the cell at `ixs`
    pub fn index(&self, ixs: &[Int]) -> Value {
        let i = self.flat_index(ixs, "index");
        self.read()[i].clone()
    }

    /// Write the cell at `ixs`
    pub fn set(&self, ixs: &[Int], value: Value) {
        let i = self.flat_index(ixs, "index");
        self.write()[i] = value;
    }

    /// Run `f` on the cell at `ixs` in place.
    ///
    /// The array is locked for writing while `f` runs, so `f` must not touch
    /// this array again.
    pub fn with_slot<R>(&self, ixs: &[Int], f: impl FnOnce(&mut Value) -> R) -> R {
        let i = self.flat_index(ixs, "index");
        f(&mut self.write()[i])
    }

    /// Write a cell of a one-dimensional array
    pub fn update(&self, ix: &Int, value: Value) {
        self.require_one_dimension("update");
        self.set(std::slice::from_ref(ix), value);
    }

    /// Copy `[lo, hi)` of a one-dimensional array into a sequence; absent
    /// bounds are open. The result is string-flagged when the array is
    /// non-empty and holds characters.
    pub fn range_to_seq(&self, lo: &Int, hi: &Int) -> Seq {
        self.require_one_dimension("range_to_seq");
        let cells = self.snapshot();
        let is_string = matches!(cells.first(), Some(Value::Char(_)));
        Seq::of(cells).set_string(is_string).subseq(lo, hi)
    }

    /// A copy of the cells in row-major order
    pub fn snapshot(&self) -> Vec<Value> {
        self.read().clone()
    }

    /// Same shape and equal cells; always true for the same array
    pub fn equals(&self, other: &Array) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.dims() == other.dims() && slices_equal(&self.read(), &other.read())
    }
}

impl std::fmt::Debug for Array {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Array")
            .field("dims", &self.dims())
            .field("cells", &*self.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(ns: &[i64]) -> Vec<Int> {
        ns.iter().map(|&n| Int::from(n)).collect()
    }

    #[test]
    fn test_row_major_layout() {
        let a = Array::new(&ints(&[2, 3]));
        a.set(&ints(&[1, 0]), Value::from('x'));
        let cells = a.snapshot();
        assert_eq!(cells[3], Value::from('x'));
        assert_eq!(a.index(&ints(&[1, 0])), Value::from('x'));
        assert!(a.index(&ints(&[0, 0])).is_null());
        assert_eq!(a.len(0), Int::two());
        assert_eq!(a.len(1), Int::from(3));
        assert_eq!(a.rank(), 2);
    }

    #[test]
    fn test_clones_share_cells() {
        let a = Array::with_value(&ints(&[2]), Value::from(false));
        let b = a.clone();
        b.update(&Int::one(), Value::from(true));
        assert_eq!(a.index(&ints(&[1])), Value::from(true));
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_with_slot_mutates_in_place() {
        let a = Array::with_value(&ints(&[1, 1]), Value::from(Int::one()));
        let old = a.with_slot(&ints(&[0, 0]), |slot| {
            std::mem::replace(slot, Value::from(Int::ten()))
        });
        assert_eq!(old, Value::from(Int::one()));
        assert_eq!(a.index(&ints(&[0, 0])), Value::from(Int::ten()));
    }

    #[test]
    #[should_panic(expected = "index: expected 2 indices but got 1")]
    fn test_wrong_rank_faults() {
        Array::new(&ints(&[2, 2])).index(&ints(&[0]));
    }

    #[test]
    #[should_panic(expected = "update: expected 1 indices but got 2")]
    fn test_update_requires_one_dimension() {
        Array::new(&ints(&[2, 2])).update(&Int::zero(), Value::Null);
    }

    #[test]
    #[should_panic(expected = "range_to_seq: expected 1 indices but got 2")]
    fn test_slice_requires_one_dimension() {
        Array::new(&ints(&[2, 2])).range_to_seq(&Int::NIL, &Int::NIL);
    }

    #[test]
    #[should_panic(expected = "index out of range: 2 (length 2)")]
    fn test_index_out_of_bounds_faults() {
        Array::new(&ints(&[2, 2])).index(&ints(&[0, 2]));
    }

    #[test]
    fn test_range_to_seq_string_flag() {
        let chars = Array::from_values("abc".chars().map(Value::from));
        let s = chars.range_to_seq(&Int::one(), &Int::NIL);
        assert!(s.is_string());
        assert_eq!(s.text().as_deref(), Some("bc"));

        let nums = Array::from_values([Value::from(Int::one())]);
        assert!(!nums.range_to_seq(&Int::NIL, &Int::NIL).is_string());
        assert!(!Array::empty().range_to_seq(&Int::NIL, &Int::NIL).is_string());
    }

    #[test]
    fn test_equality() {
        let a = Array::with_value(&ints(&[2, 3]), Value::Null);
        let b = Array::with_value(&ints(&[2, 3]), Value::Null);
        let c = Array::with_value(&ints(&[3, 2]), Value::Null);
        assert!(a.equals(&a));
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
        b.set(&ints(&[0, 0]), Value::from(true));
        assert!(!a.equals(&b));
    }

    #[test]
    fn test_zero_sized() {
        let a = Array::new(&ints(&[0, 5]));
        assert!(a.is_empty());
        assert_eq!(a.len(1), Int::five());
    }
}
