//! Ordinals
//!
//! An ordinal shares `Int`'s storage and is always a natural number at
//! runtime; no transfinite stage is representable.

use crate::int::Int;

pub type Ordinal = Int;

impl Int {
    /// True for the zero (limit) stage
    pub fn is_limit_ord(&self) -> bool {
        self.is_zero()
    }

    /// True for any positive stage
    pub fn is_succ_ord(&self) -> bool {
        self.sign() > 0
    }

    /// The natural-number offset, which is the ordinal itself
    pub fn ord_offset(&self) -> Int {
        self.clone()
    }

    pub fn is_nat_ord(&self) -> bool {
        true
    }
}
