//! Dafny Core: the numeric tower beneath the Dafny runtime
//!
//! This crate provides the scalar values that every runtime collection
//! indexes, counts, or measures with, together with the fault taxonomy the
//! whole runtime reports through.
//!
//! Key design principles:
//! - Int/Real: immutable, `Arc`-shared, O(1) to clone
//! - Division is Euclidean everywhere (big and native widths alike)
//! - Contract violations fault: record the reason, then unwind
//!
//! # Modules
//!
//! - `error`: Fault taxonomy and the thread-local last-fault slot
//! - `int`: Arbitrary-precision integers and bitvector operations
//! - `real`: Exact rationals with the shared decimal rendering
//! - `ordinal`: Ordinal predicates over `Int`
//! - `char`: Code-point characters
//! - `native`: Euclidean division and rotation at host-native widths

pub mod char;
pub mod error;
pub mod int;
pub mod native;
pub mod ordinal;
pub mod real;

pub use char::Char;
pub use int::{BitVector, Int};
pub use ordinal::Ordinal;
pub use real::Real;

// Error handling
pub use error::{Fault, clear_fault, fault, format_panic_payload, has_fault, take_last_fault};
