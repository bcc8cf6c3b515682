//! Dafny Runtime: the value kernel generated programs execute against
//!
//! Key design principles:
//! - Value: the closed universe of runtime values (scalars, persistent
//!   collections, arrays, objects, functions)
//! - Collections are persistent: every operation returns a new value and
//!   clones share structure
//! - Equality, rendering, and iteration order are identical across every
//!   runtime for the language
//! - Arrays and objects are the only values with reference identity
//!
//! The numeric tower lives in `dafny-core` and is re-exported here.

#![recursion_limit = "256"]

pub mod array;
pub mod builder;
pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod equality;
pub mod function;
pub mod halt;
pub mod iter;
pub mod map;
pub mod multiset;
pub mod object;
pub mod render;
pub mod rtd;
pub mod seq;
pub mod serialize;
pub mod set;
pub mod traits;
pub mod tuple;
pub mod value;

pub use value::{NativeInt, Value};

// Collections
pub use array::Array;
pub use builder::Builder;
pub use map::{Map, MapBuilder};
pub use multiset::{MultiSet, MultiSetElements};
pub use seq::Seq;
pub use set::{AllSubsets, Set};
pub use tuple::Tuple;

// References
pub use function::Function;
pub use object::Object;
pub use traits::{ObjectRef, RuntimeObject, TraitId, TraitSet, instance_of, instance_of_trait};

// Type descriptors
pub use rtd::{
    CollectionKind, CollectionType, StandardType, TupleType, TypeDescriptor, TypeDescriptorRef,
};

// Iteration
pub use iter::{
    AllBooleans, AllChars, AllIntegers, IntegerRange, SingleValue, ValueIter, iterate, quantifier,
};

pub use convert::int_of_any;
pub use equality::are_equal;
pub use render::{print, string};

// Ambient: configuration, logging, halting
pub use config::{HaltOutput, RuntimeConfig};
pub use diagnostics::init_logging;
pub use halt::{catch_halt, catch_halt_to};

// Serialization types (for exchange with external systems)
pub use serialize::{SerializeError, TypedValue, ValueSerialize};

pub use dafny_core::{
    BitVector, Char, Fault, Int, Ordinal, Real, clear_fault, fault, has_fault, take_last_fault,
};
