use crate::array::Array;
use crate::function::Function;
use crate::map::Map;
use crate::multiset::MultiSet;
use crate::seq::Seq;
use crate::set::Set;
use crate::traits::ObjectRef;
use crate::tuple::Tuple;
use dafny_core::{Char, Fault, Int, Real, fault};
use serde::{Deserialize, Serialize};

/// Host-native integer widths used by generated code for bounded newtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeInt {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

impl NativeInt {
    pub fn to_int(self) -> Int {
        match self {
            NativeInt::I8(n) => Int::from(n),
            NativeInt::I16(n) => Int::from(n),
            NativeInt::I32(n) => Int::from(n),
            NativeInt::I64(n) => Int::from(n),
            NativeInt::U8(n) => Int::from(n),
            NativeInt::U16(n) => Int::from(n),
            NativeInt::U32(n) => Int::from(n),
            NativeInt::U64(n) => Int::from(n),
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            NativeInt::I8(_) => "int8",
            NativeInt::I16(_) => "int16",
            NativeInt::I32(_) => "int32",
            NativeInt::I64(_) => "int64",
            NativeInt::U8(_) => "uint8",
            NativeInt::U16(_) => "uint16",
            NativeInt::U32(_) => "uint32",
            NativeInt::U64(_) => "uint64",
        }
    }
}

/// Value: The universe of runtime values generated code manipulates
///
/// Static types are erased by the time values reach the runtime, so every
/// value carries its own kind. Equality (see `equality`) and rendering (see
/// `render`) dispatch on this closed set of variants.
///
/// All variants except `Array` and `Object` are immutable values; cloning
/// shares the underlying storage.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value; also a nil reference of any reference type
    #[default]
    Null,

    Bool(bool),

    Char(Char),

    /// Arbitrary-precision integer (also ordinals and bitvectors)
    Int(Int),

    /// Exact rational
    Real(Real),

    /// Fixed-width integer
    Native(NativeInt),

    /// Sequence, possibly flagged as a string
    Seq(Seq),

    Set(Set),

    MultiSet(MultiSet),

    Map(Map),

    Tuple(Tuple),

    /// Mutable array with reference identity
    Array(Array),

    /// Instance of a generated class (identity equality)
    Object(ObjectRef),

    /// Function value; renders as its type name
    Func(Function),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of this value's runtime kind, used in fault messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Int(_) => "int",
            Value::Real(_) => "real",
            Value::Native(n) => n.type_name(),
            Value::Seq(_) => "seq",
            Value::Set(_) => "set",
            Value::MultiSet(_) => "multiset",
            Value::Map(_) => "map",
            Value::Tuple(_) => "tuple",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Func(_) => "function",
        }
    }

    pub fn as_int(&self) -> Option<&Int> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<Char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Validate `ix` against a collection of length `len` and convert it
pub(crate) fn checked_index(ix: &Int, len: usize) -> usize {
    match ix.to_usize() {
        Some(i) if i < len => i,
        _ => fault(Fault::IndexOutOfRange {
            index: ix.to_string(),
            len,
        }),
    }
}

/// Convert a count or bound to `usize`, faulting when it cannot be one
pub(crate) fn checked_count(n: &Int, what: &'static str) -> usize {
    match n.to_usize() {
        Some(n) => n,
        None => fault(Fault::UnsupportedConversion {
            target: what,
            found: n.to_string(),
        }),
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    Char => Char,
    Int => Int,
    Real => Real,
    NativeInt => Native,
    Seq => Seq,
    Set => Set,
    MultiSet => MultiSet,
    Map => Map,
    Tuple => Tuple,
    Array => Array,
    ObjectRef => Object,
    Function => Func,
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(Char::from(c))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Seq(Seq::of_string(s))
    }
}
