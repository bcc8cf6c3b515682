//! Runtime type descriptors
//!
//! Type parameters are erased by the time generated code runs, so generic
//! code that needs "the default value of T" is handed a descriptor for `T`.
//! Compound descriptors compose the descriptors of their components.

use crate::map::Map;
use crate::multiset::MultiSet;
use crate::seq::Seq;
use crate::set::Set;
use crate::tuple::Tuple;
use crate::value::{NativeInt, Value};
use dafny_core::{Char, Int, Real};
use std::fmt;
use std::sync::Arc;

pub trait TypeDescriptor: Send + Sync {
    fn default_value(&self) -> Value;

    /// Source-level name of the type, e.g. `seq<int>`
    fn type_name(&self) -> String;
}

pub type TypeDescriptorRef = Arc<dyn TypeDescriptor>;

impl fmt::Debug for dyn TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self.type_name())
    }
}

/// A non-generic built-in type
pub struct StandardType {
    name: &'static str,
    default: fn() -> Value,
}

impl StandardType {
    pub const fn new(name: &'static str, default: fn() -> Value) -> StandardType {
        StandardType { name, default }
    }
}

impl TypeDescriptor for StandardType {
    fn default_value(&self) -> Value {
        (self.default)()
    }

    fn type_name(&self) -> String {
        self.name.to_string()
    }
}

pub static INT_TYPE: StandardType = StandardType::new("int", || Value::Int(Int::zero()));
pub static BOOL_TYPE: StandardType = StandardType::new("bool", || Value::Bool(false));
pub static CHAR_TYPE: StandardType = StandardType::new("char", || Value::Char(Char::from('D')));
pub static REAL_TYPE: StandardType = StandardType::new("real", || Value::Real(Real::zero()));
pub static INT64_TYPE: StandardType =
    StandardType::new("int64", || Value::Native(NativeInt::I64(0)));
pub static UINT8_TYPE: StandardType =
    StandardType::new("uint8", || Value::Native(NativeInt::U8(0)));
pub static UINT16_TYPE: StandardType =
    StandardType::new("uint16", || Value::Native(NativeInt::U16(0)));
pub static UINT32_TYPE: StandardType =
    StandardType::new("uint32", || Value::Native(NativeInt::U32(0)));
pub static UINT64_TYPE: StandardType =
    StandardType::new("uint64", || Value::Native(NativeInt::U64(0)));
/// Any nullable reference type
pub static POSSIBLY_NULL_TYPE: StandardType = StandardType::new("object?", || Value::Null);
pub static SET_TYPE: StandardType = StandardType::new("set", || Value::Set(Set::empty()));
pub static MULTISET_TYPE: StandardType =
    StandardType::new("multiset", || Value::MultiSet(MultiSet::empty()));
pub static SEQ_TYPE: StandardType = StandardType::new("seq", || Value::Seq(Seq::empty()));
pub static MAP_TYPE: StandardType = StandardType::new("map", || Value::Map(Map::empty()));

/// A tuple type; its default is the tuple of its slots' defaults
pub struct TupleType {
    slots: Vec<TypeDescriptorRef>,
}

impl TupleType {
    pub fn new(slots: Vec<TypeDescriptorRef>) -> TupleType {
        TupleType { slots }
    }
}

impl TypeDescriptor for TupleType {
    fn default_value(&self) -> Value {
        Value::Tuple(Tuple::of(self.slots.iter().map(|s| s.default_value())))
    }

    fn type_name(&self) -> String {
        let names: Vec<String> = self.slots.iter().map(|s| s.type_name()).collect();
        format!("({})", names.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Seq,
    Set,
    MultiSet,
    Map,
}

/// A collection type parameterised by its element (and, for maps, value)
/// descriptors. Every collection defaults to empty.
pub struct CollectionType {
    kind: CollectionKind,
    params: Vec<TypeDescriptorRef>,
}

impl CollectionType {
    pub fn seq(element: TypeDescriptorRef) -> CollectionType {
        CollectionType {
            kind: CollectionKind::Seq,
            params: vec![element],
        }
    }

    pub fn set(element: TypeDescriptorRef) -> CollectionType {
        CollectionType {
            kind: CollectionKind::Set,
            params: vec![element],
        }
    }

    pub fn multiset(element: TypeDescriptorRef) -> CollectionType {
        CollectionType {
            kind: CollectionKind::MultiSet,
            params: vec![element],
        }
    }

    pub fn map(key: TypeDescriptorRef, value: TypeDescriptorRef) -> CollectionType {
        CollectionType {
            kind: CollectionKind::Map,
            params: vec![key, value],
        }
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }
}

impl TypeDescriptor for CollectionType {
    fn default_value(&self) -> Value {
        match self.kind {
            CollectionKind::Seq => Value::Seq(Seq::empty()),
            CollectionKind::Set => Value::Set(Set::empty()),
            CollectionKind::MultiSet => Value::MultiSet(MultiSet::empty()),
            CollectionKind::Map => Value::Map(Map::empty()),
        }
    }

    fn type_name(&self) -> String {
        let head = match self.kind {
            CollectionKind::Seq => "seq",
            CollectionKind::Set => "set",
            CollectionKind::MultiSet => "multiset",
            CollectionKind::Map => "map",
        };
        let params: Vec<String> = self.params.iter().map(|p| p.type_name()).collect();
        format!("{}<{}>", head, params.join(", "))
    }
}

/// Wrap a static descriptor for use inside a compound one
pub fn shared(rtd: &'static StandardType) -> TypeDescriptorRef {
    Arc::new(StaticType(rtd))
}

struct StaticType(&'static StandardType);

impl TypeDescriptor for StaticType {
    fn default_value(&self) -> Value {
        self.0.default_value()
    }

    fn type_name(&self) -> String {
        self.0.type_name()
    }
}
