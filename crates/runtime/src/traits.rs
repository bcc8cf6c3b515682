//! Dynamic trait membership and same-type checks
//!
//! Generated classes implement `RuntimeObject` and report the full,
//! transitive set of traits they implement. Trait tokens are compared by
//! identity: each `TraitId::register` call mints a token equal only to
//! itself, whatever its name.
//!
//! ```ignore
//! static SHAPE: LazyLock<TraitId> = LazyLock::new(|| TraitId::register("Shape"));
//! static POLYGON: LazyLock<TraitSet> = LazyLock::new(|| TraitSet::of([*SHAPE]));
//! ```

use crate::value::Value;
use smallvec::SmallVec;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_TRAIT_ID: AtomicU32 = AtomicU32::new(1);

/// Opaque token for one trait
#[derive(Clone, Copy)]
pub struct TraitId {
    id: u32,
    name: &'static str,
}

impl TraitId {
    /// Mint a fresh token
    pub fn register(name: &'static str) -> TraitId {
        let id = NEXT_TRAIT_ID.fetch_add(1, Ordering::Relaxed);
        TraitId { id, name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TraitId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TraitId {}

impl fmt::Debug for TraitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

/// The transitive set of traits a type implements
#[derive(Debug, Clone, Default)]
pub struct TraitSet {
    ids: SmallVec<[TraitId; 4]>,
}

impl TraitSet {
    pub fn empty() -> TraitSet {
        TraitSet::default()
    }

    pub fn of(ids: impl IntoIterator<Item = TraitId>) -> TraitSet {
        let mut set = TraitSet::empty();
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// `direct` plus everything the traits in `inherited` already imply
    pub fn with_parents(direct: &[TraitId], inherited: &[&TraitSet]) -> TraitSet {
        let mut set = TraitSet::of(direct.iter().copied());
        for parent in inherited {
            for &id in parent.ids.iter() {
                set.insert(id);
            }
        }
        set
    }

    fn insert(&mut self, id: TraitId) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    pub fn contains(&self, id: TraitId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = TraitId> + '_ {
        self.ids.iter().copied()
    }
}

/// A reference-typed runtime value (an instance of a generated class)
pub trait RuntimeObject: Any + Send + Sync + fmt::Debug {
    /// Every trait this object's type implements, transitively
    fn parent_traits(&self) -> &TraitSet;

    /// Name used when the object is rendered
    fn type_name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

pub type ObjectRef = Arc<dyn RuntimeObject>;

/// Whether `value` is an object whose type implements `trait_id`
pub fn instance_of_trait(value: &Value, trait_id: TraitId) -> bool {
    match value {
        Value::Object(obj) => obj.parent_traits().contains(trait_id),
        _ => false,
    }
}

/// Whether two values have the same concrete runtime type
///
/// `Null` has no runtime type, so it never matches, not even another `Null`.
pub fn instance_of(x: &Value, y: &Value) -> bool {
    match (x, y) {
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Native(a), Value::Native(b)) => {
            std::mem::discriminant(a) == std::mem::discriminant(b)
        }
        (Value::Object(a), Value::Object(b)) => a.as_any().type_id() == b.as_any().type_id(),
        _ => std::mem::discriminant(x) == std::mem::discriminant(y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::NativeInt;
    use crate::{Object, Seq};
    use dafny_core::Int;
    use std::sync::LazyLock;

    static SHAPE: LazyLock<TraitId> = LazyLock::new(|| TraitId::register("Shape"));
    static NAMED: LazyLock<TraitId> = LazyLock::new(|| TraitId::register("Named"));
    static POLYGON: LazyLock<TraitId> = LazyLock::new(|| TraitId::register("Polygon"));
    static POLYGON_TRAITS: LazyLock<TraitSet> = LazyLock::new(|| TraitSet::of([*SHAPE]));

    #[derive(Debug)]
    struct Square {
        traits: TraitSet,
    }

    impl RuntimeObject for Square {
        fn parent_traits(&self) -> &TraitSet {
            &self.traits
        }

        fn type_name(&self) -> &str {
            "Shapes.Square"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn square() -> Value {
        let traits = TraitSet::with_parents(&[*POLYGON], &[&*POLYGON_TRAITS]);
        Value::Object(Arc::new(Square { traits }))
    }

    #[test]
    fn test_tokens_compare_by_identity() {
        let a = TraitId::register("Same");
        let b = TraitId::register("Same");
        assert_ne!(a, b);
        assert_eq!(a, a);
    }

    #[test]
    fn test_transitive_membership() {
        let sq = square();
        assert!(instance_of_trait(&sq, *POLYGON));
        assert!(instance_of_trait(&sq, *SHAPE));
        assert!(!instance_of_trait(&sq, *NAMED));
        assert!(!instance_of_trait(&Value::Null, *SHAPE));
        assert!(!instance_of_trait(&Value::Object(Object::new()), *SHAPE));
    }

    #[test]
    fn test_same_type() {
        assert!(instance_of(&square(), &square()));
        assert!(!instance_of(&square(), &Value::Object(Object::new())));
        assert!(instance_of(
            &Value::Int(Int::one()),
            &Value::Int(Int::two())
        ));
        assert!(!instance_of(
            &Value::Native(NativeInt::I8(1)),
            &Value::Native(NativeInt::I16(1))
        ));
        assert!(instance_of(
            &Value::Seq(Seq::empty()),
            &Value::Seq(Seq::of_string("x"))
        ));
        assert!(!instance_of(&Value::Int(Int::one()), &Value::Null));
    }

    #[test]
    fn test_null_has_no_runtime_type() {
        assert!(!instance_of(&Value::Null, &Value::Null));
        assert!(!instance_of(&Value::Null, &square()));
        assert!(!instance_of(&square(), &Value::Null));
    }

    #[test]
    fn test_set_deduplicates() {
        let set = TraitSet::with_parents(&[*SHAPE], &[&*POLYGON_TRAITS]);
        assert_eq!(set.iter().count(), 1);
    }
}
