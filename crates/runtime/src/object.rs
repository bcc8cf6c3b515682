//! The plain identity object
//!
//! `object` has no fields and no parent traits; it is equal only to itself.
//! Cleanup actions can be attached and run once, when the last reference is
//! dropped. They are advisory: nothing in the runtime depends on them.

use crate::traits::{RuntimeObject, TraitSet};
use std::any::Any;
use std::fmt;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

type Finalizer = Box<dyn FnOnce() + Send>;

static NO_TRAITS: LazyLock<TraitSet> = LazyLock::new(TraitSet::empty);

#[derive(Default)]
pub struct Object {
    finalizers: Mutex<Vec<Finalizer>>,
}

impl Object {
    pub fn new() -> Arc<Object> {
        Arc::new(Object::default())
    }

    /// Run `f` when this object is dropped
    pub fn add_finalizer(&self, f: impl FnOnce() + Send + 'static) {
        self.finalizers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(f));
    }
}

impl Drop for Object {
    fn drop(&mut self) {
        let finalizers = std::mem::take(
            self.finalizers
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner),
        );
        if !finalizers.is_empty() {
            tracing::trace!(count = finalizers.len(), "running object finalizers");
        }
        for f in finalizers {
            f();
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({:p})", self)
    }
}

impl RuntimeObject for Object {
    fn parent_traits(&self) -> &TraitSet {
        &NO_TRAITS
    }

    fn type_name(&self) -> &str {
        "object"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
