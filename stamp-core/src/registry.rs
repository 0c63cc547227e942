//! Category-agnostic dispatch over the registered stores.
//!
//! # API pattern
//!
//! The registry is populated once at process startup by explicit
//! registration (the host platform hands it the store list it discovered),
//! then shared read-only — typically behind an `Arc`. There is no internal
//! locking: `register` needs `&mut self`, everything else is `&self`.
//!
//! Resolution is an ordered linear scan; the first store whose
//! [`IdStore::supports`] predicate answers true wins. Stores registered for
//! overlapping categories are not rejected — keep categories disjoint.

use std::any::TypeId;

use crate::error::IdError;
use crate::id::Id;
use crate::store::{HostObject, IdStore};

/// The dispatcher that picks the right store for a given object and
/// exposes uniform assign/lookup operations.
#[derive(Default)]
pub struct IdRegistry {
    stores: Vec<Box<dyn IdStore>>,
}

impl IdRegistry {
    /// An empty registry. Useful mostly in tests; production callers use
    /// [`with_stores`](IdRegistry::with_stores) at startup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an ordered store list.
    pub fn with_stores(stores: Vec<Box<dyn IdStore>>) -> Self {
        Self { stores }
    }

    /// Append a store. Registration order is resolution order.
    pub fn register(&mut self, store: Box<dyn IdStore>) {
        self.stores.push(store);
    }

    /// First registered store supporting `type_id`, or `None`.
    pub fn resolve(&self, type_id: TypeId) -> Option<&dyn IdStore> {
        self.stores
            .iter()
            .find(|store| store.supports(type_id))
            .map(|store| store.as_ref())
    }

    /// Idempotently assign an id to `object`.
    ///
    /// Delegates to the resolved store's [`IdStore::make`]; read the
    /// assigned value back with [`lookup`](IdRegistry::lookup).
    ///
    /// # Errors
    ///
    /// [`IdError::UnsupportedType`] when no registered store claims the
    /// object's runtime type.
    pub fn assign(&self, object: &mut dyn HostObject) -> Result<(), IdError> {
        let store = self
            .resolve((*object).as_any().type_id())
            .ok_or(IdError::UnsupportedType { type_name: (*object).type_name() })?;
        store.make(object);
        Ok(())
    }

    /// Read `object`'s id. `Ok(None)` means no id has ever been assigned —
    /// a normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// [`IdError::UnsupportedType`] when no registered store claims the
    /// object's runtime type.
    pub fn lookup(&self, object: &dyn HostObject) -> Result<Option<Id>, IdError> {
        let store = self
            .resolve((*object).as_any().type_id())
            .ok_or(IdError::UnsupportedType { type_name: (*object).type_name() })?;
        Ok(store.get(object))
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
