//! The per-category store contract.
//!
//! An [`IdStore`] knows how to create and read an [`Id`] for exactly one
//! category of host object. Stores are stateless beyond that category
//! binding; all state lives on the host object's attachment slot.

use std::any::{Any, TypeId};

use crate::id::Id;

/// Object-safe view of a host object, as seen by the registry and stores.
///
/// Blanket-implemented for every `'static` type, so callers hand any
/// concrete host object to the registry without the core naming its type.
pub trait HostObject: 'static {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Diagnostic name used in the `UnsupportedType` error.
    fn type_name(&self) -> &'static str;
}

impl<T: Any> HostObject for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A category-specific strategy for assigning and reading ids.
///
/// Each store claims one runtime type via [`supports`](IdStore::supports).
/// Categories must be kept disjoint by convention: the registry scans in
/// registration order and the first match wins, with no validation.
pub trait IdStore: Send + Sync {
    /// True iff this store's category is exactly the given runtime type.
    fn supports(&self, type_id: TypeId) -> bool;

    /// Idempotently ensure the object carries an id.
    ///
    /// No-op when an id is already attached. Otherwise attaches a fresh
    /// [`Id`] and triggers the host's durable save; a save failure is
    /// logged and swallowed, leaving the in-memory assignment in place.
    /// Callers may rely on `make` never failing for persistence reasons.
    fn make(&self, object: &mut dyn HostObject);

    /// Read the current id without side effects. `None` means never assigned.
    fn get(&self, object: &dyn HostObject) -> Option<Id>;
}
