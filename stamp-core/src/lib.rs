//! Stamp core library — persistent unique-id assignment for host objects.
//!
//! Assigns a globally unique, immutable 30-character identifier to host
//! platform objects and reads it back without knowing the concrete type
//! being queried. Public API surface:
//! - [`id`] — the [`Id`] value and its frozen encoding
//! - [`attach`] — the [`Attachments`] contract host objects implement
//! - [`store`] — the per-category [`IdStore`] trait
//! - [`registry`] — [`IdRegistry`] assign / lookup dispatch
//! - [`error`] — [`IdError`]
//!
//! Persistence of the assigned id rides on the host object's own durable
//! save; a failed save is logged by the store and swallowed, so an id is
//! always assigned in memory but only best-effort persisted.

pub mod attach;
pub mod error;
pub mod id;
pub mod registry;
pub mod store;

pub use attach::{Attachments, PersistError};
pub use error::IdError;
pub use id::{Id, ID_KEY, ID_LEN};
pub use registry::IdRegistry;
pub use store::{HostObject, IdStore};
