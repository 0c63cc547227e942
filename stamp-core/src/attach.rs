//! The attachment contract between the core and the host platform.
//!
//! Host objects expose a mutable key-value slot that is serialized and
//! durably saved together with the rest of the object's state. The core
//! never persists anything itself; it writes through this trait and calls
//! [`Attachments::persist`] at the moments the assignment protocol requires.

use std::error::Error;

use thiserror::Error as ThisError;

/// Failure reported by a host object's durable-save machinery.
///
/// Stores catch and log this; it never crosses the registry boundary.
#[derive(Debug, ThisError)]
#[error("failed to persist attachments: {0}")]
pub struct PersistError(#[source] Box<dyn Error + Send + Sync>);

impl PersistError {
    pub fn new(source: impl Error + Send + Sync + 'static) -> Self {
        Self(Box::new(source))
    }
}

/// A persistable key-value metadata slot on a host object.
///
/// The host object owns the slot and serializes it with its own state.
/// Mutations to one object are assumed to be serialized by the host
/// platform; this layer adds no locking of its own.
pub trait Attachments {
    /// Read an attachment value. `None` means the key was never set.
    fn attachment(&self, key: &str) -> Option<&str>;

    /// Set or overwrite an attachment value in memory.
    fn set_attachment(&mut self, key: &str, value: String);

    /// Durably save the object, attachments included. Blocking I/O.
    fn persist(&mut self) -> Result<(), PersistError>;
}
