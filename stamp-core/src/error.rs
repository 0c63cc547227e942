//! Error types for stamp-core.

use thiserror::Error;

/// All errors that can cross the registry boundary.
///
/// Persistence failures deliberately do not appear here — they are logged
/// and absorbed inside [`IdStore::make`](crate::store::IdStore::make).
#[derive(Debug, Error)]
pub enum IdError {
    /// No registered store claims the object's runtime type. Indicates a
    /// registration gap, not a transient fault.
    #[error("unsupported type: {type_name}")]
    UnsupportedType { type_name: &'static str },
}
