//! Stamp host library — concrete host platform objects and their stores.
//!
//! Public API surface:
//! - [`objects`] — [`Project`] / [`Run`] / [`Folder`] with YAML-backed state
//! - [`stores`] — the per-category [`IdStore`](stamp_core::IdStore) impls and
//!   [`default_registry`]
//! - [`error`] — [`HostError`]

pub mod error;
pub mod objects;
pub mod stores;

pub use error::HostError;
pub use objects::{Folder, FolderName, Project, ProjectName, Run, RunNumber};
pub use stores::{default_registry, FolderIdStore, ProjectIdStore, RunIdStore};
