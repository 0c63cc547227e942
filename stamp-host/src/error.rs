//! Error types for stamp-host.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from host object storage.
#[derive(Debug, Error)]
pub enum HostError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse object state at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The object's state file did not exist at the expected path.
    #[error("object not found at {path}")]
    NotFound { path: PathBuf },
}
