//! Error types for seneca-fs

use std::path::PathBuf;

/// Result type for seneca-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in seneca-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("Manifest at {path} is not a JSON object")]
    ManifestShape { path: PathBuf },

    #[error("Failed to serialize manifest: {0}")]
    ManifestSerialize(#[from] serde_json::Error),

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
