//! Error types for seneca-resolve
//!
//! None of these escape [`crate::extract_name`]; they describe why a package
//! name had to be guessed instead of read.

/// Result type for seneca-resolve operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] seneca_fs::Error),

    #[error("Failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to extract archive: {0}")]
    Extract(#[source] std::io::Error),

    #[error("Archive extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Manifest at {path} has no name field")]
    MissingName { path: String },
}
