//! Error types for the create-seneca-service binary

use std::path::PathBuf;

use crate::bootstrap::{Failure, Stage};

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Fs(#[from] seneca_fs::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No project directory on the command line
    #[error("Please specify the project directory")]
    MissingProjectDirectory,

    /// The project directory has no usable final component
    #[error("Could not determine a service name from {path}")]
    InvalidProjectDirectory { path: PathBuf },

    /// The environment can't run the bootstrap
    #[error("{message}")]
    Preflight { message: String },

    /// The installed project is inconsistent; nothing was rolled back
    #[error(transparent)]
    Fatal(seneca_install::Error),

    /// The run failed and generated files were rolled back
    #[error("Installation aborted during {stage:?}: {failure}")]
    Aborted {
        stage: Stage,
        failure: Failure,
        root_removed: bool,
    },
}

impl CliError {
    pub fn preflight(message: impl Into<String>) -> Self {
        Self::Preflight {
            message: message.into(),
        }
    }

    /// Whether the user has already been told about this error.
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::Aborted { .. } | Self::MissingProjectDirectory)
    }
}
