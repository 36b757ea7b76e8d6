//! Error types for seneca-install

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] seneca_fs::Error),

    #[error("{command} has failed")]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing dependencies in package.json")]
    MissingDependencies,

    #[error("Unable to find {name} in package.json")]
    PackageNotInstalled { name: String },

    #[error("Missing {name} dependency in package.json")]
    MissingDependency { name: String },

    #[error("Initializer for {package} not found at {path}")]
    EntryPointNotFound { package: String, path: PathBuf },

    #[error("Initializer for {package} failed ({})", exit_label(.exit_code))]
    InitializerFailed {
        package: String,
        exit_code: Option<i32>,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl Error {
    /// The package manager command line, for failures that came from one.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { command, .. } => Some(command),
            _ => None,
        }
    }

    /// Whether the project is in a state too inconsistent to roll back.
    ///
    /// These come from the pin step: the install reported success but the
    /// manifest doesn't contain what it should.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingDependencies
                | Self::PackageNotInstalled { .. }
                | Self::MissingDependency { .. }
        )
    }
}
