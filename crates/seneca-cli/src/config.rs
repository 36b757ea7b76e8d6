//! Run configuration assembled from the command line

use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Everything a bootstrap run reads, captured once at startup.
///
/// `original_directory` is the directory the tool was started from; relative
/// paths (the project directory, `file:` specifiers) resolve against it. The
/// process working directory is never changed.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub project_directory: PathBuf,
    pub scripts_version: Option<String>,
    pub verbose: bool,
    pub npm: PathBuf,
    pub node: PathBuf,
    pub skip_preflight: bool,
    pub original_directory: PathBuf,
}

impl BootstrapConfig {
    pub fn from_cli(cli: Cli, original_directory: PathBuf) -> Result<Self> {
        let project_directory = cli
            .project_directory
            .ok_or(CliError::MissingProjectDirectory)?;
        Ok(Self {
            project_directory,
            scripts_version: cli.scripts_version,
            verbose: cli.verbose,
            npm: cli.npm,
            node: cli.node,
            skip_preflight: cli.skip_preflight,
            original_directory,
        })
    }
}
