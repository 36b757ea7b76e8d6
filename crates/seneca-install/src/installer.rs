//! Package manager invocation

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::deps::DependencySet;
use crate::error::{Error, Result};

/// Installs a dependency set into a project root.
#[async_trait]
pub trait Installer: Send + Sync {
    async fn install(&self, root: &Path, dependencies: &DependencySet, verbose: bool)
    -> Result<()>;
}

/// Installs through `npm install --save --save-exact`.
///
/// Output is streamed straight to the terminal. There is no timeout: the
/// install runs as long as npm needs.
#[derive(Debug, Clone)]
pub struct NpmInstaller {
    program: PathBuf,
}

impl NpmInstaller {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments for installing `dependencies`.
    pub fn args(dependencies: &DependencySet, verbose: bool) -> Vec<String> {
        let mut args: Vec<String> = ["install", "--save", "--save-exact", "--loglevel", "error"]
            .into_iter()
            .map(String::from)
            .collect();
        if verbose {
            args.push("--verbose".to_string());
        }
        args.extend(dependencies.iter().map(String::from));
        args
    }

    /// The command line as reported when the install fails.
    pub fn command_line(&self, args: &[String]) -> String {
        format!("{} {}", self.program.display(), args.join(" "))
    }
}

impl Default for NpmInstaller {
    fn default() -> Self {
        Self::new("npm")
    }
}

#[async_trait]
impl Installer for NpmInstaller {
    async fn install(
        &self,
        root: &Path,
        dependencies: &DependencySet,
        verbose: bool,
    ) -> Result<()> {
        let args = Self::args(dependencies, verbose);
        tracing::debug!(command = %self.command_line(&args), root = %root.display(), "Running installer");

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| Error::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !status.success() {
            return Err(Error::CommandFailed {
                command: self.command_line(&args),
                exit_code: status.code(),
            });
        }

        Ok(())
    }
}
