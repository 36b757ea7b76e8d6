//! Handing the project over to the installed scripts package.
//!
//! The scripts package is chosen at install time, so its initializer can't be
//! linked in. Instead every scripts package ships an entry point at a fixed
//! location, `node_modules/<package>/scripts/init.js`, exporting a function
//! `(root, appName, verbose, originalDirectory)`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};

const DEPENDENCIES_DIR: &str = "node_modules";
const ENTRY_POINT: [&str; 2] = ["scripts", "init.js"];

/// Loads the entry point named on the command line and calls it with the
/// remaining arguments.
const INVOKE_ENTRY_POINT: &str = "const [entry, root, appName, verbose, originalDirectory] = process.argv.slice(1);\
require(entry)(root, appName, verbose === 'true', originalDirectory);";

/// Arguments passed to a scripts package's initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    pub root: PathBuf,
    pub app_name: String,
    pub verbose: bool,
    pub original_directory: PathBuf,
}

/// Runs the initializer of an installed scripts package.
#[async_trait]
pub trait Initializer: Send + Sync {
    async fn initialize(&self, package_name: &str, request: &InitRequest) -> Result<()>;
}

/// Locate the initializer entry point of an installed package.
pub fn entry_point(root: &Path, package_name: &str) -> Result<PathBuf> {
    let mut path = root.join(DEPENDENCIES_DIR).join(package_name);
    for segment in ENTRY_POINT {
        path.push(segment);
    }
    if !path.is_file() {
        return Err(Error::EntryPointNotFound {
            package: package_name.to_string(),
            path,
        });
    }
    Ok(path)
}

/// Runs the entry point with the Node.js runtime.
#[derive(Debug, Clone)]
pub struct NodeInitializer {
    runtime: PathBuf,
}

impl NodeInitializer {
    pub fn new(runtime: impl Into<PathBuf>) -> Self {
        Self {
            runtime: runtime.into(),
        }
    }

    fn args(entry: &Path, request: &InitRequest) -> Vec<String> {
        vec![
            "-e".to_string(),
            INVOKE_ENTRY_POINT.to_string(),
            entry.display().to_string(),
            request.root.display().to_string(),
            request.app_name.clone(),
            request.verbose.to_string(),
            request.original_directory.display().to_string(),
        ]
    }
}

impl Default for NodeInitializer {
    fn default() -> Self {
        Self::new("node")
    }
}

#[async_trait]
impl Initializer for NodeInitializer {
    async fn initialize(&self, package_name: &str, request: &InitRequest) -> Result<()> {
        let entry = entry_point(&request.root, package_name)?;
        tracing::debug!(entry = %entry.display(), "Running initializer");

        let status = Command::new(&self.runtime)
            .args(Self::args(&entry, request))
            .current_dir(&request.root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| Error::Spawn {
                program: self.runtime.display().to_string(),
                source,
            })?;

        if !status.success() {
            return Err(Error::InitializerFailed {
                package: package_name.to_string(),
                exit_code: status.code(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_point_for_scoped_package() {
        let temp = tempfile::TempDir::new().unwrap();
        seneca_test_utils::project::installed_package(temp.path(), "@acme/scripts");

        let entry = entry_point(temp.path(), "@acme/scripts").unwrap();
        assert!(entry.ends_with("node_modules/@acme/scripts/scripts/init.js"));
    }

    #[test]
    fn test_missing_entry_point() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = entry_point(temp.path(), "seneca-scripts").unwrap_err();
        assert!(matches!(err, Error::EntryPointNotFound { ref package, .. } if package == "seneca-scripts"));
    }

    #[test]
    fn test_args_pass_request_in_order() {
        let request = InitRequest {
            root: PathBuf::from("/w/svc"),
            app_name: "svc".to_string(),
            verbose: true,
            original_directory: PathBuf::from("/w"),
        };
        let args = NodeInitializer::args(Path::new("/w/svc/node_modules/s/scripts/init.js"), &request);
        assert_eq!(&args[2..], ["/w/svc/node_modules/s/scripts/init.js", "/w/svc", "svc", "true", "/w"]);
    }
}
