//! Environment checks run before anything is installed
//!
//! Probes that can't run at all (a missing `npm config` line, a spawn
//! failure on the cwd probe) pass: a real problem will surface when the
//! install runs.

use std::path::{Path, PathBuf};

use semver::Version;
use tokio::process::Command;

use crate::config::BootstrapConfig;
use crate::error::{CliError, Result};

const MIN_NODE: Version = Version::new(8, 0, 0);
const MIN_NPM: Version = Version::new(5, 0, 0);
const NPM_CWD_PREFIX: &str = " cwd = ";

/// Run every check for a project rooted at `root`.
pub async fn check_environment(config: &BootstrapConfig, root: &Path) -> Result<()> {
    check_npm_cwd(&config.npm, root).await?;
    check_node_version(&config.node).await?;
    check_npm_version(&config.npm).await?;
    Ok(())
}

async fn probe_version(program: &Path) -> Option<(String, Option<Version>)> {
    let output = Command::new(program).arg("--version").output().await.ok()?;
    if !output.status.success() {
        return None;
    }
    let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let parsed = seneca_resolve::specifier::parse_version(&raw);
    Some((raw, parsed))
}

async fn check_node_version(node: &Path) -> Result<()> {
    match probe_version(node).await {
        Some((_, Some(version))) if version >= MIN_NODE => Ok(()),
        Some((raw, _)) => Err(CliError::preflight(format!(
            "You are using Node {raw}.\n\nPlease update to Node 8 or higher."
        ))),
        None => Err(CliError::preflight(format!(
            "Couldn't run {}.\n\nPlease insure Node 8 or higher has been installed.",
            node.display()
        ))),
    }
}

async fn check_npm_version(npm: &Path) -> Result<()> {
    match probe_version(npm).await {
        Some((_, Some(version))) if version >= MIN_NPM => Ok(()),
        Some((raw, Some(_))) => Err(CliError::preflight(format!(
            "You are using npm {raw}.\n\nPlease update to npm 5 or higher for a consistent, fully supported experience."
        ))),
        _ => Err(CliError::preflight(
            "Couldn't find npm version.\n\nPlease insure npm 5 or higher has been installed globally.",
        )),
    }
}

/// The directory `npm config list` reports as its working directory.
pub fn npm_cwd(config_output: &str) -> Option<&str> {
    config_output
        .lines()
        .find_map(|line| line.strip_prefix(NPM_CWD_PREFIX))
        .map(str::trim_end)
}

/// A misconfigured shell can start npm somewhere other than where it was
/// asked to; catch that before installing into the wrong directory.
async fn check_npm_cwd(npm: &Path, root: &Path) -> Result<()> {
    let output = match Command::new(npm)
        .args(["config", "list"])
        .current_dir(root)
        .output()
        .await
    {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(error = %e, "Skipping npm cwd check");
            return Ok(());
        }
    };
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    let Some(reported) = npm_cwd(&text) else {
        return Ok(());
    };
    let expected: PathBuf = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    if Path::new(reported) == expected {
        return Ok(());
    }

    let mut message = format!(
        "Could not start an npm process in the right directory.\n\n\
         The current directory is: {}\n\
         However, a newly started npm process runs in: {}\n\n\
         This is probably caused by a misconfigured system terminal shell.",
        expected.display(),
        reported
    );
    if cfg!(windows) {
        message.push_str(
            "\n\nOn Windows, this can usually be fixed by running:\n\n  \
             reg delete \"HKCU\\Software\\Microsoft\\Command Processor\" /v AutoRun /f\n  \
             reg delete \"HKLM\\Software\\Microsoft\\Command Processor\" /v AutoRun /f",
        );
    }
    Err(CliError::preflight(message))
}
