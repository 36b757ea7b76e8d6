//! Allow-list based cleanup of generated project entries.
//!
//! Rollback never keeps a ledger of what a run created. It re-derives the set
//! by intersecting the current directory listing with [`GeneratedPath::ALL`],
//! so files the caller put in the directory are never touched.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use backoff::ExponentialBackoff;

use crate::constants::{GeneratedPath, INSTALLER_LOG_FILES};
use crate::{Error, Result};

const REMOVE_RETRY_WINDOW: Duration = Duration::from_secs(2);

fn list_names(root: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(root).map_err(|e| Error::io(root, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(root, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Generated entries currently present in `root`, in allow-list order.
pub fn generated_entries(root: &Path) -> Result<Vec<GeneratedPath>> {
    let names = list_names(root)?;
    Ok(GeneratedPath::ALL
        .into_iter()
        .filter(|generated| names.iter().any(|n| n == generated.as_str()))
        .collect())
}

/// Remove a generated entry from `root`, recursively for directories.
///
/// Transient failures (a file briefly held open by an exiting installer) are
/// retried with exponential backoff. An entry that is already gone is not an
/// error.
pub fn remove_generated(root: &Path, entry: GeneratedPath) -> Result<()> {
    let path = root.join(entry.as_str());
    let policy = ExponentialBackoff {
        max_elapsed_time: Some(REMOVE_RETRY_WINDOW),
        ..ExponentialBackoff::default()
    };

    let op = || {
        let removed = match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(&path),
            Ok(_) => fs::remove_file(&path),
            Err(e) => Err(e),
        };
        match removed {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Retrying removal");
                Err(backoff::Error::transient(e))
            }
        }
    };

    backoff::retry(policy, op).map_err(|e| match e {
        backoff::Error::Permanent(err) | backoff::Error::Transient { err, .. } => {
            Error::io(&path, err)
        }
    })
}

/// Whether `dir` has no entries left.
pub fn is_empty_dir(dir: &Path) -> Result<bool> {
    Ok(list_names(dir)?.is_empty())
}

/// Remove `root` itself if nothing is left in it.
///
/// Returns whether the directory was removed.
pub fn remove_root_if_empty(root: &Path) -> Result<bool> {
    if !is_empty_dir(root)? {
        return Ok(false);
    }
    fs::remove_dir(root).map_err(|e| Error::io(root, e))?;
    Ok(true)
}

/// Silently remove installer logs a previous failed run left in `root`.
///
/// Returns the names that were removed.
pub fn remove_stray_logs(root: &Path) -> Result<Vec<String>> {
    let mut removed = Vec::new();
    for name in list_names(root)? {
        if !INSTALLER_LOG_FILES.contains(&name.as_str()) {
            continue;
        }
        let path = root.join(&name);
        if path.is_file() {
            fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
            tracing::debug!(file = %name, "Removed stray installer log");
            removed.push(name);
        }
    }
    Ok(removed)
}
