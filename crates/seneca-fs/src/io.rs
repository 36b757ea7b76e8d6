//! Manifest-safe file writes
//!
//! The package manager and the initializer both read `package.json` after we
//! touch it, so a rewrite must never leave a truncated file behind.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Result};

/// Hidden sibling of `path` that receives the content before the rename.
fn temp_sibling(path: &Path) -> PathBuf {
    let stem = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "manifest".to_string());
    path.with_file_name(format!(".{stem}.{}.partial", std::process::id()))
}

fn fill_locked(file: &mut File, target: &Path, temp: &Path, content: &[u8]) -> Result<()> {
    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;
    file.write_all(content).map_err(|e| Error::io(temp, e))?;
    file.sync_all().map_err(|e| Error::io(temp, e))?;
    FileExt::unlock(file).map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })
}

/// Replace `path` with `content` in one step.
///
/// The bytes go to a locked sibling first and are renamed over the target,
/// so readers see either the old file or the new one. The sibling is removed
/// if anything fails along the way.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }

    let temp = temp_sibling(path);
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp)
        .map_err(|e| Error::io(&temp, e))?;

    let written = fill_locked(&mut file, path, &temp, content);
    drop(file);

    let result = written.and_then(|()| fs::rename(&temp, path).map_err(|e| Error::io(path, e)));
    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result
}

/// Read a whole file as UTF-8.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// [`write_atomic`] for text.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
