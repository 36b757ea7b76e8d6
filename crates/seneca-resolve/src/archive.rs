//! Reading the package name out of a tarball.
//!
//! The archive is fetched (or opened) and unpacked into a scoped temporary
//! directory that is removed before returning, on success and on failure.

use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

const DOWNLOAD_FILE: &str = "download.tgz";
const EXTRACT_DIR: &str = "package";

/// Whether an archive location should be downloaded rather than opened.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http")
}

/// Unpack the archive at `location` and return the `name` its manifest declares.
pub async fn read_package_name(location: &str) -> Result<String> {
    let workdir = tempfile::Builder::new()
        .prefix("seneca-archive-")
        .tempdir()
        .map_err(Error::Extract)?;

    let archive_path = if is_remote(location) {
        let dest = workdir.path().join(DOWNLOAD_FILE);
        download(location, &dest).await?;
        dest
    } else {
        PathBuf::from(location)
    };

    let extract_dir = workdir.path().join(EXTRACT_DIR);
    let target = extract_dir.clone();
    tokio::task::spawn_blocking(move || extract_tarball(&archive_path, &target))
        .await?
        .map_err(Error::Extract)?;

    let manifest = seneca_fs::Manifest::load(&extract_dir)?;
    let name = manifest
        .name()
        .ok_or_else(|| Error::MissingName {
            path: manifest.path().display().to_string(),
        })?
        .to_string();

    if let Err(e) = workdir.close() {
        tracing::warn!(error = %e, "Failed to remove temporary extraction directory");
    }
    Ok(name)
}

/// Stream a remote archive to `dest`.
async fn download(url: &str, dest: &Path) -> Result<()> {
    tracing::debug!(url, "Downloading archive");
    let download_err = |source| Error::Download {
        url: url.to_string(),
        source,
    };

    let mut response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(download_err)?;

    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| seneca_fs::Error::io(dest, e))?;
    while let Some(chunk) = response.chunk().await.map_err(download_err)? {
        file.write_all(&chunk)
            .await
            .map_err(|e| seneca_fs::Error::io(dest, e))?;
    }
    file.flush().await.map_err(|e| seneca_fs::Error::io(dest, e))?;
    Ok(())
}

/// Unpack a gzipped tarball into `dest`, dropping the top-level directory.
///
/// npm packs everything under `package/`; stripping it puts the package
/// manifest directly at `dest/package.json`. Entries that would land outside
/// `dest` are skipped, and so is anything but plain files and directories:
/// a symlink or hard link in the archive could otherwise redirect a later
/// entry out of `dest`.
pub fn extract_tarball(archive: &Path, dest: &Path) -> std::io::Result<()> {
    let file = File::open(archive)?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    fs::create_dir_all(dest)?;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();
        let kind = entry.header().entry_type();
        if !(kind.is_file() || kind.is_dir()) {
            tracing::debug!(path = %path.display(), ?kind, "Skipping archive entry");
            continue;
        }
        let Some(relative) = strip_top_level(&path) else {
            continue;
        };
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        entry.unpack(&target)?;
    }
    Ok(())
}

fn strip_top_level(path: &Path) -> Option<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(_)) => {}
        _ => return None,
    }
    let mut relative = PathBuf::new();
    for component in components {
        match component {
            Component::Normal(segment) => relative.push(segment),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}
