//! Package name discovery
//!
//! The name a reference installs under is not always visible in the
//! reference itself: a tarball, git URL or local directory can hold a package
//! whose declared name is anything. Discovery reads it where it can and
//! guesses from the reference where it can't.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::archive;
use crate::specifier::{InstallableReference, is_tarball};

/// `<dir>/<name>[-<version>].tgz`, e.g. `seneca-scripts-0.2.0-alpha.1.tgz`
static ARCHIVE_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:.*[/\\])?(.+?)(?:-\d+.+)?\.(?:tgz|tar\.gz)$").unwrap()
});

/// `.../<name>.git[#ref]`
static GIT_REPOSITORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^/]+)\.git(?:#.*)?$").unwrap());

/// The name a package registers under in the manifest's dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Discover the package name for a resolved reference.
///
/// Never fails: when a tarball can't be fetched or read, or a local package
/// has no readable manifest, the name is inferred from the reference and the
/// package manager remains the authority on what actually gets installed.
pub async fn extract_name(reference: &InstallableReference) -> PackageName {
    match reference {
        InstallableReference::Registry { name, .. } => PackageName::new(name.as_str()),
        InstallableReference::Tarball(location) => name_from_archive(location).await,
        InstallableReference::Git(url) => name_from_git_url(url),
        InstallableReference::Tag(raw) => strip_version_tag(raw),
        InstallableReference::File(path) => {
            let location = path.display().to_string();
            if is_tarball(&location) {
                name_from_archive(&location).await
            } else {
                name_from_package_dir(path)
            }
        }
    }
}

async fn name_from_archive(location: &str) -> PackageName {
    match archive::read_package_name(location).await {
        Ok(name) => PackageName::new(name),
        Err(e) => {
            tracing::warn!(
                "Could not extract the package name from the archive: {}",
                e
            );
            let assumed = name_from_archive_filename(location);
            tracing::warn!("Based on the filename, assuming it is \"{}\"", assumed);
            assumed
        }
    }
}

/// Guess a package name from an archive file name, dropping the version suffix.
pub fn name_from_archive_filename(location: &str) -> PackageName {
    let name = ARCHIVE_FILENAME
        .captures(location)
        .and_then(|c| c.get(1))
        .map_or(location, |m| m.as_str());
    PackageName::new(name)
}

/// Take the repository name from a git URL, ignoring any `#ref` fragment.
pub fn name_from_git_url(url: &str) -> PackageName {
    if let Some(name) = GIT_REPOSITORY.captures(url).and_then(|c| c.get(1)) {
        return PackageName::new(name.as_str());
    }
    let without_ref = url.split('#').next().unwrap_or(url).trim_end_matches('/');
    let name = without_ref
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(without_ref);
    PackageName::new(name)
}

/// Drop an `@version` or `@tag` suffix, keeping a leading `@scope/`.
pub fn strip_version_tag(raw: &str) -> PackageName {
    let Some(first) = raw.chars().next() else {
        return PackageName::new(raw);
    };
    let rest = &raw[first.len_utf8()..];
    let unversioned = rest.split('@').next().unwrap_or(rest);
    PackageName::new(format!("{first}{unversioned}"))
}

fn name_from_package_dir(path: &Path) -> PackageName {
    match seneca_fs::Manifest::load(path) {
        Ok(manifest) => {
            if let Some(name) = manifest.name() {
                return PackageName::new(name);
            }
            tracing::warn!(path = %path.display(), "Local package manifest has no name");
        }
        Err(e) => tracing::warn!("Could not read the local package manifest: {}", e),
    }
    let fallback = seneca_fs::app_name(path).unwrap_or_else(|| path.display().to_string());
    tracing::warn!("Based on the directory, assuming it is \"{}\"", fallback);
    PackageName::new(fallback)
}
