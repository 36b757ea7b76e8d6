//! Specifier resolution
//!
//! Classification is purely lexical: nothing here touches the network or the
//! filesystem. Anything that is not a version or a `file:` reference is
//! forwarded as-is and the package manager decides whether it is valid.

use std::fmt;
use std::path::{Path, PathBuf};

use semver::{BuildMetadata, Version};

/// Package installed when no specifier is given.
pub const BASE_PACKAGE: &str = "seneca-scripts";

const FILE_PREFIX: &str = "file:";
const GIT_PREFIX: &str = "git+";
const TARBALL_EXTENSIONS: [&str; 2] = [".tgz", ".tar.gz"];

/// A specifier normalized into something the package manager can install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallableReference {
    /// A registry package, optionally pinned to an exact version
    Registry {
        name: String,
        version: Option<Version>,
    },
    /// A local package directory (`file:<absolute path>`)
    File(PathBuf),
    /// A local path or URL to a `.tgz` / `.tar.gz` archive
    Tarball(String),
    /// A `git+` repository URL, possibly with a `#ref` fragment
    Git(String),
    /// Any other string, forwarded unchanged (tags, scoped names, ranges)
    Tag(String),
}

impl InstallableReference {
    /// The default reference: the base package at its latest version.
    pub fn base() -> Self {
        Self::Registry {
            name: BASE_PACKAGE.to_string(),
            version: None,
        }
    }

    /// Classify a string that is neither a version nor a `file:` reference.
    pub fn opaque(raw: &str) -> Self {
        if is_tarball(raw) {
            Self::Tarball(raw.to_string())
        } else if raw.starts_with(GIT_PREFIX) {
            Self::Git(raw.to_string())
        } else {
            Self::Tag(raw.to_string())
        }
    }

    /// The argument handed to the package manager.
    pub fn to_install_arg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InstallableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry {
                name,
                version: Some(version),
            } => write!(f, "{name}@{version}"),
            Self::Registry {
                name,
                version: None,
            } => write!(f, "{name}"),
            Self::File(path) => write!(f, "{FILE_PREFIX}{}", path.display()),
            Self::Tarball(raw) | Self::Git(raw) | Self::Tag(raw) => write!(f, "{raw}"),
        }
    }
}

/// Resolve a raw specifier against the directory the tool was started from.
///
/// 1. A valid semantic version pins the base package: `seneca-scripts@<version>`.
/// 2. `file:<path>` resolves `<path>` against `base_dir`.
/// 3. Any other non-empty string passes through.
/// 4. No specifier (or an empty one) installs the base package.
pub fn resolve(specifier: Option<&str>, base_dir: &Path) -> InstallableReference {
    let raw = match specifier {
        Some(raw) if !raw.is_empty() => raw,
        _ => return InstallableReference::base(),
    };

    if let Some(version) = parse_version(raw) {
        return InstallableReference::Registry {
            name: BASE_PACKAGE.to_string(),
            version: Some(version),
        };
    }

    if let Some(path) = raw.strip_prefix(FILE_PREFIX) {
        return InstallableReference::File(seneca_fs::resolve_path(base_dir, path));
    }

    InstallableReference::opaque(raw)
}

/// Parse a version the way npm's `semver.valid` does.
///
/// Surrounding whitespace and a single leading `v` are accepted. Build
/// metadata is dropped from the normalized version.
pub fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let mut version = Version::parse(trimmed).ok()?;
    version.build = BuildMetadata::EMPTY;
    Some(version)
}

/// Whether a reference names a gzipped tarball.
pub fn is_tarball(raw: &str) -> bool {
    TARBALL_EXTENSIONS
        .iter()
        .any(|ext| raw.len() > ext.len() && raw.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_specifier_is_base_package() {
        assert_eq!(resolve(None, Path::new("/w")), InstallableReference::base());
        assert_eq!(resolve(Some(""), Path::new("/w")), InstallableReference::base());
        assert_eq!(InstallableReference::base().to_install_arg(), "seneca-scripts");
    }

    #[test]
    fn test_version_drops_build_metadata() {
        let resolved = resolve(Some("1.2.3+build.7"), Path::new("/w"));
        assert_eq!(resolved.to_install_arg(), "seneca-scripts@1.2.3");
    }

    #[test]
    fn test_leading_v_is_a_version() {
        let resolved = resolve(Some(" v2.0.0-beta.1 "), Path::new("/w"));
        assert_eq!(resolved.to_install_arg(), "seneca-scripts@2.0.0-beta.1");
    }

    #[test]
    fn test_partial_version_is_opaque() {
        assert_eq!(
            resolve(Some("2.1"), Path::new("/w")),
            InstallableReference::Tag("2.1".to_string())
        );
    }

    #[test]
    fn test_bare_extension_is_not_a_tarball() {
        assert!(!is_tarball(".tgz"));
        assert!(is_tarball("a.tgz"));
        assert!(is_tarball("https://example.com/x-1.0.0.tar.gz"));
    }
}
