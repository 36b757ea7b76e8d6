//! Names of the filesystem entries a bootstrap run creates in the project root.

use std::path::Path;

/// Entries generated by the package manager in the project root.
///
/// This is the rollback allow-list: cleanup only ever removes entries whose
/// name matches one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedPath {
    /// The `package.json` manifest
    Manifest,
    /// The `node_modules` directory
    Dependencies,
}

impl GeneratedPath {
    /// Every generated entry, in the order cleanup considers them.
    pub const ALL: [GeneratedPath; 2] = [Self::Manifest, Self::Dependencies];

    /// Get the string representation of the entry name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "package.json",
            Self::Dependencies => "node_modules",
        }
    }

    /// Look up a generated entry by its file name.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl AsRef<Path> for GeneratedPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for GeneratedPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for GeneratedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log files a failed install may leave behind.
///
/// Rollback leaves these alone; the next run removes them silently.
pub const INSTALLER_LOG_FILES: [&str; 3] = ["npm-debug.log", "yarn-error.log", "yarn-debug.log"];
