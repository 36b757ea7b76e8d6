//! Lexical path resolution
//!
//! Paths are resolved without touching the filesystem, so a `file:` specifier
//! or a project directory that does not exist yet still resolves.

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base`, collapsing `.` and `..` segments.
///
/// An absolute `path` ignores `base`. `..` never climbs above the root.
pub fn resolve_path(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    clean(&joined)
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // pop() is a no-op at the root
                if out.file_name().is_some() {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}

/// The application name for a project root: its last path component.
pub fn app_name(root: &Path) -> Option<String> {
    root.file_name().map(|n| n.to_string_lossy().into_owned())
}
