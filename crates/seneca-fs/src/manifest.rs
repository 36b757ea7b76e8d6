//! The project's `package.json` manifest
//!
//! The document is kept as an ordered JSON object so that rewriting it after
//! an install keeps the key order the package manager produced.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::constants::GeneratedPath;
use crate::{Error, Result, io};

/// Version written into a freshly created project manifest.
pub const INITIAL_VERSION: &str = "0.1.0";

/// A `package.json` document bound to its location on disk.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    doc: Map<String, Value>,
}

impl Manifest {
    /// Path of the manifest inside a project root.
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(GeneratedPath::Manifest.as_str())
    }

    /// Write the initial manifest (`name`, `version`, `private`) for a new project.
    pub fn create_initial(root: &Path, app_name: &str) -> Result<Self> {
        let mut doc = Map::new();
        doc.insert("name".into(), Value::from(app_name));
        doc.insert("version".into(), Value::from(INITIAL_VERSION));
        doc.insert("private".into(), Value::Bool(true));
        let manifest = Self {
            path: Self::path_in(root),
            doc,
        };
        manifest.save()?;
        tracing::debug!(path = %manifest.path.display(), "Wrote initial manifest");
        Ok(manifest)
    }

    /// Load the manifest from a project (or package) directory.
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_file(&Self::path_in(dir))
    }

    /// Load a manifest from an explicit file path.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = io::read_text(path)?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| Error::ManifestParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        match value {
            Value::Object(doc) => Ok(Self {
                path: path.to_path_buf(),
                doc,
            }),
            _ => Err(Error::ManifestShape {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The declared package name, if any.
    pub fn name(&self) -> Option<&str> {
        self.doc.get("name").and_then(Value::as_str)
    }

    /// The `dependencies` mapping, if the manifest has one.
    pub fn dependencies(&self) -> Option<&Map<String, Value>> {
        self.doc.get("dependencies").and_then(Value::as_object)
    }

    pub fn dependencies_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.doc.get_mut("dependencies").and_then(Value::as_object_mut)
    }

    /// Version string recorded for a dependency.
    pub fn dependency_version(&self, name: &str) -> Option<&str> {
        self.dependencies()?.get(name).and_then(Value::as_str)
    }

    /// Render as 2-space indented JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.doc)?;
        out.push('\n');
        Ok(out)
    }

    /// Write the manifest back to its path.
    pub fn save(&self) -> Result<()> {
        io::write_text(&self.path, &self.to_pretty_string()?)
    }
}
