//! Relaxing exact runtime dependency versions to caret ranges.
//!
//! The package manager is run with `--save-exact`; once the install is done
//! the runtime dependencies are rewritten from `1.2.3` to `^1.2.3` so the
//! generated service picks up compatible updates.

use std::path::Path;

use semver::VersionReq;
use serde_json::Value;
use seneca_fs::Manifest;

use crate::deps::RUNTIME_DEPENDENCIES;
use crate::error::{Error, Result};

/// What happened to one runtime dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinOutcome {
    /// Rewritten to a caret range
    Pinned { name: String, range: String },
    /// Left as it was because the caret form would not be a valid range
    Kept { name: String, version: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinReport {
    pub outcomes: Vec<PinOutcome>,
}

/// Caret range for `version`, or the version itself when `^<version>`
/// wouldn't parse as a range.
pub fn caret_range(name: &str, version: &str) -> PinOutcome {
    let patched = format!("^{version}");
    match VersionReq::parse(&patched) {
        Ok(_) => PinOutcome::Pinned {
            name: name.to_string(),
            range: patched,
        },
        Err(e) => {
            tracing::warn!(
                "Unable to patch {} dependency version because version {} will become invalid {} ({})",
                name,
                version,
                patched,
                e
            );
            PinOutcome::Kept {
                name: name.to_string(),
                version: version.to_string(),
            }
        }
    }
}

/// Pin the runtime dependencies in `root/package.json`.
///
/// Fails without writing anything if the manifest has no dependencies, if
/// `package_name` isn't among them, or if any runtime dependency is missing.
pub fn pin_runtime_versions(root: &Path, package_name: &str) -> Result<PinReport> {
    let mut manifest = Manifest::load(root)?;
    let dependencies = manifest
        .dependencies_mut()
        .ok_or(Error::MissingDependencies)?;

    if !dependencies.contains_key(package_name) {
        return Err(Error::PackageNotInstalled {
            name: package_name.to_string(),
        });
    }

    let mut report = PinReport::default();
    for name in RUNTIME_DEPENDENCIES {
        let version = match dependencies.get(name) {
            Some(Value::String(version)) => version.clone(),
            Some(other) => other.to_string(),
            None => {
                return Err(Error::MissingDependency {
                    name: name.to_string(),
                });
            }
        };

        let outcome = caret_range(name, &version);
        if let PinOutcome::Pinned { range, .. } = &outcome {
            dependencies.insert(name.to_string(), Value::from(range.as_str()));
        }
        report.outcomes.push(outcome);
    }

    manifest.save()?;
    tracing::debug!(path = %manifest.path().display(), "Pinned runtime dependencies");
    Ok(report)
}
