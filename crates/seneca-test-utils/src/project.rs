//! Project directories in the states a bootstrap run moves them through.

use std::fs;
use std::path::Path;

/// Dependency versions a successful install records, one per base dependency.
pub const INSTALLED_VERSIONS: [(&str, &str); 6] = [
    ("code", "5.2.4"),
    ("lab", "18.0.2"),
    ("pino", "5.12.6"),
    ("seneca", "3.13.2"),
    ("seneca-balance-client", "1.2.0"),
    ("seneca-pino-adapter", "1.0.2"),
];

/// Writes `root/package.json` as the package manager leaves it after
/// installing `deps` (name, exact version) with `--save --save-exact`.
///
/// # Panics
/// Panics if the write fails.
pub fn installed_manifest(root: &Path, app_name: &str, deps: &[(&str, &str)]) {
    let mut dependencies = serde_json::Map::new();
    for (name, version) in deps {
        dependencies.insert((*name).to_string(), serde_json::Value::from(*version));
    }
    let manifest = serde_json::json!({
        "name": app_name,
        "version": "0.1.0",
        "private": true,
        "dependencies": dependencies,
    });
    let content = format!(
        "{}\n",
        serde_json::to_string_pretty(&manifest).unwrap_or_else(|e| panic!("{e}"))
    );
    fs::write(root.join("package.json"), content)
        .unwrap_or_else(|e| panic!("installed_manifest: failed to write package.json: {e}"));
}

/// The base dependency versions plus `package_name` at `package_version`.
pub fn installed_versions_with<'a>(
    package_name: &'a str,
    package_version: &'a str,
) -> Vec<(&'a str, &'a str)> {
    let mut deps = INSTALLED_VERSIONS.to_vec();
    deps.push((package_name, package_version));
    deps
}

/// Creates `root/node_modules/<package_name>/scripts/init.js`.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn installed_package(root: &Path, package_name: &str) {
    let scripts = root.join("node_modules").join(package_name).join("scripts");
    fs::create_dir_all(&scripts)
        .unwrap_or_else(|e| panic!("installed_package: failed to create {}: {e}", scripts.display()));
    fs::write(scripts.join("init.js"), "module.exports = () => {}\n")
        .unwrap_or_else(|e| panic!("installed_package: failed to write init.js: {e}"));
}

/// Creates a local package directory declaring `package_name`.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn local_package(dir: &Path, package_name: &str) {
    fs::create_dir_all(dir)
        .unwrap_or_else(|e| panic!("local_package: failed to create {}: {e}", dir.display()));
    let manifest = serde_json::json!({ "name": package_name, "version": "0.0.1" });
    fs::write(dir.join("package.json"), manifest.to_string())
        .unwrap_or_else(|e| panic!("local_package: failed to write package.json: {e}"));
}
