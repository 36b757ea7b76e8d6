//! Stand-in executables for `npm` and `node`.
//!
//! Unix only: the scripts are `/bin/sh` with the executable bit set.

use std::fs;
use std::path::{Path, PathBuf};

/// Writes an executable shell script `dir/name` running `body`.
///
/// # Panics
/// Panics if the filesystem operations fail.
#[cfg(unix)]
pub fn fake_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))
        .unwrap_or_else(|e| panic!("fake_executable: failed to write {}: {e}", path.display()));
    let mut perms = fs::metadata(&path)
        .unwrap_or_else(|e| panic!("fake_executable: failed to stat {}: {e}", path.display()))
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms)
        .unwrap_or_else(|e| panic!("fake_executable: failed to chmod {}: {e}", path.display()));
    path
}

/// Where the fakes in this module record their arguments.
pub fn args_file(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}-args.txt"))
}

/// A package manager that records its arguments to `dir/npm-args.txt` and
/// exits with `code`.
#[cfg(unix)]
pub fn failing_npm(dir: &Path, code: i32) -> PathBuf {
    let record = args_file(dir, "npm");
    fake_executable(
        dir,
        "npm",
        &format!("echo \"$@\" > '{}'\nexit {code}", record.display()),
    )
}

/// A package manager that performs a successful install of `package_name`
/// in its working directory: writes the installed manifest and the package's
/// `scripts/init.js`. Arguments are recorded to `dir/npm-args.txt`.
#[cfg(unix)]
pub fn installing_npm(dir: &Path, package_name: &str) -> PathBuf {
    let record = args_file(dir, "npm");
    let manifest = {
        let mut deps = String::new();
        for (name, version) in crate::project::INSTALLED_VERSIONS {
            deps.push_str(&format!("    \"{name}\": \"{version}\",\n"));
        }
        deps.push_str(&format!("    \"{package_name}\": \"1.0.0\"\n"));
        format!(
            "{{\n  \"name\": \"app\",\n  \"version\": \"0.1.0\",\n  \"private\": true,\n  \"dependencies\": {{\n{deps}  }}\n}}"
        )
    };
    fake_executable(
        dir,
        "npm",
        &format!(
            "echo \"$@\" > '{}'\n\
             mkdir -p node_modules/{package_name}/scripts\n\
             echo 'module.exports = () => {{}}' > node_modules/{package_name}/scripts/init.js\n\
             cat > package.json <<'JSON'\n{manifest}\nJSON\n\
             exit 0",
            record.display()
        ),
    )
}

/// A runtime that records the initializer invocation (everything after
/// `-e <script>`) to `dir/node-args.txt` and exits with `code`.
#[cfg(unix)]
pub fn recording_node(dir: &Path, code: i32) -> PathBuf {
    let record = args_file(dir, "node");
    fake_executable(
        dir,
        "node",
        &format!("shift 2\necho \"$@\" > '{}'\nexit {code}", record.display()),
    )
}
