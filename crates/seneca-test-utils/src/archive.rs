//! npm-style package tarballs.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Writes a gzipped tarball at `dir/file_name` laid out the way `npm pack`
/// does: everything under `package/`, with a `package/package.json` that
/// declares `package_name`.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn npm_tarball(dir: &Path, file_name: &str, package_name: &str) -> PathBuf {
    let manifest = serde_json::json!({
        "name": package_name,
        "version": "1.0.0",
    });
    tarball_with_files(
        dir,
        file_name,
        &[
            ("package/package.json", manifest.to_string().as_str()),
            ("package/scripts/init.js", "module.exports = () => {}\n"),
        ],
    )
}

/// Writes a gzipped tarball at `dir/file_name` containing `files`
/// (archive path, content).
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn tarball_with_files(dir: &Path, file_name: &str, files: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(file_name);
    let file = File::create(&path)
        .unwrap_or_else(|e| panic!("tarball_with_files: failed to create {}: {e}", path.display()));
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content.as_bytes())
            .unwrap_or_else(|e| panic!("tarball_with_files: failed to append {name}: {e}"));
    }

    builder
        .into_inner()
        .and_then(|gz| gz.finish())
        .unwrap_or_else(|e| panic!("tarball_with_files: failed to finish archive: {e}"));
    path
}

/// Writes an npm-style tarball declaring `package_name` that also contains a
/// symlink `package/link` pointing at `link_target`, followed by a file
/// `package/link/<escaped_file>` that would be written through it.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn tarball_with_symlink(
    dir: &Path,
    file_name: &str,
    package_name: &str,
    link_target: &Path,
    escaped_file: &str,
) -> PathBuf {
    let path = dir.join(file_name);
    let file = File::create(&path).unwrap_or_else(|e| {
        panic!("tarball_with_symlink: failed to create {}: {e}", path.display())
    });
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    let manifest = serde_json::json!({ "name": package_name, "version": "1.0.0" }).to_string();
    let mut header = tar::Header::new_gnu();
    header.set_size(manifest.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, "package/package.json", manifest.as_bytes())
        .unwrap_or_else(|e| panic!("tarball_with_symlink: failed to append manifest: {e}"));

    let mut link = tar::Header::new_gnu();
    link.set_entry_type(tar::EntryType::Symlink);
    link.set_size(0);
    link.set_mode(0o777);
    link.set_link_name(link_target)
        .unwrap_or_else(|e| panic!("tarball_with_symlink: bad link target: {e}"));
    link.set_cksum();
    builder
        .append_data(&mut link, "package/link", std::io::empty())
        .unwrap_or_else(|e| panic!("tarball_with_symlink: failed to append link: {e}"));

    let content = "written through the link\n";
    let mut header = tar::Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(
            &mut header,
            format!("package/link/{escaped_file}"),
            content.as_bytes(),
        )
        .unwrap_or_else(|e| panic!("tarball_with_symlink: failed to append file: {e}"));

    builder
        .into_inner()
        .and_then(|gz| gz.finish())
        .unwrap_or_else(|e| panic!("tarball_with_symlink: failed to finish archive: {e}"));
    path
}

/// Writes a file with a tarball extension whose content is not an archive.
///
/// # Panics
/// Panics if the write fails.
pub fn corrupt_tarball(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, b"definitely not gzip")
        .unwrap_or_else(|e| panic!("corrupt_tarball: failed to write {}: {e}", path.display()));
    path
}
