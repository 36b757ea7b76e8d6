//! Filesystem layer for create-seneca-service
//!
//! Path resolution, the project manifest, and allow-list based cleanup of
//! the entries a bootstrap run generates.

pub mod cleanup;
pub mod constants;
pub mod error;
pub mod io;
pub mod manifest;
pub mod path;

pub use cleanup::{
    generated_entries, is_empty_dir, remove_generated, remove_root_if_empty, remove_stray_logs,
};
pub use constants::{GeneratedPath, INSTALLER_LOG_FILES};
pub use error::{Error, Result};
pub use manifest::Manifest;
pub use path::{app_name, resolve_path};
