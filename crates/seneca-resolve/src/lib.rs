//! Package specifier resolution for create-seneca-service.
//!
//! Turns the free-form `--scripts-version` argument into something the
//! package manager can install, and discovers the name that package will be
//! registered under once installed.

pub mod archive;
pub mod error;
pub mod name;
pub mod specifier;

pub use error::{Error, Result};
pub use name::{PackageName, extract_name};
pub use specifier::{BASE_PACKAGE, InstallableReference, resolve};
