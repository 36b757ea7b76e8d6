//! Dependency installation for create-seneca-service.
//!
//! Drives the external package manager, pins runtime dependencies to caret
//! ranges afterwards, and hands the project over to the installed scripts
//! package's initializer.

pub mod delegate;
pub mod deps;
pub mod error;
pub mod installer;
pub mod pin;

pub use delegate::{InitRequest, Initializer, NodeInitializer, entry_point};
pub use deps::{BASE_DEPENDENCIES, DependencySet, RUNTIME_DEPENDENCIES};
pub use error::{Error, Result};
pub use installer::{Installer, NpmInstaller};
pub use pin::{PinOutcome, PinReport, caret_range, pin_runtime_versions};
