//! Shared test fixtures for the create-seneca-service workspace.
//!
//! - [`archive`]: npm-style package tarballs
//! - [`project`]: project directories in the state an installer leaves them
//! - [`exec`]: stand-in executables for `npm` and `node`

pub mod archive;
pub mod exec;
pub mod project;
