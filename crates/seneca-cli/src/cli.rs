//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::Parser;

/// Create a new Seneca service
#[derive(Parser, Debug)]
#[command(name = "create-seneca-service")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Only <project-directory> is required.")]
pub struct Cli {
    /// Directory to create the service in
    #[arg(value_name = "project-directory")]
    pub project_directory: Option<PathBuf>,

    /// Use a non-standard version of seneca-scripts
    ///
    /// Accepts a version, a `file:` path, a tarball path or URL, a `git+` URL,
    /// or any other package reference the package manager understands.
    #[arg(long, value_name = "alternative-package")]
    pub scripts_version: Option<String>,

    /// Print additional logs
    #[arg(long)]
    pub verbose: bool,

    /// Package manager executable
    #[arg(long, env = "CREATE_SENECA_SERVICE_NPM", default_value = "npm")]
    pub npm: PathBuf,

    /// Node.js executable used for environment checks and the initializer
    #[arg(long, env = "CREATE_SENECA_SERVICE_NODE", default_value = "node")]
    pub node: PathBuf,

    /// Skip the Node.js and npm environment checks
    #[arg(long, env = "CREATE_SENECA_SERVICE_SKIP_PREFLIGHT")]
    pub skip_preflight: bool,
}
