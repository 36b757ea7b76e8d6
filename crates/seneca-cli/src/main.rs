//! create-seneca-service
//!
//! Bootstraps a new Seneca service: writes the project manifest, installs the
//! base dependencies and a scripts package, then hands over to that package's
//! initializer.

mod bootstrap;
mod cli;
mod config;
mod error;
mod preflight;

use clap::Parser;
use colored::Colorize;
use seneca_install::{NodeInitializer, NpmInstaller};
use tracing_subscriber::EnvFilter;

use bootstrap::Bootstrap;
use cli::Cli;
use config::BootstrapConfig;
use error::{CliError, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        if let CliError::Aborted {
            stage,
            root_removed,
            ..
        } = &e
        {
            tracing::debug!(?stage, root_removed, "Rolled back");
        }
        if !e.is_reported() {
            eprintln!("{}: {}", "error".red().bold(), e);
        }
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings, or debug output with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Verbose mode enabled");
}

async fn run(cli: Cli) -> Result<()> {
    let original_directory = std::env::current_dir()?;
    let config = match BootstrapConfig::from_cli(cli, original_directory) {
        Ok(config) => config,
        Err(e @ CliError::MissingProjectDirectory) => {
            print_missing_directory_help();
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    let project = bootstrap::prepare_project(&config)?;
    if config.skip_preflight {
        tracing::debug!("Skipping environment checks");
    } else {
        preflight::check_environment(&config, &project.root).await?;
    }

    let bootstrap = Bootstrap::new(
        NpmInstaller::new(&config.npm),
        NodeInitializer::new(&config.node),
    );
    bootstrap
        .run(&project, config.scripts_version.as_deref(), config.verbose)
        .await
}

fn print_missing_directory_help() {
    let name = "create-seneca-service";
    eprintln!();
    eprintln!("Please specify the project directory:");
    eprintln!("  {} {}", name.cyan(), "<project-directory>".green());
    eprintln!();
    eprintln!("For example:");
    eprintln!("  {} {}", name.cyan(), "my-seneca-service".green());
    eprintln!();
    eprintln!("Run {} to see all options.", format!("{name} --help").cyan());
    eprintln!();
}
