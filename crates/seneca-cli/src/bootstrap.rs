//! Bootstrap orchestration
//!
//! A run moves through `Resolving -> Installing -> Pinning -> Delegating ->
//! Succeeded`. Any failure after the package name is known, except the
//! pin-step consistency checks, rolls the project back: generated entries are
//! removed by name and the project directory goes too if that leaves it empty.

use std::fmt;
use std::path::{Path, PathBuf};

use colored::Colorize;
use seneca_fs::Manifest;
use seneca_install::{
    DependencySet, InitRequest, Initializer, Installer, PinOutcome, pin_runtime_versions,
};
use seneca_resolve::{PackageName, extract_name, resolve};

use crate::config::BootstrapConfig;
use crate::error::{CliError, Result};

/// Stages of a bootstrap run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    Installing,
    Pinning,
    Delegating,
    Succeeded,
}

/// How a rolled-back run failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The package manager exited non-zero
    Command(String),
    /// Anything else
    Unexpected(String),
}

impl Failure {
    fn classify(error: &seneca_install::Error) -> Self {
        match error.command() {
            Some(command) => Self::Command(command.to_string()),
            None => Self::Unexpected(error.to_string()),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(command) => write!(f, "{command} has failed"),
            Self::Unexpected(message) => write!(f, "unexpected error: {message}"),
        }
    }
}

/// The project being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub root: PathBuf,
    pub app_name: String,
    pub original_directory: PathBuf,
}

/// Create the project directory and its initial manifest.
///
/// Installer logs left by an earlier failed run are removed first.
pub fn prepare_project(config: &BootstrapConfig) -> Result<Project> {
    let root = seneca_fs::resolve_path(&config.original_directory, &config.project_directory);
    let app_name = seneca_fs::app_name(&root).ok_or_else(|| CliError::InvalidProjectDirectory {
        path: root.clone(),
    })?;

    std::fs::create_dir_all(&root).map_err(|e| seneca_fs::Error::io(&root, e))?;
    seneca_fs::remove_stray_logs(&root)?;

    println!("Creating a new seneca service in {}.", root.display().to_string().green());
    println!();

    Manifest::create_initial(&root, &app_name)?;

    Ok(Project {
        root,
        app_name,
        original_directory: config.original_directory.clone(),
    })
}

/// Sequences install, pin and delegation for one project.
pub struct Bootstrap<I, D> {
    installer: I,
    initializer: D,
}

impl<I: Installer, D: Initializer> Bootstrap<I, D> {
    pub fn new(installer: I, initializer: D) -> Self {
        Self {
            installer,
            initializer,
        }
    }

    /// Install the scripts package selected by `specifier` into `project`
    /// and hand over to its initializer.
    pub async fn run(&self, project: &Project, specifier: Option<&str>, verbose: bool) -> Result<()> {
        tracing::debug!(stage = ?Stage::Resolving);
        let reference = resolve(specifier, &project.original_directory);
        let dependencies = DependencySet::with_base(reference.to_install_arg());

        println!("Installing packages. This might take a couple of minutes.");
        let package_name = extract_name(&reference).await;
        tracing::debug!(reference = %reference, package = %package_name, "Resolved scripts package");

        let mut stage = Stage::Installing;
        match self
            .install_and_delegate(project, &dependencies, &package_name, verbose, &mut stage)
            .await
        {
            Ok(()) => {
                tracing::debug!(stage = ?Stage::Succeeded);
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(CliError::Fatal(e)),
            Err(e) => {
                let failure = Failure::classify(&e);
                let root_removed = roll_back(project, &failure);
                Err(CliError::Aborted {
                    stage,
                    failure,
                    root_removed,
                })
            }
        }
    }

    async fn install_and_delegate(
        &self,
        project: &Project,
        dependencies: &DependencySet,
        package_name: &PackageName,
        verbose: bool,
        stage: &mut Stage,
    ) -> seneca_install::Result<()> {
        *stage = Stage::Installing;
        tracing::debug!(stage = ?stage);
        self.installer
            .install(&project.root, dependencies, verbose)
            .await?;

        *stage = Stage::Pinning;
        tracing::debug!(stage = ?stage);
        let report = pin_runtime_versions(&project.root, package_name.as_str())?;
        for outcome in &report.outcomes {
            if let PinOutcome::Kept { name, version } = outcome {
                tracing::debug!(name, version, "Left dependency version unpinned");
            }
        }

        *stage = Stage::Delegating;
        tracing::debug!(stage = ?stage);
        let request = InitRequest {
            root: project.root.clone(),
            app_name: project.app_name.clone(),
            verbose,
            original_directory: project.original_directory.clone(),
        };
        self.initializer
            .initialize(package_name.as_str(), &request)
            .await
    }
}

/// Remove what the run generated and report it. Returns whether the project
/// directory itself was removed.
///
/// A cleanup failure is reported and ends the cleanup, but the run is still
/// reported as aborted.
fn roll_back(project: &Project, failure: &Failure) -> bool {
    println!();
    println!("Aborting installation.");
    match failure {
        Failure::Command(command) => println!("  {} has failed.", command.cyan()),
        Failure::Unexpected(message) => {
            println!("{}", "Unexpected error. Please report it as a bug:".red());
            println!("{message}");
        }
    }
    println!();

    let root_removed = match remove_generated_files(project) {
        Ok(removed) => removed,
        Err(e) => {
            tracing::warn!(root = %project.root.display(), error = %e, "Cleanup failed");
            println!("{} {}", "Could not finish cleaning up:".red(), e);
            false
        }
    };

    println!("Done.");
    root_removed
}

fn remove_generated_files(project: &Project) -> Result<bool> {
    let root = &project.root;
    let mut first_error = None;
    for entry in seneca_fs::generated_entries(root)? {
        println!("Deleting generated file... {}", entry.as_str().cyan());
        if let Err(e) = seneca_fs::remove_generated(root, entry) {
            tracing::warn!(entry = %entry, error = %e, "Failed to delete generated file");
            first_error.get_or_insert(e);
        }
    }
    if let Some(e) = first_error {
        return Err(e.into());
    }

    if !seneca_fs::is_empty_dir(root)? {
        return Ok(false);
    }
    let parent = root.parent().unwrap_or_else(|| Path::new("/"));
    step_out_of(root, parent)?;
    let removed = seneca_fs::remove_root_if_empty(root)?;
    if removed {
        println!(
            "Deleting {} from {}",
            format!("{}/", project.app_name).cyan(),
            parent.display().to_string().cyan()
        );
    }
    Ok(removed)
}

/// Move the process out of `dir` if it is the working directory, since some
/// platforms refuse to delete the current directory.
fn step_out_of(dir: &Path, parent: &Path) -> Result<()> {
    let Ok(cwd) = std::env::current_dir() else {
        return Ok(());
    };
    let is_cwd = match (dunce::canonicalize(&cwd), dunce::canonicalize(dir)) {
        (Ok(cwd), Ok(dir)) => cwd == dir,
        _ => false,
    };
    if is_cwd {
        tracing::debug!(to = %parent.display(), "Leaving project directory before removing it");
        std::env::set_current_dir(parent).map_err(|e| seneca_fs::Error::io(parent, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use seneca_test_utils::project::{installed_manifest, installed_package, installed_versions_with};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    enum Behaviour {
        Succeed { package: &'static str },
        SucceedWithout { package: &'static str, missing: &'static str },
        FailWithCommand,
        FailWithoutCommand,
        FailAfterRemovingRoot,
    }

    struct FakeInstaller {
        behaviour: Behaviour,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl FakeInstaller {
        fn new(behaviour: Behaviour) -> Self {
            Self {
                behaviour,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Installer for FakeInstaller {
        async fn install(
            &self,
            root: &Path,
            dependencies: &DependencySet,
            _verbose: bool,
        ) -> seneca_install::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(dependencies.iter().map(String::from).collect());
            // A real install always creates node_modules before it can fail
            fs::create_dir_all(root.join("node_modules/.staging")).unwrap();
            match self.behaviour {
                Behaviour::Succeed { package } => {
                    installed_manifest(root, "svc", &installed_versions_with(package, "1.0.0"));
                    installed_package(root, package);
                    Ok(())
                }
                Behaviour::SucceedWithout { package, missing } => {
                    let deps: Vec<_> = installed_versions_with(package, "1.0.0")
                        .into_iter()
                        .filter(|(name, _)| *name != missing)
                        .collect();
                    installed_manifest(root, "svc", &deps);
                    Ok(())
                }
                Behaviour::FailWithCommand => Err(seneca_install::Error::CommandFailed {
                    command: "npm install --save seneca".to_string(),
                    exit_code: Some(1),
                }),
                Behaviour::FailAfterRemovingRoot => {
                    fs::remove_dir_all(root).unwrap();
                    Err(seneca_install::Error::CommandFailed {
                        command: "npm install --save seneca".to_string(),
                        exit_code: Some(1),
                    })
                }
                Behaviour::FailWithoutCommand => Err(seneca_install::Error::Spawn {
                    program: "npm".to_string(),
                    source: std::io::Error::other("exit code 1"),
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingInitializer {
        calls: Mutex<Vec<(String, InitRequest)>>,
    }

    #[async_trait]
    impl Initializer for RecordingInitializer {
        async fn initialize(
            &self,
            package_name: &str,
            request: &InitRequest,
        ) -> seneca_install::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((package_name.to_string(), request.clone()));
            Ok(())
        }
    }

    fn project_in(temp: &TempDir) -> Project {
        let config = BootstrapConfig {
            project_directory: PathBuf::from("svc"),
            scripts_version: None,
            verbose: false,
            npm: PathBuf::from("npm"),
            node: PathBuf::from("node"),
            skip_preflight: true,
            original_directory: temp.path().to_path_buf(),
        };
        prepare_project(&config).unwrap()
    }

    #[test]
    fn test_prepare_project_writes_initial_manifest() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("svc")).unwrap();
        fs::write(temp.path().join("svc/yarn-error.log"), "old failure").unwrap();

        let project = project_in(&temp);

        assert_eq!(project.root, temp.path().join("svc"));
        assert_eq!(project.app_name, "svc");
        let manifest = Manifest::load(&project.root).unwrap();
        assert_eq!(manifest.name(), Some("svc"));
        assert!(!project.root.join("yarn-error.log").exists());
    }

    #[tokio::test]
    async fn test_successful_run_pins_and_delegates() {
        let temp = TempDir::new().unwrap();
        let project = project_in(&temp);
        let bootstrap = Bootstrap::new(
            FakeInstaller::new(Behaviour::Succeed {
                package: "seneca-scripts",
            }),
            RecordingInitializer::default(),
        );

        bootstrap.run(&project, Some("2.1.0"), false).await.unwrap();

        let installs = bootstrap.installer.calls.lock().unwrap().clone();
        assert_eq!(installs.len(), 1);
        assert_eq!(installs[0].last().map(String::as_str), Some("seneca-scripts@2.1.0"));

        let manifest = Manifest::load(&project.root).unwrap();
        assert_eq!(manifest.dependency_version("seneca"), Some("^3.13.2"));

        let calls = bootstrap.initializer.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "seneca-scripts");
        assert_eq!(
            calls[0].1,
            InitRequest {
                root: project.root.clone(),
                app_name: "svc".to_string(),
                verbose: false,
                original_directory: temp.path().to_path_buf(),
            }
        );
    }

    #[tokio::test]
    async fn test_command_failure_rolls_back_and_removes_empty_root() {
        let temp = TempDir::new().unwrap();
        let project = project_in(&temp);
        let bootstrap = Bootstrap::new(
            FakeInstaller::new(Behaviour::FailWithCommand),
            RecordingInitializer::default(),
        );

        let err = bootstrap.run(&project, None, false).await.unwrap_err();

        match err {
            CliError::Aborted {
                stage,
                failure,
                root_removed,
            } => {
                assert_eq!(stage, Stage::Installing);
                assert_eq!(failure, Failure::Command("npm install --save seneca".to_string()));
                assert!(root_removed);
            }
            other => panic!("expected Aborted, got {other:?}"),
        }
        assert!(!project.root.exists());
        assert!(bootstrap.initializer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_failure_still_reports_aborted() {
        let temp = TempDir::new().unwrap();
        let project = project_in(&temp);
        let bootstrap = Bootstrap::new(
            FakeInstaller::new(Behaviour::FailAfterRemovingRoot),
            RecordingInitializer::default(),
        );

        let err = bootstrap.run(&project, None, false).await.unwrap_err();

        match err {
            CliError::Aborted {
                stage,
                failure,
                root_removed,
            } => {
                assert_eq!(stage, Stage::Installing);
                assert_eq!(failure, Failure::Command("npm install --save seneca".to_string()));
                assert!(!root_removed);
            }
            other => panic!("expected Aborted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failure_without_command_is_unexpected_but_still_rolls_back() {
        let temp = TempDir::new().unwrap();
        let project = project_in(&temp);
        fs::write(project.root.join("README.md"), "keep me").unwrap();
        let bootstrap = Bootstrap::new(
            FakeInstaller::new(Behaviour::FailWithoutCommand),
            RecordingInitializer::default(),
        );

        let err = bootstrap.run(&project, None, false).await.unwrap_err();

        assert!(
            matches!(
                err,
                CliError::Aborted {
                    failure: Failure::Unexpected(_),
                    root_removed: false,
                    ..
                }
            ),
            "got {err:?}"
        );
        assert!(err.is_reported());
        assert!(!project.root.join("package.json").exists());
        assert!(!project.root.join("node_modules").exists());
        assert_eq!(
            fs::read_to_string(project.root.join("README.md")).unwrap(),
            "keep me"
        );
    }

    // Pin-step consistency failures exit without rolling back: the install
    // itself succeeded, so the generated files are left for inspection.
    #[tokio::test]
    async fn test_missing_runtime_dependency_is_fatal_without_rollback() {
        let temp = TempDir::new().unwrap();
        let project = project_in(&temp);
        let bootstrap = Bootstrap::new(
            FakeInstaller::new(Behaviour::SucceedWithout {
                package: "seneca-scripts",
                missing: "seneca-pino-adapter",
            }),
            RecordingInitializer::default(),
        );
        let err = bootstrap.run(&project, None, false).await.unwrap_err();

        assert!(
            matches!(
                err,
                CliError::Fatal(seneca_install::Error::MissingDependency { ref name })
                    if name == "seneca-pino-adapter"
            ),
            "got {err:?}"
        );
        assert!(project.root.join("node_modules").exists());
        let manifest = fs::read_to_string(project.root.join("package.json")).unwrap();
        assert!(manifest.contains("\"seneca\": \"3.13.2\""));
        assert!(bootstrap.initializer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_entry_point_rolls_back_as_unexpected() {
        struct EntryPointLookup;

        #[async_trait]
        impl Initializer for EntryPointLookup {
            async fn initialize(
                &self,
                package_name: &str,
                request: &InitRequest,
            ) -> seneca_install::Result<()> {
                seneca_install::entry_point(&request.root, package_name).map(|_| ())
            }
        }

        let temp = TempDir::new().unwrap();
        let project = project_in(&temp);
        // The install registers the package but never unpacks it
        let bootstrap = Bootstrap::new(
            FakeInstaller::new(Behaviour::SucceedWithout {
                package: "seneca-scripts",
                missing: "none",
            }),
            EntryPointLookup,
        );

        let err = bootstrap.run(&project, None, false).await.unwrap_err();

        assert!(
            matches!(
                err,
                CliError::Aborted {
                    stage: Stage::Delegating,
                    failure: Failure::Unexpected(_),
                    ..
                }
            ),
            "got {err:?}"
        );
        assert!(!project.root.exists());
    }
}
