//! Initializer delegation against a stand-in runtime

#![cfg(unix)]

use std::fs;
use std::path::PathBuf;

use seneca_install::{Error, InitRequest, Initializer, NodeInitializer};
use seneca_test_utils::exec::{args_file, recording_node};
use seneca_test_utils::project::installed_package;
use tempfile::TempDir;

fn request(root: PathBuf) -> InitRequest {
    InitRequest {
        root,
        app_name: "svc".to_string(),
        verbose: false,
        original_directory: PathBuf::from("/origin"),
    }
}

#[tokio::test]
async fn test_initializer_receives_contract_arguments() {
    let bin = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    installed_package(root.path(), "seneca-scripts");
    let node = recording_node(bin.path(), 0);

    NodeInitializer::new(node)
        .initialize("seneca-scripts", &request(root.path().to_path_buf()))
        .await
        .unwrap();

    let recorded = fs::read_to_string(args_file(bin.path(), "node")).unwrap();
    let entry = root.path().join("node_modules/seneca-scripts/scripts/init.js");
    assert_eq!(
        recorded.trim(),
        format!("{} {} svc false /origin", entry.display(), root.path().display())
    );
}

#[tokio::test]
async fn test_initializer_failure_is_reported() {
    let bin = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    installed_package(root.path(), "seneca-scripts");
    let node = recording_node(bin.path(), 3);

    let err = NodeInitializer::new(node)
        .initialize("seneca-scripts", &request(root.path().to_path_buf()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InitializerFailed { exit_code: Some(3), .. }));
    assert_eq!(err.command(), None);
}

#[tokio::test]
async fn test_missing_entry_point_does_not_spawn() {
    let bin = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    let node = recording_node(bin.path(), 0);

    let err = NodeInitializer::new(node)
        .initialize("seneca-scripts", &request(root.path().to_path_buf()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EntryPointNotFound { .. }));
    assert!(!args_file(bin.path(), "node").exists());
}
