//! Output assertions with assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_version_flag() {
    Command::cargo_bin("create-seneca-service")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("create-seneca-service"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    Command::cargo_bin("create-seneca-service")
        .unwrap()
        .args(["svc", "--no-such-flag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--no-such-flag"));
}

#[cfg(unix)]
#[test]
fn test_preflight_rejects_old_node_before_installing() {
    let work = tempfile::TempDir::new().unwrap();
    let tools = tempfile::TempDir::new().unwrap();
    let node = seneca_test_utils::exec::fake_executable(tools.path(), "node", "echo v6.0.0");
    let npm = seneca_test_utils::exec::fake_executable(
        tools.path(),
        "npm",
        "if [ \"$1\" = \"--version\" ]; then echo 10.2.0; fi",
    );

    Command::cargo_bin("create-seneca-service")
        .unwrap()
        .arg("svc")
        .current_dir(work.path())
        .env("CREATE_SENECA_SERVICE_NPM", &npm)
        .env("CREATE_SENECA_SERVICE_NODE", &node)
        .env("NO_COLOR", "1")
        .env_remove("CREATE_SENECA_SERVICE_SKIP_PREFLIGHT")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please update to Node 8 or higher."));

    // The initial manifest stays; nothing was installed
    assert!(work.path().join("svc/package.json").is_file());
    assert!(!work.path().join("svc/node_modules").exists());
}
