use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Binary with HOME and working directory pointed at `home`.
fn mnqnctl(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mnqnctl"));
    cmd.env("HOME", home)
        .env("NO_COLOR", "1")
        .current_dir(home);
    cmd
}

fn initialized_home() -> TempDir {
    let home = tempfile::tempdir().unwrap();
    mnqnctl(home.path())
        .args(["--yes", "version"])
        .assert()
        .success();
    home
}

#[test]
fn test_help_command() {
    let home = tempfile::tempdir().unwrap();
    mnqnctl(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--kube-context"));
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    let expected = format!("mnqnctl {}", env!("CARGO_PKG_VERSION"));

    mnqnctl(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_version_command_initializes_on_first_run() {
    let home = tempfile::tempdir().unwrap();

    mnqnctl(home.path())
        .arg("version")
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Do you want to initialise the client now?"))
        .stdout(predicate::str::contains(format!(
            "Mannequin version: v{}",
            env!("CARGO_PKG_VERSION")
        )));

    assert!(home.path().join(".mnqn/config.yaml").is_file());
}

#[test]
fn test_declining_initialization_exits_with_distinct_code() {
    let home = tempfile::tempdir().unwrap();

    mnqnctl(home.path())
        .arg("version")
        .write_stdin("n\n")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Not initializing."));

    assert!(!home.path().join(".mnqn").exists());
}

#[test]
fn test_unknown_command_is_reported() {
    let home = initialized_home();

    mnqnctl(home.path())
        .arg("frobnicate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command \"frobnicate\""))
        .stdout(predicate::str::contains("Available commands:"));
}

#[test]
fn test_no_command_prints_listing() {
    let home = initialized_home();

    mnqnctl(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Available commands:"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("implode"));
}

#[test]
fn test_deploy_without_descriptor_fails() {
    let home = initialized_home();

    mnqnctl(home.path())
        .arg("deploy")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Reading local configuration."))
        .stderr(predicate::str::contains("couldn't load local configuration"))
        .stderr(predicate::str::contains("mnqnctl init"));
}

#[test]
fn test_init_registers_project() {
    let home = initialized_home();
    let project = home.path().join("api");
    fs::create_dir_all(project.join("chart")).unwrap();
    fs::write(project.join("Dockerfile"), "FROM scratch\n").unwrap();

    mnqnctl(home.path())
        .current_dir(&project)
        .arg("init")
        .write_stdin("chart\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project \"api\" is successfully registered"));

    assert!(project.join(".mnqn.yaml").is_file());
    let global = fs::read_to_string(home.path().join(".mnqn/config.yaml")).unwrap();
    assert!(global.contains("name: api"));

    mnqnctl(home.path())
        .current_dir(&project)
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is already registered"));
}

#[test]
fn test_implode_removes_global_configuration() {
    let home = initialized_home();

    mnqnctl(home.path())
        .arg("implode")
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping."));
    assert!(home.path().join(".mnqn").exists());

    mnqnctl(home.path())
        .args(["--yes", "implode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Purged."));
    assert!(!home.path().join(".mnqn").exists());
}

#[test]
fn test_kube_context_without_value_after_command_is_rejected() {
    let home = initialized_home();

    mnqnctl(home.path())
        .args(["deploy", "--kube-context"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--kube-context requires a context name"));
}
