use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn slam() -> assert_cmd::Command {
    cargo_bin_cmd!("slam")
}

/// `<tmp>/MyFunc` plus an empty directory to use as PATH, so no external
/// tool can be found.
fn sandbox() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("MyFunc");
    let bin = tmp.path().join("empty-bin");
    std::fs::create_dir(&project).unwrap();
    std::fs::create_dir(&bin).unwrap();
    (tmp, project, bin)
}

fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

// ── Help / Version ──

#[test]
fn no_arguments_shows_usage() {
    slam()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: slam <command>"));
}

#[test]
fn help_forms_show_usage() {
    for arg in ["help", "-h", "--help"] {
        slam()
            .arg(arg)
            .assert()
            .success()
            .stdout(predicate::str::contains("setup-image"));
    }
}

#[test]
fn unknown_verb_shows_usage() {
    slam()
        .arg("destroy")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: slam <command>"));
}

#[test]
fn malformed_arguments_show_usage() {
    slam()
        .args(["deploy", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: slam <command>"));
}

#[test]
fn shows_version() {
    slam()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("slam"));
}

// ── New Command ──

#[test]
fn new_without_prerequisites_fails_and_writes_nothing() {
    let (_tmp, project, bin) = sandbox();

    slam()
        .current_dir(&project)
        .env("PATH", &bin)
        .arg("new")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'aws' is required"));

    assert_eq!(entries(&project), 0);
}

#[test]
fn new_without_swift_fails_before_writing() {
    let (_tmp, project, bin) = sandbox();
    std::fs::write(
        project.join("slam.toml"),
        "[scaffold]\ncheck_prerequisites = false\n",
    )
    .unwrap();

    slam()
        .current_dir(&project)
        .env("PATH", &bin)
        .arg("new")
        .assert()
        .failure()
        .stderr(predicate::str::contains("swift package init failed"));

    assert!(!project.join("Package.swift").exists());
}

// ── Pipeline Commands ──

#[test]
fn build_without_docker_fails() {
    let (_tmp, project, bin) = sandbox();

    slam()
        .current_dir(&project)
        .env("PATH", &bin)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("myfunc-builder"));
}

#[test]
fn setup_image_uses_explicit_name() {
    let (_tmp, project, bin) = sandbox();

    slam()
        .current_dir(&project)
        .env("PATH", &bin)
        .args(["setup-image", "custom-builder"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("custom-builder"));
}

#[test]
fn interactive_setup_image_rejects_empty_answer() {
    let (_tmp, project, bin) = sandbox();

    slam()
        .current_dir(&project)
        .env("PATH", &bin)
        .args(["setup-image", "-i"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no value entered"));
}

#[test]
fn invoke_without_swift_fails() {
    let (_tmp, project, bin) = sandbox();

    slam()
        .current_dir(&project)
        .env("PATH", &bin)
        .arg("invoke")
        .assert()
        .failure()
        .stderr(predicate::str::contains("local debug build failed"));
}

#[test]
fn invalid_config_is_reported() {
    let (_tmp, project, bin) = sandbox();
    std::fs::write(project.join("slam.toml"), "[deploy]\non_failure = \"retry\"\n").unwrap();

    slam()
        .current_dir(&project)
        .env("PATH", &bin)
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("slam.toml"));
}
