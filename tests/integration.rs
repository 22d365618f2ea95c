// These tests invoke the CLI as a subprocess with a fake `bazel` on PATH.
#![cfg(unix)]

use predicates::prelude::*;
use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

const FAKE_BAZEL: &str = r#"#!/bin/sh
case "$1" in
  info)
    case "$2" in
      workspace) echo "$FAKE_WORKSPACE" ;;
      bazel-genfiles) echo "$FAKE_WORKSPACE/bazel-out/genfiles" ;;
      bazel-bin) echo "$FAKE_WORKSPACE/bazel-out/bin" ;;
      *) echo "unknown key $2" >&2; exit 2 ;;
    esac
    ;;
  build)
    shift
    echo "$@" >> "$FAKE_WORKSPACE/../builds.log"
    if [ -n "$FAKE_FAIL_BUILD" ]; then
      exit 1
    fi
    ;;
esac
"#;

struct Fixture {
    _dir: tempfile::TempDir,
    bin_dir: PathBuf,
    workspace: PathBuf,
}
impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let bin_dir = dir.path().join("bin");
        let workspace = dir.path().join("workspace");
        fs::create_dir(&bin_dir).unwrap();
        fs::create_dir(&workspace).unwrap();

        let script = bin_dir.join("bazel");
        fs::write(&script, FAKE_BAZEL).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        Self {
            _dir: dir,
            bin_dir,
            workspace,
        }
    }

    fn command(&self) -> assert_cmd::Command {
        let path = std::env::var("PATH").unwrap_or_default();
        let mut cmd = assert_cmd::Command::cargo_bin("setup-eclipse").unwrap();

        cmd.current_dir(&self.workspace)
            .env("PATH", format!("{}:{}", self.bin_dir.display(), path))
            .env("FAKE_WORKSPACE", &self.workspace)
            .env_remove("FAKE_FAIL_BUILD")
            .env_remove("RUST_LOG");

        cmd
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.workspace.join(relative)).unwrap()
    }

    fn builds(&self) -> Vec<String> {
        let log = self.workspace.parent().unwrap().join("builds.log");

        fs::read_to_string(log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn generated_files(workspace: &Path) -> Vec<String> {
    [
        ".classpath",
        ".project",
        ".factorypath",
        ".settings/org.eclipse.jdt.core.prefs",
        ".settings/org.eclipse.jdt.apt.core.prefs",
    ]
    .iter()
    .map(|file| fs::read_to_string(workspace.join(file)).unwrap())
    .collect()
}

#[test]
fn default_project_name() {
    let fixture = Fixture::new();

    fixture.command().assert().success().stdout("");

    assert!(fixture
        .read(".project")
        .contains("<name>domain-registry</name>"));
    assert_eq!(
        fixture.builds(),
        vec![
            "//java/google/registry/... //javatests/google/registry/...",
            "//java/google/registry/eclipse:eclipse_deps",
            "//java/google/registry/eclipse:annotation_processors_ide_deploy.jar",
        ]
    );
    assert!(fixture.read(".classpath").contains(&format!(
        "path=\"{}/bazel-out/genfiles/java/google/registry/eclipse/eclipse_deps.jar\"",
        fixture.workspace.display()
    )));
    assert!(fixture.read(".factorypath").contains(&format!(
        "id=\"{}/bazel-out/bin/java/google/registry/eclipse/annotation_processors_ide_deploy.jar\"",
        fixture.workspace.display()
    )));
}

#[test]
fn project_name_argument_overrides_default() {
    let fixture = Fixture::new();

    fixture.command().arg("nomulus").assert().success();

    let project = fixture.read(".project");
    assert!(project.contains("<name>nomulus</name>"));
    assert!(!project.contains("domain-registry"));
}

#[test]
fn rerun_is_idempotent() {
    let fixture = Fixture::new();

    fixture.command().assert().success();
    let first = generated_files(&fixture.workspace);

    fixture.command().assert().success();
    let second = generated_files(&fixture.workspace);

    assert_eq!(first, second);
}

#[test]
fn failing_build_aborts_before_writing() {
    let fixture = Fixture::new();

    fixture
        .command()
        .env("FAKE_FAIL_BUILD", "1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited"));

    assert!(!fixture.workspace.join(".classpath").exists());
    assert_eq!(fixture.builds().len(), 1);
}

#[test]
fn missing_bazel_fails() {
    let fixture = Fixture::new();
    let config = fixture.workspace.join("custom.toml");
    fs::write(&config, "bazel = \"no-such-bazel-binary\"\n").unwrap();

    fixture
        .command()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-bazel-binary"));
}

#[test]
fn dry_run_writes_nothing() {
    let fixture = Fixture::new();

    fixture
        .command()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(".factorypath"))
        .stdout(predicate::str::contains("org.eclipse.jdt.apt.core.prefs"));

    assert!(fs::read_dir(&fixture.workspace).unwrap().next().is_none());
    assert!(fixture.builds().is_empty());
}

#[test]
fn config_file_in_current_directory_is_used() {
    let fixture = Fixture::new();
    fs::write(
        fixture.workspace.join("setup-eclipse.toml"),
        "default_project_name = \"from-config\"\n\n[build]\nall = [\"//...\"]\n",
    )
    .unwrap();

    fixture.command().assert().success();

    assert!(fixture.read(".project").contains("<name>from-config</name>"));
    assert_eq!(fixture.builds(), vec!["//..."]);
}
