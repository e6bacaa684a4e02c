//! Behavioral specs for configuration loading.

use crate::prelude::*;

/// > Without a repository the command fails with a hint
#[test]
fn missing_repository_uri_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("confer.toml"), "version = 1\n").unwrap();

    confer_cmd()
        .args(["env", "foo"])
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stderr(predicates::str::contains("no repository configured"));
}

/// > Unsupported config versions are rejected
#[test]
fn unsupported_version_fails() {
    let server = Server::git("config-repo");
    std::fs::write(server.path().join("confer.toml"), "version = 7\n").unwrap();

    server
        .cmd()
        .args(["env", "foo"])
        .assert()
        .code(1)
        .stderr(predicates::str::contains("unsupported config version 7"));
}

/// > -C selects a config file explicitly
#[test]
fn explicit_config_path() {
    let server = Server::git("config-repo");
    let elsewhere = tempfile::TempDir::new().unwrap();

    confer_cmd()
        .args(["-C"])
        .arg(server.path().join("confer.toml"))
        .args(["raw", "foo", "default", "master", "bar.properties"])
        .current_dir(elsewhere.path())
        .assert()
        .success()
        .stdout("foo: bar");
}

/// > --repo overrides the configured repository
#[test]
fn repo_flag_overrides_config() {
    let server = Server::git("config-repo");
    let elsewhere = tempfile::TempDir::new().unwrap();

    confer_cmd()
        .args(["--repo", &format!("file:{}", server.origin().display())])
        .args(["raw", "foo", "default", "master", "foo.properties"])
        .current_dir(elsewhere.path())
        .env("TMPDIR", elsewhere.path())
        .assert()
        .success()
        .stdout("foo: bar\n");
}

/// > The native backend serves a plain directory
#[test]
fn native_backend_serves_directory() {
    let server = Server::git("config-repo");
    server.config("backend = \"native\"\n");

    server
        .cmd()
        .args(["env", "foo", "development", "--format", "properties"])
        .assert()
        .success()
        .stdout(predicates::str::contains("foo: development\n"));
}
