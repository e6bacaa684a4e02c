//! Behavioral specs for `confer raw`.

use crate::prelude::*;

/// > Raw serving returns the file's exact bytes
#[test]
fn raw_returns_exact_bytes() {
    let server = Server::git("config-repo");

    let output = server
        .cmd()
        .args(["raw", "foo", "development", "master", "bar.properties"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(output.stdout, b"foo: bar");
}

/// > Raw serving reads the requested label, not the default
#[test]
fn raw_reads_requested_branch() {
    let server = Server::git("config-repo");
    server.branch("stable");
    server.commit("bar.properties", "foo: changed\n");

    server
        .cmd()
        .args(["raw", "foo", "development", "stable", "bar.properties"])
        .assert()
        .success()
        .stdout("foo: bar");
}

/// > Missing files are not found, exit 4
#[test]
fn raw_missing_file_is_not_found() {
    let server = Server::git("config-repo");

    server
        .cmd()
        .args(["raw", "foo", "development", "master", "nope.properties"])
        .assert()
        .code(4)
        .stdout(predicates::str::is_empty());
}

/// > Paths escaping the repository are not found
#[test]
fn raw_rejects_parent_paths() {
    let server = Server::git("config-repo");

    server
        .cmd()
        .args(["raw", "foo", "development", "master", "../confer.toml"])
        .assert()
        .code(4);
}

/// > Malformed files are still served verbatim
#[test]
fn raw_does_not_parse() {
    let server = Server::git("config-repo");

    server
        .cmd()
        .args(["raw", "invalid", "default", "master", "invalid.yml"])
        .assert()
        .success()
        .stdout("foo: bar\n  baz: : qux\n");
}
