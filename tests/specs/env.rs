//! Behavioral specs for `confer env`.

use crate::prelude::*;

fn json(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stdout should be JSON")
}

fn source_names(doc: &serde_json::Value) -> Vec<String> {
    doc["propertySources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|ps| ps["name"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Precedence
// =============================================================================

/// > Sources are ordered most-specific-profile-first, overrides always first
#[test]
fn sources_are_in_precedence_order() {
    let server = Server::git("config-repo");

    let output = server.cmd().args(["env", "foo", "development", "--format", "v1"]).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let doc = json(&output.stdout);
    let names = source_names(&doc);
    assert_eq!(names[0], "overrides");
    let files: Vec<_> = names[1..].iter().map(|n| n.rsplit('/').next().unwrap()).collect();
    assert_eq!(files, vec!["foo-development.properties", "foo.properties", "application.yml"]);

    assert_eq!(doc["name"], "foo");
    assert_eq!(doc["profiles"], serde_json::json!(["development"]));
    assert_eq!(doc["label"], "master");
    assert_eq!(doc["version"].as_str().unwrap().len(), 40);
    assert_eq!(doc["propertySources"][1]["source"]["foo"], "development");
}

/// > Unknown application with no files is not an error
#[test]
fn unknown_application_yields_overrides_and_shared_files() {
    let server = Server::git("config-repo");

    let output = server.cmd().args(["env", "nobody", "--format", "v1"]).output().unwrap();
    assert!(output.status.success());

    let names = source_names(&json(&output.stdout));
    assert_eq!(names.len(), 2);
    assert_eq!(names[0], "overrides");
    assert!(names[1].ends_with("/application.yml"), "{names:?}");
}

/// > Configured overrides are injected ahead of repository values
#[test]
fn overrides_win() {
    let server = Server::git("config-repo");
    server.config("\n[overrides]\nfoo = \"forced\"\n");

    server
        .cmd()
        .args(["env", "foo", "development", "--format", "properties"])
        .assert()
        .success()
        .stdout(predicates::str::contains("foo: forced\n"))
        .stdout(predicates::str::contains("bar: spam\n"));
}

/// > v2 values carry their origin
#[test]
fn v2_values_carry_origins() {
    let server = Server::git("config-repo");

    let output = server.cmd().args(["env", "foo", "development"]).output().unwrap();
    let doc = json(&output.stdout);
    assert_eq!(
        doc["propertySources"][1]["source"]["bar"],
        serde_json::json!({ "value": "spam", "origin": "foo-development.properties:2" })
    );
}

/// > Multi-document YAML honors profile activation
#[test]
fn yaml_documents_follow_active_profiles() {
    let server = Server::git("config-repo");

    server
        .cmd()
        .args(["env", "multi", "default", "--format", "properties"])
        .assert()
        .success()
        .stdout(predicates::str::contains("servers[0]: a.example"));

    server
        .cmd()
        .args(["env", "multi", "cloud", "--format", "properties"])
        .assert()
        .success()
        .stdout(predicates::str::contains("servers[0]: cloud.example"))
        .stdout(predicates::str::contains("servers[1]: b.example"));
}

// =============================================================================
// Labels
// =============================================================================

/// > Labels select branches; `(_)` stands for `/`
#[test]
fn label_selects_branch() {
    let server = Server::git("config-repo");
    server.branch("release/1.0");
    server.commit("foo.properties", "foo: newer\n");

    server
        .cmd()
        .args(["env", "foo", "default", "release(_)1.0", "--format", "properties"])
        .assert()
        .success()
        .stdout(predicates::str::contains("foo: bar\n"));

    server
        .cmd()
        .args(["env", "foo", "default", "master", "--format", "properties"])
        .assert()
        .success()
        .stdout(predicates::str::contains("foo: newer\n"));
}

/// > Unknown labels are server-side failures
#[test]
fn unknown_label_fails() {
    let server = Server::git("config-repo");

    server
        .cmd()
        .args(["env", "foo", "default", "no-such-branch"])
        .assert()
        .code(1)
        .stderr(predicates::str::contains("no-such-branch"));
}

// =============================================================================
// Conditional requests
// =============================================================================

/// > A matching fingerprint yields "not modified" with no body; another
/// > profile with the same fingerprint yields fresh content
#[test]
fn matching_etag_is_not_modified() {
    let server = Server::git("config-repo");

    let first = server.cmd().args(["env", "foo", "development"]).output().unwrap();
    assert!(first.status.success());
    let tag = etag(&first.stderr);

    server
        .cmd()
        .args(["env", "foo", "development", "--if-none-match", &tag])
        .assert()
        .code(3)
        .stdout(predicates::str::is_empty())
        .stderr(predicates::str::contains(format!("ETag: {tag}")));

    let cloud = server
        .cmd()
        .args(["env", "foo", "cloud", "--if-none-match", &tag])
        .output()
        .unwrap();
    assert!(cloud.status.success());
    assert_ne!(etag(&cloud.stderr), tag);
    assert_eq!(json(&cloud.stdout)["propertySources"][1]["source"]["foo"]["value"], "cloud");
}

/// > Fingerprints are stable across runs and representations
#[test]
fn etag_is_stable_and_representation_independent() {
    let server = Server::git("config-repo");

    let v1 = server.cmd().args(["env", "foo", "development", "--format", "v1"]).output().unwrap();
    let v2 = server.cmd().args(["env", "foo", "development"]).output().unwrap();
    assert_eq!(etag(&v1.stderr), etag(&v2.stderr));
}

/// > A new commit changes the fingerprint
#[test]
fn new_commit_invalidates_etag() {
    let server = Server::git("config-repo");
    let first = server.cmd().args(["env", "foo", "development"]).output().unwrap();
    let tag = etag(&first.stderr);

    server.commit("foo-development.properties", "foo: changed\n");

    server
        .cmd()
        .args(["env", "foo", "development", "--if-none-match", &tag])
        .assert()
        .success()
        .stdout(predicates::str::contains("changed"));
}

// =============================================================================
// Failures
// =============================================================================

/// > Malformed YAML fails the whole request as a server-side failure
#[test]
fn malformed_yaml_fails_request() {
    let server = Server::git("config-repo");

    server
        .cmd()
        .args(["env", "invalid", "default"])
        .assert()
        .code(1)
        .stdout(predicates::str::is_empty())
        .stderr(predicates::str::contains("invalid.yml"));
}

/// > An unreachable repository is a server-side failure
#[test]
fn missing_repository_fails() {
    let server = Server::git("config-repo");
    let missing = server.path().join("does-not-exist");

    server
        .cmd()
        .args(["--repo", &format!("file:{}", missing.display()), "env", "foo"])
        .assert()
        .code(1)
        .stderr(predicates::str::contains("unavailable"));
}
