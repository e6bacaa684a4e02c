//! Test helpers for behavioral specifications.
//!
//! Provides a high-level DSL for running confer against a throwaway
//! repository built from a fixture directory.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{IndexAddOption, Repository, Signature};
use tempfile::TempDir;

/// Returns a Command configured to run the confer binary
pub fn confer_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("confer"));
    cmd.env_remove("CONFER_CONFIG").env_remove("CONFER_REPO").env_remove("RUST_LOG");
    cmd
}

/// Get path to a test fixture directory
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A working directory holding `confer.toml` and a git repository seeded
/// from a fixture.
pub struct Server {
    dir: TempDir,
    repo: Repository,
}

impl Server {
    /// Git-backed server whose `master` holds the fixture's files.
    pub fn git(fixture_name: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let origin = dir.path().join("origin");
        let repo = Repository::init(&origin).unwrap();
        repo.set_head("refs/heads/master").unwrap();
        copy_dir(&fixture(fixture_name), &origin);

        let server = Self { dir, repo };
        server.commit_all("initial");
        server.config("");
        server
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn origin(&self) -> PathBuf {
        self.dir.path().join("origin")
    }

    /// Write `confer.toml` pointing at the origin, with `extra` appended.
    pub fn config(&self, extra: &str) {
        let content = format!(
            "version = 1\n\n[repository]\nuri = \"file:{}\"\nbasedir = \".confer/repos\"\ntimeout = 30\n{extra}",
            self.origin().display()
        );
        std::fs::write(self.dir.path().join("confer.toml"), content).unwrap();
    }

    /// Write a file into the origin's working tree and commit it.
    pub fn commit(&self, path: &str, content: &str) -> String {
        std::fs::write(self.origin().join(path), content).unwrap();
        self.commit_all(&format!("update {path}"))
    }

    /// Create `branch` at the current head.
    pub fn branch(&self, branch: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo.branch(branch, &head, false).unwrap();
    }

    /// Command running in the server directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = confer_cmd();
        cmd.current_dir(self.dir.path());
        cmd
    }

    fn commit_all(&self, message: &str) -> String {
        let mut index = self.repo.index().unwrap();
        index.add_all(["*"], IndexAddOption::DEFAULT, None).unwrap();
        index.write().unwrap();
        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now("confer", "confer@example.com").unwrap();

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
            .to_string()
    }
}

fn copy_dir(from: &Path, to: &Path) {
    for entry in std::fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            std::fs::create_dir_all(&target).unwrap();
            copy_dir(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), target).unwrap();
        }
    }
}

/// ETag value printed on stderr by `confer env`.
pub fn etag(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .find_map(|line| line.strip_prefix("ETag: "))
        .expect("stderr should carry an ETag line")
        .to_string()
}
