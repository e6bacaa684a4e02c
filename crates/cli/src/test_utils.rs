//! Shared unit test utilities.
//!
//! Provides git fixture repositories built with git2, so tests do not depend
//! on a `git` binary or on the user's git configuration.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{BTreeMap, HashMap};

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// A bare git repository in a temp directory, written commit by commit.
pub struct TestRepo {
    dir: TempDir,
    repo: Repository,
    branches: HashMap<String, BTreeMap<String, Vec<u8>>>,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.bare(true).initial_head("master");
        let repo = Repository::init_opts(dir.path(), &opts).unwrap();
        Self { dir, repo, branches: HashMap::new() }
    }

    /// `file:` uri pointing at this repository.
    pub fn uri(&self) -> String {
        format!("file:{}", self.dir.path().display())
    }

    /// Add or replace files on `branch` and commit. Returns the commit id.
    pub fn commit(&mut self, branch: &str, files: &[(&str, &str)]) -> String {
        let tree = self.branches.entry(branch.to_string()).or_default();
        for (path, content) in files {
            tree.insert(path.to_string(), content.as_bytes().to_vec());
        }
        self.write_commit(branch, "update files")
    }

    /// Start `branch` from the current tip of `from`.
    pub fn branch(&mut self, branch: &str, from: &str) {
        let files = self.branches.get(from).cloned().unwrap_or_default();
        self.branches.insert(branch.to_string(), files);
        let tip = self.repo.find_reference(&format!("refs/heads/{from}")).unwrap();
        let commit = tip.peel_to_commit().unwrap();
        self.repo.branch(branch, &commit, true).unwrap();
    }

    /// Lightweight tag at the tip of `branch`.
    pub fn tag(&self, name: &str, branch: &str) {
        let tip = self.repo.find_reference(&format!("refs/heads/{branch}")).unwrap();
        let object = tip.peel(git2::ObjectType::Commit).unwrap();
        self.repo.tag_lightweight(name, &object, true).unwrap();
    }

    fn write_commit(&mut self, branch: &str, message: &str) -> String {
        let files = self.branches.get(branch).cloned().unwrap_or_default();
        let tree_id = write_tree(&self.repo, &files);
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let refname = format!("refs/heads/{branch}");
        let parent = self.repo.find_reference(&refname).and_then(|r| r.peel_to_commit()).ok();
        let parents: Vec<_> = parent.iter().collect();
        let oid = self.repo.commit(Some(&refname), &sig, &sig, message, &tree, &parents).unwrap();
        oid.to_string()
    }
}

/// Write nested trees for a flat `path -> content` map.
fn write_tree(repo: &Repository, files: &BTreeMap<String, Vec<u8>>) -> Oid {
    let mut builder = repo.treebuilder(None).unwrap();
    let mut subdirs: BTreeMap<String, BTreeMap<String, Vec<u8>>> = BTreeMap::new();
    for (path, content) in files {
        match path.split_once('/') {
            Some((dir, rest)) => {
                subdirs.entry(dir.to_string()).or_default().insert(rest.to_string(), content.clone());
            }
            None => {
                let blob = repo.blob(content).unwrap();
                builder.insert(path, blob, 0o100644).unwrap();
            }
        }
    }
    for (dir, sub) in &subdirs {
        let oid = write_tree(repo, sub);
        builder.insert(dir, oid, 0o040000).unwrap();
    }
    builder.write().unwrap()
}
