// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git repository backend.
//!
//! Uses git2 (libgit2) against a bare local clone per uri. Files are read
//! straight from commit trees, so there is no working tree to keep
//! consistent: a snapshot is just a commit id.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, TryLockError};
use std::time::{Duration, Instant};

use git2::build::RepoBuilder;
use git2::{AutotagOption, ErrorCode, FetchOptions, Oid, Repository};
use sha2::{Digest, Sha256};

use super::locks::{RepositoryLocks, run_with_timeout};
use super::{RepositoryBackend, RepositoryLocation, Snapshot, local_path};
use crate::error::{ResolveError, Result};

const FETCH_REFSPECS: [&str; 2] = ["+refs/heads/*:refs/remotes/origin/*", "+refs/tags/*:refs/tags/*"];

/// Backend serving files from git repositories.
pub struct GitBackend {
    basedir: PathBuf,
    timeout: Duration,
    refresh_rate: Duration,
    locks: Arc<RepositoryLocks>,
}

impl GitBackend {
    pub fn new(basedir: PathBuf, timeout: Duration, refresh_rate: Duration) -> Self {
        Self { basedir, timeout, refresh_rate, locks: Arc::new(RepositoryLocks::new()) }
    }

    /// Local clone directory for a uri.
    pub fn clone_dir(&self, uri: &str) -> PathBuf {
        let digest = Sha256::digest(uri.as_bytes());
        self.basedir.join(&hex::encode(digest)[..16])
    }
}

impl RepositoryBackend for GitBackend {
    fn resolve(&self, uri: &str, label: &str) -> Result<Snapshot> {
        let dir = self.clone_dir(uri);
        let state = self.locks.for_uri(uri);
        let refresh_rate = self.refresh_rate;

        let worker_uri = uri.to_string();
        let worker_label = label.to_string();
        let worker_dir = dir.clone();
        let version = run_with_timeout(uri, self.timeout, move || {
            let mut guard = match state.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::WouldBlock) => {
                    tracing::debug!("waiting for another fetch of {}", worker_uri);
                    state.lock().unwrap_or_else(PoisonError::into_inner)
                }
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            };
            let (repo, cloned) = open_or_clone(&worker_uri, &worker_dir)?;
            if cloned {
                guard.last_refresh = Some(Instant::now());
            } else if guard.refresh_due(refresh_rate) {
                match fetch(&repo) {
                    Ok(()) => guard.last_refresh = Some(Instant::now()),
                    // Serve the last fetched state rather than fail the request.
                    Err(e) => tracing::warn!("could not fetch {}: {}", worker_uri, e.message()),
                }
            } else {
                tracing::debug!("skipping fetch of {}, refreshed within {:?}", worker_uri, refresh_rate);
            }
            resolve_label(&repo, &worker_uri, &worker_label)
        })?;

        tracing::debug!("resolved {}@{} to {}", uri, label, version);
        Ok(Snapshot {
            location: RepositoryLocation { uri: uri.to_string(), label: label.to_string(), path: dir },
            version: Some(version),
        })
    }

    fn read_file(&self, snapshot: &Snapshot, path: &str) -> Result<Option<Vec<u8>>> {
        let uri = &snapshot.location.uri;
        let repo = Repository::open_bare(&snapshot.location.path)
            .map_err(|e| ResolveError::unavailable(uri, e.message()))?;
        let version = snapshot
            .version
            .as_deref()
            .ok_or_else(|| ResolveError::unavailable(uri, "snapshot has no commit"))?;
        let oid = Oid::from_str(version).map_err(|e| ResolveError::unavailable(uri, e.message()))?;
        let tree = repo
            .find_commit(oid)
            .and_then(|commit| commit.tree())
            .map_err(|e| ResolveError::unavailable(uri, e.message()))?;

        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(ResolveError::unavailable(uri, e.message())),
        };
        let object = entry.to_object(&repo).map_err(|e| ResolveError::unavailable(uri, e.message()))?;

        // Directories are not files.
        Ok(object.as_blob().map(|blob| blob.content().to_vec()))
    }
}

/// Open the bare clone in `dir`, cloning from `uri` when missing.
///
/// Returns whether a fresh clone was made.
fn open_or_clone(uri: &str, dir: &Path) -> Result<(Repository, bool)> {
    if let Ok(repo) = Repository::open_bare(dir) {
        return Ok((repo, false));
    }

    if dir.exists() {
        // Leftover from an interrupted clone.
        std::fs::remove_dir_all(dir).map_err(|e| ResolveError::unavailable(uri, e))?;
    }
    if let Some(parent) = dir.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ResolveError::unavailable(uri, e))?;
    }

    let url = remote_url(uri);
    tracing::info!("cloning {} into {}", url, dir.display());
    let mut options = FetchOptions::new();
    options.download_tags(AutotagOption::All);
    let repo = RepoBuilder::new()
        .bare(true)
        .fetch_options(options)
        .clone(&url, dir)
        .map_err(|e| ResolveError::unavailable(uri, e.message()))?;
    Ok((repo, true))
}

/// Fetch all branches and tags from origin.
fn fetch(repo: &Repository) -> std::result::Result<(), git2::Error> {
    tracing::info!("fetching {}", repo.path().display());
    let mut remote = repo.find_remote("origin")?;
    let mut options = FetchOptions::new();
    options.download_tags(AutotagOption::All).prune(git2::FetchPrune::On);
    remote.fetch(&FETCH_REFSPECS, Some(&mut options), None)
}

/// Resolve a branch, tag or commit id to a commit id.
fn resolve_label(repo: &Repository, uri: &str, label: &str) -> Result<String> {
    let candidates = [
        format!("refs/remotes/origin/{label}"),
        format!("refs/tags/{label}"),
        format!("refs/heads/{label}"),
    ];
    for name in &candidates {
        if let Ok(commit) = repo.find_reference(name).and_then(|r| r.peel_to_commit()) {
            return Ok(commit.id().to_string());
        }
    }

    repo.revparse_single(label)
        .and_then(|object| object.peel_to_commit())
        .map(|commit| commit.id().to_string())
        .map_err(|_| ResolveError::LabelNotFound { uri: uri.to_string(), label: label.to_string() })
}

/// Clone source for a uri; relative `file:` paths are made absolute.
fn remote_url(uri: &str) -> String {
    if !uri.starts_with("file:") {
        return uri.to_string();
    }
    let path = local_path(uri);
    std::path::absolute(&path).unwrap_or(path).to_string_lossy().into_owned()
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
