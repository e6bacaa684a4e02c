// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repository backends.
//!
//! A backend turns `(uri, label)` into an immutable [`Snapshot`] and reads
//! file bytes from it. Backends own their local storage; nothing else in the
//! crate touches it.

mod git;
mod locks;
mod memory;
mod native;

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::config::{BackendKind, RepositoryConfig};
use crate::error::Result;

pub use git::GitBackend;
pub use locks::{RepositoryLocks, run_with_timeout};
pub use memory::MemoryBackend;
pub use native::NativeBackend;

/// Where a resolved request reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocation {
    pub uri: String,
    /// Label as requested, after escape translation.
    pub label: String,
    /// Backend-owned local storage for this repository.
    pub path: PathBuf,
}

/// Handle to one consistent revision of a repository.
///
/// Stays readable until the process exits; later fetches never change what a
/// handle sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub location: RepositoryLocation,
    /// Concrete revision id, `None` for unversioned backends.
    pub version: Option<String>,
}

/// The two operations the engine needs from version control.
pub trait RepositoryBackend: Send + Sync {
    /// Resolve `label` in the repository at `uri`, fetching if needed.
    fn resolve(&self, uri: &str, label: &str) -> Result<Snapshot>;

    /// Read `path` from a snapshot. `Ok(None)` means the file does not exist.
    fn read_file(&self, snapshot: &Snapshot, path: &str) -> Result<Option<Vec<u8>>>;
}

/// Build the backend selected in configuration.
pub fn from_config(config: &RepositoryConfig) -> Arc<dyn RepositoryBackend> {
    match config.backend {
        BackendKind::Git => Arc::new(GitBackend::new(
            config.basedir.clone(),
            config.timeout(),
            config.refresh_rate(),
        )),
        BackendKind::Native => Arc::new(NativeBackend::new()),
    }
}

/// Normalize a repository-relative path.
///
/// Strips leading separators and `.` components. Returns `None` for paths
/// that escape the repository root or name nothing.
pub fn normalize_path(path: &str) -> Option<String> {
    let mut parts = Vec::new();
    for component in Path::new(path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if parts.is_empty() { None } else { Some(parts.join("/")) }
}

/// Map a `file:` uri to a local path; other uris are returned unchanged.
pub fn local_path(uri: &str) -> PathBuf {
    let path = uri
        .strip_prefix("file://")
        .or_else(|| uri.strip_prefix("file:"))
        .unwrap_or(uri);
    PathBuf::from(path)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
