// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-process repository backend.
//!
//! Holds labelled, immutable revisions in memory. Used to exercise the
//! engine without version control, and to simulate an unreachable
//! repository.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use super::{RepositoryBackend, RepositoryLocation, Snapshot};
use crate::error::{ResolveError, Result};

type Tree = Arc<BTreeMap<String, Vec<u8>>>;

#[derive(Default)]
struct MemoryState {
    /// Revision id -> file tree.
    revisions: HashMap<String, Tree>,
    /// Label -> revision id.
    labels: HashMap<String, String>,
    next_revision: u64,
    unavailable: bool,
}

/// Backend holding repository content in memory.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write files on top of `label`'s current tree. Returns the new revision id.
    pub fn commit(&self, label: &str, files: &[(&str, &str)]) -> String {
        self.update(label, |tree| {
            for (path, content) in files {
                tree.insert(path.to_string(), content.as_bytes().to_vec());
            }
        })
    }

    /// Delete a file from `label`'s tree. Returns the new revision id.
    pub fn remove(&self, label: &str, path: &str) -> String {
        self.update(label, |tree| {
            tree.remove(path);
        })
    }

    /// Point `name` at the revision `label` currently resolves to.
    pub fn tag(&self, name: &str, label: &str) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(revision) = state.labels.get(label).cloned() {
            state.labels.insert(name.to_string(), revision);
        }
    }

    /// Make every subsequent resolve fail as unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).unavailable = unavailable;
    }

    fn update(&self, label: &str, change: impl FnOnce(&mut BTreeMap<String, Vec<u8>>)) -> String {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut tree = state
            .labels
            .get(label)
            .and_then(|rev| state.revisions.get(rev))
            .map(|tree| BTreeMap::clone(tree))
            .unwrap_or_default();
        change(&mut tree);

        state.next_revision += 1;
        let revision = format!("mem-{}", state.next_revision);
        state.revisions.insert(revision.clone(), Arc::new(tree));
        state.labels.insert(label.to_string(), revision.clone());
        revision
    }

    fn tree(&self, snapshot: &Snapshot) -> Result<Tree> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        snapshot
            .version
            .as_ref()
            .and_then(|rev| state.revisions.get(rev))
            .cloned()
            .ok_or_else(|| ResolveError::unavailable(&snapshot.location.uri, "unknown revision"))
    }
}

impl RepositoryBackend for MemoryBackend {
    fn resolve(&self, uri: &str, label: &str) -> Result<Snapshot> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.unavailable {
            return Err(ResolveError::unavailable(uri, "repository is offline"));
        }

        let revision = match state.labels.get(label) {
            Some(revision) => revision.clone(),
            None if state.revisions.contains_key(label) => label.to_string(),
            None => {
                return Err(ResolveError::LabelNotFound {
                    uri: uri.to_string(),
                    label: label.to_string(),
                });
            }
        };

        Ok(Snapshot {
            location: RepositoryLocation {
                uri: uri.to_string(),
                label: label.to_string(),
                path: PathBuf::new(),
            },
            version: Some(revision),
        })
    }

    fn read_file(&self, snapshot: &Snapshot, path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.tree(snapshot)?.get(path).cloned())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
