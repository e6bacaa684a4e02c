// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plain directory backend.
//!
//! Serves files from a local directory as-is. There is no history, so the
//! label is recorded but not interpreted and snapshots carry no version.

use std::io::ErrorKind;

use super::{RepositoryBackend, RepositoryLocation, Snapshot, local_path};
use crate::error::{ResolveError, Result};

/// Backend reading from a directory on disk.
#[derive(Debug, Default)]
pub struct NativeBackend;

impl NativeBackend {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryBackend for NativeBackend {
    fn resolve(&self, uri: &str, label: &str) -> Result<Snapshot> {
        let path = local_path(uri);
        if !path.is_dir() {
            return Err(ResolveError::unavailable(uri, format!("{} is not a directory", path.display())));
        }
        Ok(Snapshot {
            location: RepositoryLocation { uri: uri.to_string(), label: label.to_string(), path },
            version: None,
        })
    }

    fn read_file(&self, snapshot: &Snapshot, path: &str) -> Result<Option<Vec<u8>>> {
        let full = snapshot.location.path.join(path);
        if full.is_dir() {
            return Ok(None);
        }
        match std::fs::read(&full) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ResolveError::unavailable(&snapshot.location.uri, e)),
        }
    }
}

#[cfg(test)]
#[path = "native_tests.rs"]
mod tests;
