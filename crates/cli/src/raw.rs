// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbatim file retrieval, outside the merge pipeline.

use std::sync::Arc;

use crate::backend::{RepositoryBackend, normalize_path};
use crate::error::{ResolveError, Result};
use crate::model::RawResource;

/// Serves single files byte for byte.
pub struct RawResourceResolver {
    backend: Arc<dyn RepositoryBackend>,
    uri: String,
    search_paths: Vec<String>,
}

impl RawResourceResolver {
    /// An empty `search_paths` means the repository root only.
    pub fn new(
        backend: Arc<dyn RepositoryBackend>,
        uri: impl Into<String>,
        search_paths: Vec<String>,
    ) -> Self {
        let search_paths = if search_paths.is_empty() { vec![String::new()] } else { search_paths };
        Self { backend, uri: uri.into(), search_paths }
    }

    /// Read `path` at `label`, trying each search path in configured order.
    ///
    /// `application` and `profile` identify the request but do not affect
    /// which file is read.
    pub fn resolve_raw(
        &self,
        application: &str,
        profile: &str,
        label: &str,
        path: &str,
    ) -> Result<RawResource> {
        let not_found = || ResolveError::NotFound { path: path.to_string() };
        let normalized = normalize_path(path).ok_or_else(not_found)?;

        let snapshot = self.backend.resolve(&self.uri, label)?;
        for candidate in self.candidates(&normalized) {
            let Some(content) = self.backend.read_file(&snapshot, &candidate)? else {
                continue;
            };
            tracing::debug!(application, profile, label, path = %candidate, bytes = content.len(), "raw resource");
            return Ok(RawResource {
                path: candidate,
                content,
                label: label.to_string(),
                version: snapshot.version,
            });
        }
        Err(not_found())
    }

    /// Repository paths for an already normalized `path`, one per distinct
    /// search path.
    fn candidates(&self, path: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();
        for search_path in &self.search_paths {
            let joined = match search_path.trim_matches('/') {
                "" => path.to_string(),
                dir => format!("{dir}/{path}"),
            };
            if let Some(candidate) = normalize_path(&joined)
                && !candidates.contains(&candidate)
            {
                candidates.push(candidate);
            }
        }
        candidates
    }
}

#[cfg(test)]
#[path = "raw_tests.rs"]
mod tests;
