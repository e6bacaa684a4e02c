// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Candidate file lookup.
//!
//! Maps `(application, profiles)` to an ordered list of existing files in a
//! snapshot, highest precedence first.

use std::sync::Arc;

use crate::backend::{RepositoryBackend, Snapshot, normalize_path};
use crate::error::Result;
use crate::format::{EXTENSIONS, Format};

/// One existing config file, read from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSource {
    /// Display name, `{uri}@{label}/{path}`.
    pub name: String,
    /// Repository-relative path.
    pub path: String,
    pub format: Format,
    pub content: Vec<u8>,
}

/// Everything located for one request.
#[derive(Debug, Clone)]
pub struct Located {
    pub snapshot: Snapshot,
    pub sources: Vec<LocatedSource>,
}

/// Finds the files contributing to an environment.
pub struct SourceLocator {
    backend: Arc<dyn RepositoryBackend>,
    uri: String,
    search_paths: Vec<String>,
    shared_application: String,
}

impl SourceLocator {
    pub fn new(
        backend: Arc<dyn RepositoryBackend>,
        uri: impl Into<String>,
        search_paths: Vec<String>,
        shared_application: impl Into<String>,
    ) -> Self {
        let search_paths = if search_paths.is_empty() { vec![String::new()] } else { search_paths };
        Self { backend, uri: uri.into(), search_paths, shared_application: shared_application.into() }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Resolve `label` and read every existing candidate from the snapshot.
    pub fn locate(&self, application: &str, profiles: &[String], label: &str) -> Result<Located> {
        let snapshot = self.backend.resolve(&self.uri, label)?;
        let sources = self.locate_in(&snapshot, application, profiles)?;
        tracing::debug!(
            application,
            label,
            version = snapshot.version.as_deref().unwrap_or("-"),
            found = sources.len(),
            "located sources"
        );
        Ok(Located { snapshot, sources })
    }

    /// Read existing candidates from an already resolved snapshot.
    pub fn locate_in(
        &self,
        snapshot: &Snapshot,
        application: &str,
        profiles: &[String],
    ) -> Result<Vec<LocatedSource>> {
        let mut sources = Vec::new();
        for (path, format) in self.candidates(application, profiles) {
            if let Some(content) = self.backend.read_file(snapshot, &path)? {
                sources.push(LocatedSource {
                    name: format!("{}@{}/{}", snapshot.location.uri, snapshot.location.label, path),
                    path,
                    format,
                    content,
                });
            }
        }
        Ok(sources)
    }

    /// Candidate paths in precedence order, whether or not they exist.
    ///
    /// Profiles are taken left to right; within a profile the application
    /// file beats the shared one. Profile-less files come last. Each stem is
    /// tried in every search path, and every extension within a path.
    pub fn candidates(&self, application: &str, profiles: &[String]) -> Vec<(String, Format)> {
        let mut stems = Vec::new();
        for profile in profiles {
            stems.push(format!("{application}-{profile}"));
            if let Some(shared) = self.shared_stem(application) {
                stems.push(format!("{shared}-{profile}"));
            }
        }
        stems.push(application.to_string());
        if let Some(shared) = self.shared_stem(application) {
            stems.push(shared.to_string());
        }

        let mut candidates: Vec<(String, Format)> = Vec::new();
        for stem in &stems {
            for search_path in &self.search_paths {
                for (ext, format) in EXTENSIONS {
                    let joined = match search_path.trim_matches('/') {
                        "" => format!("{stem}.{ext}"),
                        dir => format!("{dir}/{stem}.{ext}"),
                    };
                    let Some(path) = normalize_path(&joined) else {
                        continue;
                    };
                    if !candidates.iter().any(|(p, _)| *p == path) {
                        candidates.push((path, format));
                    }
                }
            }
        }
        candidates
    }

    fn shared_stem(&self, application: &str) -> Option<&str> {
        let shared = self.shared_application.as_str();
        (!shared.is_empty() && shared != application).then_some(shared)
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
