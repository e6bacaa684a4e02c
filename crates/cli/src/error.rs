// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution error kinds.
//!
//! Every failure the engine can produce while serving a request. Backend and
//! parser errors travel up unchanged; the boundary decides how to present
//! them via [`ResolveError::status`].

use std::time::Duration;

use thiserror::Error;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors raised while resolving an environment or a raw resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The backend cannot reach or read the repository.
    #[error("repository {uri} is unavailable: {reason}")]
    RepositoryUnavailable { uri: String, reason: String },

    /// The label does not name a branch, tag or commit.
    #[error("no such label {label:?} in repository {uri}")]
    LabelNotFound { uri: String, label: String },

    /// A located file violates its format's grammar.
    #[error("failed to parse {source_name}: {message}")]
    Parse { source_name: String, message: String },

    /// A raw resource path does not exist at the resolved label.
    #[error("resource not found: {path}")]
    NotFound { path: String },

    /// The backend did not answer in bounded time.
    #[error("repository {uri} did not respond within {after:?}")]
    Timeout { uri: String, after: Duration },

    /// An environment could not be encoded for fingerprinting.
    #[error("failed to encode environment {name}: {message}")]
    Encoding { name: String, message: String },
}

/// How the boundary should classify a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Absent resource (404-equivalent).
    NotFound,
    /// Server-side failure (5xx-equivalent).
    ServerError,
}

impl ResolveError {
    pub fn unavailable(uri: impl Into<String>, reason: impl ToString) -> Self {
        Self::RepositoryUnavailable { uri: uri.into(), reason: reason.to_string() }
    }

    pub fn parse(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse { source_name: source_name.into(), message: message.to_string() }
    }

    /// Whether a higher layer may retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RepositoryUnavailable { .. } | Self::Timeout { .. })
    }

    pub fn status(&self) -> Status {
        match self {
            Self::NotFound { .. } => Status::NotFound,
            _ => Status::ServerError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
