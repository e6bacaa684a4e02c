// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Content fingerprints for conditional requests.
//!
//! A fingerprint is the SHA-256 of the environment's RFC 8785 canonical JSON,
//! version included. It is independent of the output representation.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::{ResolveError, Result};
use crate::model::Environment;

/// Hex digest identifying an environment's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of an environment.
    pub fn of(environment: &Environment) -> Result<Self> {
        let canonical = serde_json_canonicalizer::to_vec(environment).map_err(|e| {
            ResolveError::Encoding { name: environment.name.clone(), message: e.to_string() }
        })?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(Self(hex::encode(hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strong entity tag, quoted.
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.0)
    }

    /// Whether an `If-None-Match` value names this fingerprint.
    ///
    /// Accepts `*`, comma-separated lists, weak (`W/`) tags and bare digests.
    pub fn matches(&self, if_none_match: &str) -> bool {
        if_none_match.split(',').map(str::trim).any(|tag| {
            if tag == "*" {
                return true;
            }
            let tag = tag.strip_prefix("W/").unwrap_or(tag);
            let tag = tag.strip_prefix('"').and_then(|t| t.strip_suffix('"')).unwrap_or(tag);
            tag == self.0
        })
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint of an environment.
pub fn fingerprint(environment: &Environment) -> Result<Fingerprint> {
    Fingerprint::of(environment)
}

/// Whether a client's `If-None-Match` value matches `candidate`.
pub fn matches(candidate: &Fingerprint, if_none_match: &str) -> bool {
    candidate.matches(if_none_match)
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;
