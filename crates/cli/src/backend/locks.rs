// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-repository mutual exclusion and bounded waiting.
//!
//! Fetches against the same uri are serialized; different uris never
//! contend. Work that may block on the network runs on a worker thread so
//! the caller can give up after a timeout without killing the process.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use dashmap::DashMap;

use crate::error::{ResolveError, Result};

/// Mutable bookkeeping guarded by a repository's lock.
#[derive(Debug, Default)]
pub struct RepositoryState {
    /// When the local copy was last cloned or fetched.
    pub last_refresh: Option<Instant>,
}

impl RepositoryState {
    /// Whether the local copy is older than `refresh_rate`.
    pub fn refresh_due(&self, refresh_rate: Duration) -> bool {
        match self.last_refresh {
            Some(at) => at.elapsed() >= refresh_rate,
            None => true,
        }
    }
}

/// Lock registry keyed by repository uri.
#[derive(Debug, Default)]
pub struct RepositoryLocks {
    locks: DashMap<String, Arc<Mutex<RepositoryState>>>,
}

impl RepositoryLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock for `uri`, created on first use.
    pub fn for_uri(&self, uri: &str) -> Arc<Mutex<RepositoryState>> {
        self.locks.entry(uri.to_string()).or_default().clone()
    }

    /// Number of repositories seen so far.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Run `work` on a worker thread and wait at most `timeout` for it.
///
/// A zero timeout waits indefinitely. On expiry the worker keeps running
/// (and keeps any lock it holds) until it finishes on its own.
pub fn run_with_timeout<T, F>(uri: &str, timeout: Duration, work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(1);
    std::thread::Builder::new()
        .name("confer-fetch".to_string())
        .spawn(move || {
            // Receiver may have given up already.
            let _ = tx.send(work());
        })
        .map_err(|e| ResolveError::unavailable(uri, e))?;

    let received = if timeout.is_zero() {
        rx.recv().map_err(|_| RecvTimeoutError::Disconnected)
    } else {
        rx.recv_timeout(timeout)
    };

    match received {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            tracing::warn!("repository {} did not respond within {:?}", uri, timeout);
            Err(ResolveError::Timeout { uri: uri.to_string(), after: timeout })
        }
        Err(RecvTimeoutError::Disconnected) => {
            Err(ResolveError::unavailable(uri, "worker exited without a result"))
        }
    }
}

#[cfg(test)]
#[path = "locks_tests.rs"]
mod tests;
