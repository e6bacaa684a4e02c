// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request normalization.

use crate::config::defaults::environment::DEFAULT_PROFILE;

/// Escape allowed in labels where `/` cannot appear in a path segment.
const LABEL_SLASH_ESCAPE: &str = "(_)";

/// A normalized environment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRequest {
    pub application: String,
    /// Never empty; `["default"]` when none were given.
    pub profiles: Vec<String>,
    /// `None` selects the configured default label.
    pub label: Option<String>,
}

impl EnvironmentRequest {
    /// Build from a comma-separated profile list.
    pub fn new(application: &str, profiles: &str, label: Option<&str>) -> Self {
        Self {
            application: application.to_string(),
            profiles: parse_profiles(profiles),
            label: label.and_then(normalize_label),
        }
    }
}

/// A raw resource request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    pub application: String,
    pub profile: String,
    pub label: Option<String>,
    pub path: String,
}

impl RawRequest {
    pub fn new(application: &str, profile: &str, label: Option<&str>, path: &str) -> Self {
        Self {
            application: application.to_string(),
            profile: profile.to_string(),
            label: label.and_then(normalize_label),
            path: path.to_string(),
        }
    }
}

/// Split a comma-separated profile list.
///
/// Blank entries are dropped and duplicates removed keeping the first.
pub fn parse_profiles(profiles: &str) -> Vec<String> {
    let mut parsed: Vec<String> = Vec::new();
    for profile in profiles.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !parsed.iter().any(|p| p == profile) {
            parsed.push(profile.to_string());
        }
    }
    if parsed.is_empty() {
        parsed.push(DEFAULT_PROFILE.to_string());
    }
    parsed
}

/// Translate `(_)` to `/`. Blank labels count as absent.
pub fn normalize_label(label: &str) -> Option<String> {
    let label = label.trim();
    (!label.is_empty()).then(|| label.replace(LABEL_SLASH_ESCAPE, "/"))
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
