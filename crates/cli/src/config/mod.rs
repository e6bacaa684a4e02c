// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server configuration (`confer.toml`).

pub mod defaults;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::discovery::ConfigLocation;
use serde::Deserialize;

use crate::model::Properties;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Config format version.
    pub version: u32,

    pub repository: RepositoryConfig,

    pub environment: EnvironmentConfig,

    /// Values injected into every environment ahead of repository content.
    pub overrides: BTreeMap<String, toml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: defaults::CONFIG_VERSION,
            repository: RepositoryConfig::default(),
            environment: EnvironmentConfig::default(),
            overrides: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Overrides as string properties; scalars are stringified.
    pub fn overrides(&self) -> Properties {
        self.overrides
            .iter()
            .filter_map(|(key, value)| scalar_string(value).map(|v| (key.clone(), v)))
            .collect()
    }
}

/// Which backend serves the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Git repository (local path or remote url).
    #[default]
    Git,
    /// Plain directory, no versioning.
    Native,
}

/// `[repository]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    pub backend: BackendKind,

    /// Repository uri; `file:` uris and plain paths are local.
    pub uri: Option<String>,

    /// Label used when a request names none (default: "master").
    pub default_label: String,

    /// Directory holding local clones.
    pub basedir: PathBuf,

    /// Seconds to wait for clone/fetch (default: 5, 0 = no limit).
    pub timeout: u64,

    /// Minimum seconds between fetches (default: 0).
    pub refresh_rate: u64,

    /// Repository subdirectories searched for config files, in order.
    pub search_paths: Vec<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            uri: None,
            default_label: defaults::repository::DEFAULT_LABEL.to_string(),
            basedir: defaults::repository::basedir(),
            timeout: defaults::repository::TIMEOUT_SECS,
            refresh_rate: defaults::repository::REFRESH_RATE_SECS,
            search_paths: defaults::repository::search_paths(),
        }
    }
}

impl RepositoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn refresh_rate(&self) -> Duration {
        Duration::from_secs(self.refresh_rate)
    }
}

/// `[environment]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Stem shared by all applications; empty disables shared files.
    pub shared_application: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self { shared_application: defaults::environment::SHARED_APPLICATION.to_string() }
    }
}

/// Load and validate the config at `location`.
///
/// A relative `basedir` is resolved against the location's root.
pub fn load(location: &ConfigLocation) -> anyhow::Result<Config> {
    let path = &location.file;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config = parse(&content, path)?;
    config.repository.basedir = location.resolve(&config.repository.basedir);
    Ok(config)
}

/// Parse config content; `path` is used for error messages only.
pub fn parse(content: &str, path: &Path) -> anyhow::Result<Config> {
    let config: Config =
        toml::from_str(content).with_context(|| format!("invalid config {}", path.display()))?;

    if config.version != defaults::CONFIG_VERSION {
        anyhow::bail!(
            "unsupported config version {} in {} (expected {})",
            config.version,
            path.display(),
            defaults::CONFIG_VERSION
        );
    }

    if let Some((key, _)) = config.overrides.iter().find(|(_, v)| scalar_string(v).is_none()) {
        anyhow::bail!("override {key:?} in {} must be a scalar value", path.display());
    }

    Ok(config)
}

fn scalar_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
