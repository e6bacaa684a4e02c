// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locating `confer.toml`.
//!
//! Without `-C`, the search walks up from the working directory and stops at
//! the first directory holding either `confer.toml` or `.git`. A config
//! outside the current checkout is never picked up.

use std::path::{Path, PathBuf};

use crate::config::defaults::CONFIG_FILE;

/// A config file and the directory its relative paths resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub file: PathBuf,
    pub root: PathBuf,
}

impl ConfigLocation {
    /// Location of a file named on the command line.
    pub fn explicit(file: &Path) -> Self {
        let root = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self { file: file.to_path_buf(), root }
    }

    /// `path` unchanged if absolute, otherwise joined onto the root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) }
    }
}

/// Find the config for a process started in `start_dir`.
pub fn discover(start_dir: &Path) -> Option<ConfigLocation> {
    let root = start_dir
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE).is_file() || dir.join(".git").exists())?;
    let file = root.join(CONFIG_FILE);
    file.is_file().then(|| ConfigLocation { file, root: root.to_path_buf() })
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
