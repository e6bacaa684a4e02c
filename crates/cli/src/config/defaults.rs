// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! All default values are documented here for easy reference.
//! Individual config structs delegate to these constants via their `default_*` methods.

/// Config file name searched for by discovery.
pub const CONFIG_FILE: &str = "confer.toml";

/// Current config format version.
pub const CONFIG_VERSION: u32 = 1;

/// Repository defaults.
pub mod repository {
    use std::path::PathBuf;

    /// Label used when a request names none.
    pub const DEFAULT_LABEL: &str = "master";

    /// Seconds to wait for a clone or fetch (0 waits forever).
    pub const TIMEOUT_SECS: u64 = 5;

    /// Minimum seconds between fetches of one repository (0 fetches every request).
    pub const REFRESH_RATE_SECS: u64 = 0;

    /// Directory holding local clones.
    pub fn basedir() -> PathBuf {
        std::env::temp_dir().join("confer-repos")
    }

    /// Directories searched for config files (repository root).
    pub fn search_paths() -> Vec<String> {
        vec![String::new()]
    }
}

/// Environment resolution defaults.
pub mod environment {
    /// Stem shared by every application (`application.yml`).
    pub const SHARED_APPLICATION: &str = "application";

    /// Profile used when a request names none.
    pub const DEFAULT_PROFILE: &str = "default";
}
