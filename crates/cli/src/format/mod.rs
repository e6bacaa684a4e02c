// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Supported config file formats.
//!
//! The set is closed: each variant has one parser, chosen by extension.

pub mod properties;
pub mod yaml;

/// A config file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Flat `key=value` text (`.properties`).
    Properties,
    /// Hierarchical YAML (`.yml`, `.yaml`).
    Yaml,
}

/// Extensions tried for every candidate stem, in lookup order.
pub const EXTENSIONS: [(&str, Format); 3] =
    [("properties", Format::Properties), ("yml", Format::Yaml), ("yaml", Format::Yaml)];

impl Format {
    /// Format for a file extension (case-sensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        EXTENSIONS.iter().find(|(e, _)| *e == ext).map(|(_, format)| *format)
    }

    /// Format for a path, by its extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let (_, ext) = path.rsplit_once('.')?;
        Self::from_extension(ext)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
