// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! YAML output of the merged view.

use crate::model::Environment;

use super::EnvironmentFormatter;

/// Flattened `key: value` mapping, keys sorted.
pub struct YamlFormatter;

impl EnvironmentFormatter for YamlFormatter {
    fn format(&self, environment: &Environment) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(&environment.flatten())?)
    }
}
