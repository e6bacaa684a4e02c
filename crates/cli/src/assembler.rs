// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment assembly.

use crate::model::{Environment, OVERRIDES_SOURCE, Properties, PropertySource};

/// Builds environments, prepending the server overrides.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentAssembler {
    overrides: Properties,
}

impl EnvironmentAssembler {
    pub fn new(overrides: Properties) -> Self {
        Self { overrides }
    }

    /// Assemble an environment from parsed sources, already in precedence order.
    ///
    /// The overrides source is always first, even when empty.
    pub fn assemble(
        &self,
        application: &str,
        profiles: &[String],
        label: &str,
        version: Option<String>,
        parsed: Vec<PropertySource>,
    ) -> Environment {
        let mut property_sources = Vec::with_capacity(parsed.len() + 1);
        property_sources.push(PropertySource::new(OVERRIDES_SOURCE, self.overrides.clone()));
        property_sources.extend(parsed);

        Environment {
            name: application.to_string(),
            profiles: profiles.to_vec(),
            label: label.to_string(),
            version,
            property_sources,
        }
    }
}

#[cfg(test)]
#[path = "assembler_tests.rs"]
mod tests;
