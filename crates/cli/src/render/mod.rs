// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment output representations.
//!
//! JSON (v1 plain values, v2 values with origins) keeps the source list;
//! YAML and properties print the merged, flattened view.

mod json;
mod properties;
mod yaml;

use crate::cli::Representation;
use crate::model::Environment;

pub use json::{JsonV1Formatter, JsonV2Formatter};
pub use properties::PropertiesFormatter;
pub use yaml::YamlFormatter;

/// Formats an environment into one representation.
pub trait EnvironmentFormatter {
    fn format(&self, environment: &Environment) -> anyhow::Result<String>;
}

/// Format an environment in the requested representation.
pub fn format_environment(
    representation: Representation,
    environment: &Environment,
) -> anyhow::Result<String> {
    let formatter: Box<dyn EnvironmentFormatter> = match representation {
        Representation::V1 => Box::new(JsonV1Formatter),
        Representation::V2 => Box::new(JsonV2Formatter),
        Representation::Yaml => Box::new(YamlFormatter),
        Representation::Properties => Box::new(PropertiesFormatter),
    };
    formatter.format(environment)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
