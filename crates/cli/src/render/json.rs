// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON environment output.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::model::{Environment, Properties};

use super::EnvironmentFormatter;

/// `{name, profiles, label, version, propertySources}` with plain values.
pub struct JsonV1Formatter;

impl EnvironmentFormatter for JsonV1Formatter {
    fn format(&self, environment: &Environment) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(environment)?)
    }
}

/// Like v1, but each value is `{value, origin}`.
pub struct JsonV2Formatter;

impl EnvironmentFormatter for JsonV2Formatter {
    fn format(&self, environment: &Environment) -> anyhow::Result<String> {
        let document = EnvironmentV2 {
            name: &environment.name,
            profiles: &environment.profiles,
            label: &environment.label,
            version: environment.version.as_deref(),
            property_sources: environment
                .property_sources
                .iter()
                .map(|ps| SourceV2 { name: &ps.name, source: WithOrigins(&ps.source) })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvironmentV2<'a> {
    name: &'a str,
    profiles: &'a [String],
    label: &'a str,
    version: Option<&'a str>,
    property_sources: Vec<SourceV2<'a>>,
}

#[derive(Serialize)]
struct SourceV2<'a> {
    name: &'a str,
    source: WithOrigins<'a>,
}

struct WithOrigins<'a>(&'a Properties);

#[derive(Serialize)]
struct ValueV2<'a> {
    value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<&'a str>,
}

impl Serialize for WithOrigins<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0.iter() {
            let entry = ValueV2 { value: &value.value, origin: value.origin.as_deref() };
            map.serialize_entry(key, &entry)?;
        }
        map.end()
    }
}
