// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Served data model: property sources, environments and raw resources.

use std::collections::{BTreeMap, HashMap};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Name of the synthetic source carrying server-injected values.
pub const OVERRIDES_SOURCE: &str = "overrides";

/// A single property value together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValue {
    pub value: String,
    /// Origin for diagnostics, e.g. `foo.properties:3`.
    pub origin: Option<String>,
}

/// Insertion-ordered string map.
///
/// Re-inserting a key replaces the value but keeps the original position,
/// matching how a later duplicate line in a properties file behaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, PropertyValue)>,
    index: HashMap<String, usize>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert_with_origin(key, value, None);
    }

    pub fn insert_with_origin(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        origin: Option<String>,
    ) {
        let key = key.into();
        let value = PropertyValue { value: value.into(), origin };
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&pos| self.entries[pos].1.value.as_str())
    }

    pub fn get_value(&self, key: &str) -> Option<&PropertyValue> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Properties::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

/// Serializes as a plain `{key: value}` object in insertion order.
impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, &value.value)?;
        }
        map.end()
    }
}

/// One ordered key-value set contributed by a file or by the overrides.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PropertySource {
    pub name: String,
    pub source: Properties,
}

impl PropertySource {
    pub fn new(name: impl Into<String>, source: Properties) -> Self {
        Self { name: name.into(), source }
    }
}

/// The merged, precedence-ordered view for one request.
///
/// `property_sources[0]` has the highest precedence and is always the
/// overrides source.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub name: String,
    pub profiles: Vec<String>,
    pub label: String,
    pub version: Option<String>,
    pub property_sources: Vec<PropertySource>,
}

impl Environment {
    /// Look up a key honoring precedence (first source wins).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.property_sources.iter().find_map(|ps| ps.source.get(key))
    }

    /// Merge all sources into a single map, earlier sources winning.
    pub fn flatten(&self) -> BTreeMap<String, String> {
        let mut merged = BTreeMap::new();
        for ps in self.property_sources.iter().rev() {
            for (key, value) in ps.source.iter() {
                merged.insert(key.to_string(), value.value.clone());
            }
        }
        merged
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.property_sources.iter().map(|ps| ps.name.as_str()).collect()
    }
}

/// Exact bytes of one file at a resolved label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResource {
    pub path: String,
    pub content: Vec<u8>,
    pub label: String,
    pub version: Option<String>,
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
