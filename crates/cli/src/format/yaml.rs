// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! YAML parsing and flattening.
//!
//! Nested mappings flatten to dotted keys and sequences to indexed keys
//! (`servers[0]`). A file may hold several `---` documents; each may be
//! gated on active profiles.

use serde::Deserialize;
use serde_yaml::Value;

use crate::model::Properties;

/// Keys gating a document on the active profiles, newest first.
const ACTIVATION_KEYS: [&str; 2] = ["spring.config.activate.on-profile", "spring.profiles"];

/// Key used when a document is a bare scalar.
const SCALAR_KEY: &str = "document";

/// One flattened YAML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlDocument {
    /// Zero-based position in the file.
    pub index: usize,
    pub properties: Properties,
    /// Profile expressions this document is limited to; `None` = always.
    pub activation: Option<Vec<String>>,
}

impl YamlDocument {
    /// Whether the document applies to the requested profiles.
    ///
    /// `!name` matches when `name` is not active; any matching expression
    /// activates the document.
    pub fn applies_to(&self, profiles: &[String]) -> bool {
        let Some(expressions) = &self.activation else {
            return true;
        };
        expressions.iter().any(|expr| match expr.strip_prefix('!') {
            Some(negated) => !profiles.iter().any(|p| p == negated),
            None => profiles.iter().any(|p| p == expr),
        })
    }
}

/// Parse every document in `text`. Empty documents are dropped.
pub fn parse(text: &str, origin: &str) -> Result<Vec<YamlDocument>, String> {
    let mut documents = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let value = Value::deserialize(document).map_err(|e| e.to_string())?;
        let doc_origin = match index {
            0 => origin.to_string(),
            n => format!("{origin} (document #{n})"),
        };

        let mut root = &value;
        while let Value::Tagged(tagged) = root {
            root = &tagged.value;
        }

        let mut properties = Properties::new();
        match root {
            Value::Null => continue,
            Value::Mapping(_) => flatten("", root, &doc_origin, &mut properties),
            scalar => flatten(SCALAR_KEY, scalar, &doc_origin, &mut properties),
        }

        let activation = activation(&properties);
        documents.push(YamlDocument { index, properties, activation });
    }
    Ok(documents)
}

fn activation(properties: &Properties) -> Option<Vec<String>> {
    let expr = ACTIVATION_KEYS.iter().find_map(|key| properties.get(key))?;
    Some(
        expr.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn flatten(prefix: &str, value: &Value, origin: &str, out: &mut Properties) {
    match value {
        Value::Mapping(map) => {
            if map.is_empty() && !prefix.is_empty() {
                out.insert_with_origin(prefix, "", Some(origin.to_string()));
            }
            for (key, child) in map {
                let key = key_string(key);
                let path = if prefix.is_empty() { key } else { format!("{prefix}.{key}") };
                flatten(&path, child, origin, out);
            }
        }
        Value::Sequence(items) => {
            if items.is_empty() {
                out.insert_with_origin(prefix, "", Some(origin.to_string()));
            }
            for (i, child) in items.iter().enumerate() {
                flatten(&format!("{prefix}[{i}]"), child, origin, out);
            }
        }
        Value::Tagged(tagged) => flatten(prefix, &tagged.value, origin, out),
        Value::Null => out.insert_with_origin(prefix, "", Some(origin.to_string())),
        Value::Bool(b) => out.insert_with_origin(prefix, b.to_string(), Some(origin.to_string())),
        Value::Number(n) => out.insert_with_origin(prefix, n.to_string(), Some(origin.to_string())),
        Value::String(s) => out.insert_with_origin(prefix, s.as_str(), Some(origin.to_string())),
    }
}

fn key_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        Value::Tagged(tagged) => key_string(&tagged.value),
        complex => serde_yaml::to_string(complex)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
#[path = "yaml_tests.rs"]
mod tests;
