// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `.properties` output of the merged view.

use std::fmt::Write;

use crate::model::Environment;

use super::EnvironmentFormatter;

/// Flattened `key: value` lines, keys sorted, escaped so they parse back.
pub struct PropertiesFormatter;

impl EnvironmentFormatter for PropertiesFormatter {
    fn format(&self, environment: &Environment) -> anyhow::Result<String> {
        let merged = environment.flatten();
        let mut out = String::with_capacity(merged.len() * 32);
        for (key, value) in &merged {
            writeln!(out, "{}: {}", escape(key, true), escape(value, false))?;
        }
        Ok(out)
    }
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0c' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(c);
            }
            '#' | '!' if i == 0 => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
