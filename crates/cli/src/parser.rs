// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Turns located files into property sources.

use rayon::prelude::*;

use crate::error::{ResolveError, Result};
use crate::format::{Format, properties, yaml};
use crate::locator::LocatedSource;
use crate::model::PropertySource;

/// Parses located files into property sources.
pub struct PropertySourceParser;

impl PropertySourceParser {
    /// Parse one file.
    ///
    /// A properties file yields at most one source. A YAML file yields one
    /// source per document active for `profiles`, later documents first.
    /// Files with no entries contribute nothing.
    pub fn parse(source: &LocatedSource, profiles: &[String]) -> Result<Vec<PropertySource>> {
        let text = std::str::from_utf8(&source.content)
            .map_err(|e| ResolveError::parse(&source.name, format!("invalid UTF-8: {e}")))?;

        let sources = match source.format {
            Format::Properties => {
                let props = properties::parse(text, &source.path)
                    .map_err(|msg| ResolveError::parse(&source.name, msg))?;
                vec![PropertySource::new(&source.name, props)]
            }
            Format::Yaml => {
                let documents = yaml::parse(text, &source.path)
                    .map_err(|msg| ResolveError::parse(&source.name, msg))?;
                documents
                    .into_iter()
                    .rev()
                    .filter(|doc| doc.applies_to(profiles))
                    .map(|doc| {
                        let name = match doc.index {
                            0 => source.name.clone(),
                            n => format!("{} (document #{n})", source.name),
                        };
                        PropertySource::new(name, doc.properties)
                    })
                    .collect()
            }
        };

        Ok(sources.into_iter().filter(|ps| !ps.source.is_empty()).collect())
    }

    /// Parse all files in parallel, keeping input order.
    ///
    /// The first failing file in input order determines the error.
    pub fn parse_all(sources: &[LocatedSource], profiles: &[String]) -> Result<Vec<PropertySource>> {
        let results: Vec<Result<Vec<PropertySource>>> =
            sources.par_iter().map(|source| Self::parse(source, profiles)).collect();

        let mut parsed = Vec::new();
        for result in results {
            parsed.extend(result?);
        }
        tracing::debug!(files = sources.len(), sources = parsed.len(), "parsed sources");
        Ok(parsed)
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
