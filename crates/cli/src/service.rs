// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request pipeline.
//!
//! Wires locator, parser, assembler and fingerprinting into the two
//! operations exposed at the boundary: environment and raw.

use std::sync::Arc;

use crate::assembler::EnvironmentAssembler;
use crate::backend::{self, RepositoryBackend};
use crate::config::Config;
use crate::error::Result;
use crate::fingerprint::Fingerprint;
use crate::locator::SourceLocator;
use crate::model::{Environment, RawResource};
use crate::parser::PropertySourceParser;
use crate::raw::RawResourceResolver;
use crate::request::{EnvironmentRequest, RawRequest};

/// Outcome of a conditional environment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conditional {
    /// Content differs from what the client holds.
    Modified { environment: Environment, fingerprint: Fingerprint },
    /// The client's fingerprint is current; no body is produced.
    NotModified { fingerprint: Fingerprint },
}

impl Conditional {
    pub fn fingerprint(&self) -> &Fingerprint {
        match self {
            Self::Modified { fingerprint, .. } | Self::NotModified { fingerprint } => fingerprint,
        }
    }
}

/// Serves environments and raw resources from one repository.
pub struct ConfigService {
    locator: SourceLocator,
    assembler: EnvironmentAssembler,
    raw: RawResourceResolver,
    default_label: String,
}

impl ConfigService {
    pub fn new(backend: Arc<dyn RepositoryBackend>, uri: &str, config: &Config) -> Self {
        Self {
            locator: SourceLocator::new(
                backend.clone(),
                uri,
                config.repository.search_paths.clone(),
                config.environment.shared_application.clone(),
            ),
            assembler: EnvironmentAssembler::new(config.overrides()),
            raw: RawResourceResolver::new(backend, uri, config.repository.search_paths.clone()),
            default_label: config.repository.default_label.clone(),
        }
    }

    /// Build the service and backend described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let Some(uri) = config.repository.uri.as_deref() else {
            anyhow::bail!("no repository configured: set repository.uri or pass --repo");
        };
        Ok(Self::new(backend::from_config(&config.repository), uri, config))
    }

    /// Label a request resolves against.
    pub fn label<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.default_label)
    }

    /// Resolve, parse and assemble one environment.
    pub fn environment(&self, request: &EnvironmentRequest) -> Result<Environment> {
        let label = self.label(request.label.as_deref());
        let located = self.locator.locate(&request.application, &request.profiles, label)?;
        let parsed = PropertySourceParser::parse_all(&located.sources, &request.profiles)?;

        let environment = self.assembler.assemble(
            &request.application,
            &request.profiles,
            label,
            located.snapshot.version,
            parsed,
        );
        tracing::debug!(
            application = %request.application,
            profiles = ?request.profiles,
            label,
            sources = environment.property_sources.len(),
            "assembled environment"
        );
        Ok(environment)
    }

    /// Like [`environment`](Self::environment), short-circuiting when the
    /// client already holds the current fingerprint.
    pub fn environment_if_none_match(
        &self,
        request: &EnvironmentRequest,
        if_none_match: Option<&str>,
    ) -> Result<Conditional> {
        let environment = self.environment(request)?;
        let fingerprint = Fingerprint::of(&environment)?;

        if if_none_match.is_some_and(|header| fingerprint.matches(header)) {
            tracing::debug!(application = %request.application, %fingerprint, "not modified");
            return Ok(Conditional::NotModified { fingerprint });
        }
        Ok(Conditional::Modified { environment, fingerprint })
    }

    /// Exact bytes of one file.
    pub fn raw(&self, request: &RawRequest) -> Result<RawResource> {
        let label = self.label(request.label.as_deref());
        self.raw.resolve_raw(&request.application, &request.profile, label, &request.path)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
