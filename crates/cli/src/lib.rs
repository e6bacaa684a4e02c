// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Versioned, profile-aware configuration serving.
//!
//! A [`service::ConfigService`] resolves `(application, profiles, label)`
//! against a repository backend into an [`model::Environment`]: an ordered
//! list of property sources, overrides first. Single files can be served
//! verbatim through the same backend.

pub mod assembler;
pub mod backend;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod fingerprint;
pub mod format;
pub mod locator;
pub mod model;
pub mod parser;
pub mod raw;
pub mod render;
pub mod request;
pub mod service;

#[cfg(test)]
mod test_utils;
