//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{ResolveError, Status};

/// Serves versioned, profile-aware configuration from a git repository
#[derive(Parser)]
#[command(name = "confer")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "CONFER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Repository uri, overriding repository.uri from the config
    #[arg(long, global = true, env = "CONFER_REPO", value_name = "URI")]
    pub repo: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve the merged environment for an application
    Env(EnvArgs),
    /// Print one file verbatim
    Raw(RawArgs),
}

#[derive(clap::Args)]
pub struct EnvArgs {
    /// Application name
    pub application: String,

    /// Comma-separated profiles
    #[arg(default_value = "default")]
    pub profiles: String,

    /// Branch, tag or commit (default: repository.default_label)
    pub label: Option<String>,

    /// Output representation
    #[arg(short, long, default_value = "v2")]
    pub format: Representation,

    /// Fingerprint from a previous response; exit 3 if unchanged
    #[arg(long, value_name = "ETAG")]
    pub if_none_match: Option<String>,
}

#[derive(clap::Args)]
pub struct RawArgs {
    /// Application name
    pub application: String,

    /// Profile
    pub profile: String,

    /// Branch, tag or commit
    pub label: String,

    /// Repository-relative file path
    pub path: String,
}

/// Environment output representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Representation {
    /// Source list with plain values
    V1,
    /// Source list with values and origins
    #[default]
    V2,
    /// Merged view as YAML
    Yaml,
    /// Merged view as properties
    Properties,
}

/// Process exit status. Usage errors exit 2 through clap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    ServerError,
    NotModified,
    NotFound,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::ServerError => 1,
            Self::NotModified => 3,
            Self::NotFound => 4,
        }
    }

    /// Classify a command failure.
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ResolveError>().map(ResolveError::status) {
            Some(Status::NotFound) => Self::NotFound,
            _ => Self::ServerError,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        Self::from(status.code())
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
