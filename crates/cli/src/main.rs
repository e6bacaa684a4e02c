// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use confer::cli::{Cli, Command, ExitStatus};
use confer::config::{self, Config};
use confer::discovery::{self, ConfigLocation};
use confer::service::ConfigService;

mod cmd_env;
mod cmd_raw;

fn init_logging(verbose: bool) {
    let default = if verbose { "confer=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let location = match &cli.config {
        Some(path) => Some(ConfigLocation::explicit(path)),
        None => {
            let cwd = std::env::current_dir().context("failed to read working directory")?;
            discovery::discover(&cwd)
        }
    };
    let mut config = match location {
        Some(location) => {
            tracing::debug!("using config {}", location.file.display());
            config::load(&location)?
        }
        None => Config::default(),
    };
    if let Some(repo) = &cli.repo {
        config.repository.uri = Some(repo.clone());
    }
    Ok(config)
}

fn run(cli: &Cli) -> anyhow::Result<ExitStatus> {
    let config = load_config(cli)?;
    let service = ConfigService::from_config(&config)?;

    match &cli.command {
        Command::Env(args) => cmd_env::run(&service, args),
        Command::Raw(args) => cmd_raw::run(&service, args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitStatus::from_error(&err).into()
        }
    }
}
