// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Env command implementation.

use std::io::Write;

use confer::cli::{EnvArgs, ExitStatus};
use confer::render;
use confer::request::EnvironmentRequest;
use confer::service::{Conditional, ConfigService};

/// Run the env command.
///
/// The body goes to stdout and the fingerprint to stderr as an `ETag:` line.
pub fn run(service: &ConfigService, args: &EnvArgs) -> anyhow::Result<ExitStatus> {
    let request = EnvironmentRequest::new(&args.application, &args.profiles, args.label.as_deref());

    match service.environment_if_none_match(&request, args.if_none_match.as_deref())? {
        Conditional::NotModified { fingerprint } => {
            eprintln!("ETag: {}", fingerprint.etag());
            Ok(ExitStatus::NotModified)
        }
        Conditional::Modified { environment, fingerprint } => {
            let body = render::format_environment(args.format, &environment)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(body.as_bytes())?;
            if !body.ends_with('\n') {
                writeln!(handle)?;
            }
            handle.flush()?;
            eprintln!("ETag: {}", fingerprint.etag());
            Ok(ExitStatus::Success)
        }
    }
}
