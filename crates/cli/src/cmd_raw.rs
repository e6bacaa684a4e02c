// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Raw command implementation.

use std::io::Write;

use confer::cli::{ExitStatus, RawArgs};
use confer::request::RawRequest;
use confer::service::ConfigService;

/// Run the raw command. File bytes are written unchanged.
pub fn run(service: &ConfigService, args: &RawArgs) -> anyhow::Result<ExitStatus> {
    let request = RawRequest::new(&args.application, &args.profile, Some(args.label.as_str()), &args.path);
    let resource = service.raw(&request)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(&resource.content)?;
    handle.flush()?;
    Ok(ExitStatus::Success)
}
