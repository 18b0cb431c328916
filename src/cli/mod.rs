//! Command-line interface layer.
//!
//! Parses arguments, runs one command and prints its summary. Library users
//! can skip this module entirely and drive [`crate::core::SyncSession`] directly.

use std::process::ExitCode;

use anyhow::Result;

mod args;
pub mod commands;
mod exit_status;
mod report;
mod run;

pub use args::*;
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    crate::logging::init(verbose);

    let result = run::run(args)?;
    report::print(&result, verbose);

    Ok(result.exit_status().into())
}
