use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, init::init, sync::sync},
};

/// Dispatch to the command handler.
///
/// # Returns
/// - `Ok(CommandResult)` with the summary to print and the exit status to use
/// - `Err` if the command could not run (config, catalog, API key or I/O failure)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
