//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `sync`: Add placeholders, translate every gap, write all catalogs
//! - `check`: Report what `sync` would do, without network access or writes
//! - `init`: Write a default `.glotsyncrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Sync(cmd)) => cmd.args.common.verbose,
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by `sync` and `check`.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Primary locale (overrides config file)
    #[arg(long)]
    pub primary_locale: Option<String>,

    /// Compare locale, repeatable (overrides config file; default: every other locale file)
    #[arg(long = "locale", value_name = "LOCALE")]
    pub compare_locales: Vec<String>,

    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Messages directory path (overrides config file)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct SyncArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Translation provider API key
    #[arg(long, env = "GOOGLE_AI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name (overrides config file)
    #[arg(long)]
    pub model: Option<String>,

    /// Do not translate keys found only in a compare catalog back into the primary locale
    #[arg(long)]
    pub no_translate_back: bool,

    /// Pause between translation requests in milliseconds (overrides config file)
    #[arg(long, value_name = "MS")]
    pub request_delay_ms: Option<u64>,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub args: SyncArgs,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add placeholders for keys used in code, translate missing keys, and save every catalog
    Sync(SyncCommand),
    /// Report missing keys and conflicts without translating or writing anything
    Check(CheckCommand),
    /// Initialize a new .glotsyncrc.json configuration file
    Init,
}
