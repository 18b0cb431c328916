//! Diagnostic logging.
//!
//! Engine events go through `tracing` to stderr. Command summaries are printed
//! separately to stdout by the report module, so piping stdout never mixes the two.

use std::{
    env,
    io::{self, IsTerminal},
};

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `glot_sync=debug`.
pub const LOG_ENV_VAR: &str = "GLOT_SYNC_LOG";

/// Filter used when `GLOT_SYNC_LOG` is unset or invalid.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    let ansi = io::stderr().is_terminal() && env::var_os("NO_COLOR").is_none();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
}
