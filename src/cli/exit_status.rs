use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Catalogs are (or were brought) in sync
/// - `Failure` (1): Gaps remain: failed or skipped translations, conflicts, missing keys
/// - `Error` (2): Nothing was synchronized (config, catalog or API key error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
