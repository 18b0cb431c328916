use super::super::exit_status::ExitStatus;
use crate::core::{Reconciliation, ScanWarning, SyncReport};

#[derive(Debug)]
pub enum CommandSummary {
    Sync(SyncReport),
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    pub base_locale: String,
    /// Keys used in code but absent from the base catalog.
    pub missing_from_code: Vec<String>,
    pub conflicts: Vec<String>,
    /// One entry per compare locale, in processing order.
    pub locales: Vec<(String, Reconciliation)>,
}

impl CheckSummary {
    pub fn missing_count(&self) -> usize {
        self.missing_from_code.len()
            + self
                .locales
                .iter()
                .map(|(_, r)| {
                    r.missing_in_compare.len() + r.missing_in_base.len() + r.stale_sentinels.len()
                })
                .sum::<usize>()
    }

    pub fn problem_count(&self) -> usize {
        self.missing_count() + self.conflicts.len()
    }
}

#[derive(Debug)]
pub struct InitSummary {
    pub config_file: String,
}

/// Result of running glot-sync commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Number of source files scanned for translation calls.
    pub source_files_checked: usize,
    /// Number of locale catalogs loaded (base included).
    pub locale_files_checked: usize,
    pub scan_warnings: Vec<ScanWarning>,
}

impl CommandResult {
    pub fn init(summary: InitSummary) -> Self {
        Self {
            summary: CommandSummary::Init(summary),
            source_files_checked: 0,
            locale_files_checked: 0,
            scan_warnings: Vec::new(),
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        let has_gaps = match &self.summary {
            CommandSummary::Sync(report) => report.is_degraded(),
            CommandSummary::Check(summary) => summary.problem_count() > 0,
            CommandSummary::Init(_) => false,
        };

        if has_gaps {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
