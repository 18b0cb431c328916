use anyhow::Result;

use super::super::args::CheckCommand;
use super::{CheckSummary, CommandResult, CommandSummary, context::ProjectContext};
use crate::core::SyncOptions;

/// Extract and reconcile in memory. Nothing is translated or written.
pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.args.common)?;
    let translation = &ctx.config.translation;

    let extracted = ctx.extract();
    let mut session = ctx.open_session(SyncOptions {
        placeholder_style: ctx.config.placeholder_style,
        translate_back: translation.translate_back,
        failure_sentinel: translation.failure_sentinel.clone(),
    })?;
    session.materialize(&extracted.keys);

    let summary = CheckSummary {
        base_locale: session.base().locale.clone(),
        missing_from_code: session.placeholders().to_vec(),
        conflicts: session.conflicts().to_vec(),
        locales: session.pending(),
    };

    Ok(CommandResult {
        summary: CommandSummary::Check(summary),
        source_files_checked: extracted.files_scanned,
        locale_files_checked: 1 + session.compares().len(),
        scan_warnings: extracted.warnings,
    })
}
