use anyhow::{Context as _, Result, bail};
use tracing::info;

use super::super::args::SyncCommand;
use super::{CommandResult, CommandSummary, context::ProjectContext};
use crate::{
    core::SyncOptions,
    translate::{GeminiTranslator, TranslationPipeline},
};

pub fn sync(cmd: SyncCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let ctx = ProjectContext::new(&args.common)?;

    let mut translation = ctx.config.translation.clone();
    if let Some(model) = args.model {
        translation.model = model;
    }
    if let Some(delay) = args.request_delay_ms {
        translation.request_delay_ms = delay;
    }
    if args.no_translate_back {
        translation.translate_back = false;
    }

    let extracted = ctx.extract();
    let mut session = ctx.open_session(SyncOptions {
        placeholder_style: ctx.config.placeholder_style,
        translate_back: translation.translate_back,
        failure_sentinel: translation.failure_sentinel.clone(),
    })?;
    session.materialize(&extracted.keys);

    // Checked before anything is written so a missing key leaves catalogs untouched
    let jobs = session.pending_jobs();
    let api_key = match args.api_key.filter(|key| !key.trim().is_empty()) {
        Some(key) => key,
        None if jobs == 0 => String::new(),
        None => bail!(
            "{} key(s) need translation but no API key was provided (use --api-key or GOOGLE_AI_API_KEY)",
            jobs
        ),
    };
    info!(jobs, "starting translation");

    let translator = GeminiTranslator::new(
        api_key,
        &translation.model,
        &translation.endpoint,
        translation.timeout(),
    )?;
    let pipeline = TranslationPipeline::new(translator, translation.pipeline_settings());

    let report = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?
        .block_on(session.run(&pipeline))?;

    Ok(CommandResult {
        summary: CommandSummary::Sync(report),
        source_files_checked: extracted.files_scanned,
        locale_files_checked: 1 + session.compares().len(),
        scan_warnings: extracted.warnings,
    })
}
