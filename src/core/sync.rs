//! One synchronization run over a base catalog and its compare catalogs.
//!
//! The session owns every catalog for the duration of the run. It:
//!
//! 1. Materializes placeholders for code keys missing from the base catalog
//! 2. Per compare locale, in order: translates base -> compare, then (optionally)
//!    compare -> base, diffing against the base as updated so far
//! 3. Saves every catalog, whether or not jobs failed
//!
//! Step 2 is the only one that talks to the network. Callers can inspect
//! [`SyncSession::pending_jobs`] between steps 1 and 2.

use std::collections::BTreeSet;

use tracing::{info, warn};

use super::{
    catalog::{CatalogError, LocaleCatalog},
    reconcile::{
        PlaceholderStyle, Reconciliation, diff_catalogs, materialize_code_keys, stale_sentinels,
    },
};
use crate::translate::{DirectionReport, Sleeper, TranslationPipeline, Translator};

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub placeholder_style: PlaceholderStyle,
    /// Also translate keys found only in a compare catalog back into the base.
    pub translate_back: bool,
    /// Written for failed jobs, and treated as absent when diffing.
    pub failure_sentinel: String,
}

/// Outcome for one compare locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleReport {
    pub locale: String,
    pub missing_in_compare: usize,
    pub missing_in_base: usize,
    pub to_compare: DirectionReport,
    pub to_base: Option<DirectionReport>,
    /// Failure sentinels left after the run that no job could replace.
    pub stale_sentinels: Vec<String>,
}

impl LocaleReport {
    fn directions(&self) -> impl Iterator<Item = &DirectionReport> {
        std::iter::once(&self.to_compare).chain(self.to_base.as_ref())
    }

    pub fn translated(&self) -> usize {
        self.directions().map(|d| d.translated.len()).sum()
    }

    pub fn skipped(&self) -> usize {
        self.directions().map(|d| d.skipped.len()).sum()
    }

    pub fn failed(&self) -> usize {
        self.directions().map(|d| d.failed.len()).sum()
    }

    /// Keys still missing after the run because reverse translation is off.
    pub fn untranslated(&self) -> usize {
        if self.to_base.is_none() {
            self.missing_in_base
        } else {
            0
        }
    }
}

/// Summary of a whole run.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub base_locale: String,
    pub placeholders: Vec<String>,
    pub conflicts: Vec<String>,
    pub locales: Vec<LocaleReport>,
}

impl SyncReport {
    /// Keys that were missing somewhere before the run.
    pub fn missing_before(&self) -> usize {
        self.placeholders.len()
            + self
                .locales
                .iter()
                .map(|l| l.missing_in_compare + l.missing_in_base)
                .sum::<usize>()
    }

    pub fn translated(&self) -> usize {
        self.locales.iter().map(LocaleReport::translated).sum()
    }

    pub fn skipped(&self) -> usize {
        self.locales.iter().map(LocaleReport::skipped).sum()
    }

    pub fn failed(&self) -> usize {
        self.locales.iter().map(LocaleReport::failed).sum()
    }

    /// Gaps left after the run: failures, skipped jobs, conflicts, untranslated
    /// keys and stale sentinels.
    pub fn unresolved(&self) -> usize {
        self.failed()
            + self.skipped()
            + self.conflicts.len()
            + self
                .locales
                .iter()
                .map(|l| l.untranslated() + l.stale_sentinels.len())
                .sum::<usize>()
    }

    pub fn is_degraded(&self) -> bool {
        self.unresolved() > 0
    }
}

pub struct SyncSession {
    base: LocaleCatalog,
    compares: Vec<LocaleCatalog>,
    options: SyncOptions,
    placeholders: Vec<String>,
    conflicts: Vec<String>,
}

impl SyncSession {
    pub fn new(base: LocaleCatalog, compares: Vec<LocaleCatalog>, options: SyncOptions) -> Self {
        Self {
            base,
            compares,
            options,
            placeholders: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    pub fn base(&self) -> &LocaleCatalog {
        &self.base
    }

    pub fn compares(&self) -> &[LocaleCatalog] {
        &self.compares
    }

    /// Keys that received a placeholder in the base catalog.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Code keys naming a namespace object in the base catalog.
    pub fn conflicts(&self) -> &[String] {
        &self.conflicts
    }

    /// Add placeholders for code keys the base catalog lacks.
    pub fn materialize(&mut self, extracted: &BTreeSet<String>) {
        let materialized =
            materialize_code_keys(extracted, &mut self.base.catalog, self.options.placeholder_style);
        if !materialized.added.is_empty() {
            info!(
                count = materialized.added.len(),
                locale = %self.base.locale,
                "added placeholders for keys used in code"
            );
        }
        self.placeholders.extend(materialized.added);
        self.conflicts.extend(materialized.conflicts);
    }

    /// Current reconciliation against every compare catalog, without translating.
    pub fn pending(&self) -> Vec<(String, Reconciliation)> {
        self.compares
            .iter()
            .map(|compare| {
                let (missing_in_compare, missing_in_base) = diff_catalogs(
                    &self.base.catalog,
                    &compare.catalog,
                    &self.options.failure_sentinel,
                );
                let reconciliation = Reconciliation {
                    missing_in_base_from_code: self.placeholders.clone(),
                    missing_in_compare,
                    missing_in_base,
                    conflicts: self.conflicts.clone(),
                    stale_sentinels: stale_sentinels(
                        &self.base.catalog,
                        &compare.catalog,
                        &self.options.failure_sentinel,
                    ),
                };
                (compare.locale.clone(), reconciliation)
            })
            .collect()
    }

    /// Number of translation jobs the current state would produce.
    pub fn pending_jobs(&self) -> usize {
        self.pending()
            .iter()
            .map(|(_, r)| {
                r.missing_in_compare.len()
                    + if self.options.translate_back {
                        r.missing_in_base.len()
                    } else {
                        0
                    }
            })
            .sum()
    }

    /// Translate every gap, compare locale by compare locale.
    pub async fn translate<T: Translator, S: Sleeper>(
        &mut self,
        pipeline: &TranslationPipeline<T, S>,
    ) -> Vec<LocaleReport> {
        let mut reports = Vec::with_capacity(self.compares.len());

        for compare in &mut self.compares {
            let (missing_in_compare, missing_in_base) = diff_catalogs(
                &self.base.catalog,
                &compare.catalog,
                &self.options.failure_sentinel,
            );

            let to_compare = pipeline
                .run(
                    &missing_in_compare,
                    &self.base.catalog,
                    &self.base.locale,
                    &mut compare.catalog,
                    &compare.locale,
                    &self.options.failure_sentinel,
                )
                .await;

            let to_base = if self.options.translate_back {
                Some(
                    pipeline
                        .run(
                            &missing_in_base,
                            &compare.catalog,
                            &compare.locale,
                            &mut self.base.catalog,
                            &self.base.locale,
                            &self.options.failure_sentinel,
                        )
                        .await,
                )
            } else {
                None
            };

            let stale = stale_sentinels(
                &self.base.catalog,
                &compare.catalog,
                &self.options.failure_sentinel,
            );
            if !stale.is_empty() {
                warn!(
                    count = stale.len(),
                    locale = %compare.locale,
                    "failure sentinels left with no source text to translate from"
                );
            }

            reports.push(LocaleReport {
                locale: compare.locale.clone(),
                missing_in_compare: missing_in_compare.len(),
                missing_in_base: missing_in_base.len(),
                to_compare,
                to_base,
                stale_sentinels: stale,
            });
        }

        reports
    }

    /// Write every catalog back to disk.
    pub fn save(&self) -> Result<(), CatalogError> {
        self.base.save()?;
        for compare in &self.compares {
            compare.save()?;
        }
        Ok(())
    }

    /// Translate in both directions and save. Call [`Self::materialize`] first.
    pub async fn run<T: Translator, S: Sleeper>(
        &mut self,
        pipeline: &TranslationPipeline<T, S>,
    ) -> Result<SyncReport, CatalogError> {
        let locales = self.translate(pipeline).await;
        self.save()?;

        Ok(SyncReport {
            base_locale: self.base.locale.clone(),
            placeholders: self.placeholders.clone(),
            conflicts: self.conflicts.clone(),
            locales,
        })
    }
}
