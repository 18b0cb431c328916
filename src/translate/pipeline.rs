use std::time::Duration;

use tracing::{error, info, warn};

use super::{RetryPolicy, Sleeper, TokioSleeper, TranslateError, Translator};
use crate::core::catalog::Catalog;

pub const DEFAULT_FAILURE_SENTINEL: &str = "[translation failed]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub retry: RetryPolicy,
    /// Pause between two consecutive provider requests.
    pub request_delay: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            request_delay: Duration::from_millis(1000),
        }
    }
}

/// Result of translating one batch of keys from one locale into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionReport {
    pub source_locale: String,
    pub target_locale: String,
    pub translated: Vec<String>,
    /// Source value absent, blank or not a string. No request was made.
    pub skipped: Vec<String>,
    /// Sentinel written after a non-retryable error or exhausted retries.
    pub failed: Vec<String>,
}

impl DirectionReport {
    pub fn new(source_locale: &str, target_locale: &str) -> Self {
        Self {
            source_locale: source_locale.to_string(),
            target_locale: target_locale.to_string(),
            ..Default::default()
        }
    }

    pub fn requested(&self) -> usize {
        self.translated.len() + self.skipped.len() + self.failed.len()
    }

    pub fn is_degraded(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Runs translation jobs one at a time against a [`Translator`].
///
/// Jobs are strictly sequential: the provider's rate limit is the bottleneck,
/// and `request_delay` is only meaningful between consecutive requests.
pub struct TranslationPipeline<T, S = TokioSleeper> {
    translator: T,
    sleeper: S,
    settings: PipelineSettings,
}

impl<T: Translator> TranslationPipeline<T, TokioSleeper> {
    pub fn new(translator: T, settings: PipelineSettings) -> Self {
        Self::with_sleeper(translator, TokioSleeper, settings)
    }
}

impl<T: Translator, S: Sleeper> TranslationPipeline<T, S> {
    pub fn with_sleeper(translator: T, sleeper: S, settings: PipelineSettings) -> Self {
        Self {
            translator,
            sleeper,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Translate `keys` from `source` into `target`, writing each result at the
    /// same dotted key. Failed jobs leave `failure_sentinel` in their place.
    pub async fn run(
        &self,
        keys: &[String],
        source: &Catalog,
        source_locale: &str,
        target: &mut Catalog,
        target_locale: &str,
        failure_sentinel: &str,
    ) -> DirectionReport {
        let mut report = DirectionReport::new(source_locale, target_locale);
        if keys.is_empty() {
            return report;
        }

        info!(
            count = keys.len(),
            from = source_locale,
            to = target_locale,
            "translating missing keys"
        );

        let mut requested_before = false;
        for key in keys {
            let Some(text) = source.get_text(key) else {
                warn!(%key, locale = source_locale, "skipping key: source value is not a non-empty string");
                report.skipped.push(key.clone());
                continue;
            };

            if requested_before && !self.settings.request_delay.is_zero() {
                self.sleeper.sleep(self.settings.request_delay).await;
            }
            requested_before = true;

            match self.translate_with_retry(text, source_locale, target_locale).await {
                Ok(translated) => {
                    info!(%key, value = %translated, "translated");
                    target.set(key, translated);
                    report.translated.push(key.clone());
                }
                Err(err) => {
                    error!(%key, error = %err, "failed to translate");
                    target.set(key, failure_sentinel);
                    report.failed.push(key.clone());
                }
            }
        }

        report
    }

    /// One job: retry only on rate limiting, with capped exponential backoff.
    pub async fn translate_with_retry(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let policy = &self.settings.retry;
        let mut attempt = 0;

        loop {
            let err = match self
                .translator
                .translate(text, source_lang, target_lang)
                .await
            {
                Ok(translated) => {
                    let translated = translated.trim();
                    if translated.is_empty() {
                        return Err(TranslateError::EmptyResponse);
                    }
                    return Ok(translated.to_string());
                }
                Err(err) => err,
            };

            if !err.is_retryable() || !policy.has_attempts_left(attempt) {
                if err.is_retryable() {
                    warn!(attempts = attempt + 1, "giving up after repeated rate limiting");
                }
                return Err(err);
            }

            let delay = policy.backoff(attempt, policy.random_jitter());
            info!(
                attempt = attempt + 1,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "rate limited, retrying"
            );
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }
}
