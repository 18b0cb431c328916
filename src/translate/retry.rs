use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

/// Bounded exponential backoff for rate-limited requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per job, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Upper bound (inclusive) of the random jitter added to each backoff.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10_000),
            max_jitter: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// `min(base_delay * 2^attempt + jitter, max_delay)`. `attempt` is zero-based.
    pub fn backoff(&self, attempt: u32, jitter: Duration) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .saturating_mul(factor)
            .saturating_add(jitter)
            .min(self.max_delay)
    }

    pub fn random_jitter(&self) -> Duration {
        let max_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
    }

    /// Whether another attempt is allowed after the zero-based `attempt` failed.
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts.max(1)
    }
}

/// Waits between requests. Tests swap in a recorder so no real time passes.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[async_trait]
impl<S: Sleeper + ?Sized> Sleeper for &S {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
