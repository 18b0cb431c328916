//! Remote translation.
//!
//! The engine only depends on the [`Translator`] contract: text in, text out,
//! with rate limiting reported as a distinct, retryable error.
//!
//! ## Module Structure
//!
//! - `gemini`: Google Generative Language API binding
//! - `pipeline`: Sequential job runner writing results into catalogs
//! - `retry`: Backoff policy and the sleep abstraction used between attempts

mod gemini;
mod pipeline;
mod retry;

pub use gemini::*;
pub use pipeline::*;
pub use retry::*;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// Provider asked us to slow down. The only retryable variant.
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("provider returned no usable text")]
    EmptyResponse,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid client configuration: {0}")]
    Client(String),
}

impl TranslateError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }
}

/// A translation backend.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError>;
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for &T {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        (**self).translate(text, source_lang, target_lang).await
    }
}
