use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::{TranslateError, Translator};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Translator backed by the Gemini `generateContent` API.
///
/// The API key is supplied by the caller; this type never reads the environment.
pub struct GeminiTranslator {
    /// Base URL without a trailing slash.
    endpoint: String,
    model: String,
    api_key: String,
    client: Client,
}

impl GeminiTranslator {
    pub fn new(
        api_key: String,
        model: &str,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TranslateError::Client(err.to_string()))?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            client,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Prompt sent to the model. The reply is used verbatim as the translation.
pub fn build_prompt(text: &str, source_lang: &str, target_lang: &str) -> String {
    format!(
        "Translate the following text from {} to {}. \
         Only respond with the translated text, nothing else. \
         Keep placeholders such as {{name}} unchanged. Text: {}",
        source_lang, target_lang, text
    )
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let body = json!({
            "contents": [{
                "parts": [{"text": build_prompt(text, source_lang, target_lang)}]
            }]
        });

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| TranslateError::Transport(err.to_string()))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                let detail = response.text().await.unwrap_or_default();
                Err(TranslateError::RateLimited(truncate(&detail, 200)))
            }
            status if status.is_success() => response
                .json::<GenerateContentResponse>()
                .await
                .map_err(|err| TranslateError::Provider(err.to_string()))?
                .into_text()
                .ok_or(TranslateError::EmptyResponse),
            status => {
                let detail = response.text().await.unwrap_or_default();
                Err(TranslateError::Provider(format!(
                    "status {}: {}",
                    status,
                    truncate(&detail, 200)
                )))
            }
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
