//! Provider A: Google Gemini. Multi-model, two auth transports per model,
//! driven by the fallback chain.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::providers::{
    AuthTransport, CompletionBackend, FallbackChain, ModelTransport, ProviderError,
};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Candidate models in priority order: stable versions first, then previews,
/// then alternatives. Availability differs per key and region, which is what
/// the fallback chain exists to absorb.
pub const DEFAULT_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.0-flash",
    "gemini-2.5-flash-preview-05-20",
    "gemini-2.5-pro",
    "gemini-2.5-pro-preview-03-25",
    "gemini-2.0-flash-exp",
];

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    chain: FallbackChain,
    base_url: String,
}

impl GeminiClient {
    pub fn new(http: Client, api_key: Option<String>) -> Self {
        Self::with_models(
            http,
            api_key,
            DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        )
    }

    pub fn with_models(http: Client, api_key: Option<String>, models: Vec<String>) -> Self {
        Self {
            http,
            api_key,
            chain: FallbackChain::new(models),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    fn key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredential("gemini".to_string()))
    }
}

#[async_trait]
impl ModelTransport for GeminiClient {
    async fn attempt(
        &self,
        model: &str,
        transport: AuthTransport,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let key = self.key()?;
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        let url = format!("{}/{model}:generateContent", self.base_url);
        let request = match transport {
            AuthTransport::QueryParam => self.http.post(&url).query(&[("key", key)]),
            AuthTransport::Header => self.http.post(&url).header("x-goog-api-key", key),
        };

        debug!("gemini attempt: model={model}, transport={transport:?}");
        let response = request.json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Keep the upstream error body: it names the actual reason
            // (quota, unknown model, malformed request) in its JSON payload.
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl CompletionBackend for GeminiClient {
    /// Fails fast with a configuration error before any network attempt when
    /// no credential is configured; otherwise runs the fallback chain.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.key()?;
        self.chain.run(self, prompt).await
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the
/// raw body when it is not the expected JSON shape.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}
