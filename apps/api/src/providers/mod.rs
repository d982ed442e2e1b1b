//! LLM provider clients and the fallback orchestration that drives them.
//!
//! ARCHITECTURAL RULE: no other module may call a provider API directly.
//! All LLM interactions go through a [`CompletionBackend`].

use async_trait::async_trait;
use thiserror::Error;

pub mod fallback;
pub mod gemini;
pub mod openai;

pub use fallback::{AuthTransport, FallbackChain, ModelTransport};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

/// Failure from an outbound provider call, classified by structured kind
/// rather than by error-message text.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured for provider '{0}'")]
    MissingCredential(String),

    #[error("provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("all models failed (tried: {}): last error: {last}", .models.join(", "))]
    AllModelsFailed {
        models: Vec<String>,
        last: Box<ProviderError>,
    },
}

impl ProviderError {
    /// Whether retrying elsewhere (other transport, next model) may succeed.
    ///
    /// 404 and 503 cover models that are deprecated, unprovisioned in the
    /// region, or overloaded. Everything else (bad request, auth rejection,
    /// quota) will fail the same way on every model, so it is fatal.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Status { status: 404 | 503, .. })
    }
}

/// A provider able to turn a prompt into a raw textual completion body.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Pulls the completion text out of a provider response body.
///
/// The two supported envelopes are distinguished by their top-level key:
/// Gemini nests text under `candidates[0].content.parts[0].text`, OpenAI
/// under `choices[0].message.content`. Returns `None` when the body is not
/// JSON or matches neither shape.
pub fn completion_text(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let text = if value.get("candidates").is_some() {
        value.pointer("/candidates/0/content/parts/0/text")?
    } else if value.get("choices").is_some() {
        value.pointer("/choices/0/message/content")?
    } else {
        return None;
    };
    text.as_str().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_statuses_are_404_and_503() {
        let not_found = ProviderError::Status {
            status: 404,
            message: String::new(),
        };
        let unavailable = ProviderError::Status {
            status: 503,
            message: String::new(),
        };
        let bad_request = ProviderError::Status {
            status: 400,
            message: String::new(),
        };
        let unauthorized = ProviderError::Status {
            status: 401,
            message: String::new(),
        };
        assert!(not_found.is_transient());
        assert!(unavailable.is_transient());
        assert!(!bad_request.is_transient());
        assert!(!unauthorized.is_transient());
    }

    #[test]
    fn missing_credential_is_not_transient() {
        assert!(!ProviderError::MissingCredential("gemini".to_string()).is_transient());
    }

    #[test]
    fn extracts_gemini_candidates_envelope() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"hello"}]}}]}"#;
        assert_eq!(completion_text(body).as_deref(), Some("hello"));
    }

    #[test]
    fn extracts_openai_choices_envelope() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#;
        assert_eq!(completion_text(body).as_deref(), Some("hi"));
    }

    #[test]
    fn unknown_envelope_yields_none() {
        assert_eq!(completion_text(r#"{"output":"x"}"#), None);
        assert_eq!(completion_text("not json at all"), None);
    }

    #[test]
    fn empty_candidates_array_yields_none() {
        assert_eq!(completion_text(r#"{"candidates":[]}"#), None);
    }
}
