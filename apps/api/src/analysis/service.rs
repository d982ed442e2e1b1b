use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::analysis::extract::extract_json;
use crate::analysis::normalize::normalize;
use crate::analysis::prompt::build_prompt;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::models::job::JobDescription;
use crate::providers::{completion_text, CompletionBackend, GeminiClient, OpenAiClient};

/// One analysis invocation. Constructed once per call, never mutated.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job: JobDescription,
}

/// Top-level entry point of the analysis core.
///
/// Holds one backend per known provider name; the active provider is a single
/// configuration value resolved on every call, so an unknown name surfaces as
/// a validation error rather than a silent default.
#[derive(Clone)]
pub struct AnalysisService {
    provider: String,
    backends: HashMap<String, Arc<dyn CompletionBackend>>,
}

impl AnalysisService {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs))
            .build()?;

        let mut backends: HashMap<String, Arc<dyn CompletionBackend>> = HashMap::new();
        backends.insert(
            "gemini".to_string(),
            Arc::new(GeminiClient::new(http.clone(), config.gemini_api_key.clone())),
        );
        backends.insert(
            "openai".to_string(),
            Arc::new(OpenAiClient::new(http, config.openai_api_key.clone())),
        );

        Ok(Self {
            provider: config.ai_provider.clone(),
            backends,
        })
    }

    /// Builds a service backed by a single named backend. Test seam.
    #[cfg(test)]
    pub fn with_backend(provider: &str, backend: Arc<dyn CompletionBackend>) -> Self {
        let mut backends = HashMap::new();
        backends.insert(provider.to_string(), backend);
        Self {
            provider: provider.to_string(),
            backends,
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Runs the full pipeline: validation, prompt, provider delivery,
    /// completion parsing, normalization.
    ///
    /// Never fails on a malformed completion: once a response was obtained,
    /// the worst outcome is a degraded result carrying the raw text. Errors
    /// are reserved for invalid input and for providers that produced no
    /// response at all.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError> {
        if request.resume_text.trim().is_empty() {
            return Err(AppError::Validation(
                "Resume text must not be empty".to_string(),
            ));
        }

        let backend = self.backends.get(&self.provider).ok_or_else(|| {
            AppError::Validation(format!("Unsupported AI provider: {}", self.provider))
        })?;

        let prompt = build_prompt(&request.resume_text, &request.job);
        let raw = backend.complete(&prompt).await?;

        debug!("provider '{}' returned {} bytes", self.provider, raw.len());
        Ok(parse_response(&raw))
    }
}

/// Parses a raw provider response body into an [`AnalysisResult`].
///
/// Any failure along the way (unrecognized envelope, no locatable JSON,
/// invalid JSON) degrades to the default result with the raw response as
/// the summary instead of erroring.
fn parse_response(raw: &str) -> AnalysisResult {
    let Some(content) = completion_text(raw) else {
        return AnalysisResult::degraded(raw);
    };

    match serde_json::from_str::<Value>(extract_json(&content)) {
        Ok(parsed) if parsed.is_object() => normalize(&parsed),
        _ => AnalysisResult::degraded(raw),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::analysis::DEFAULT_SCORE;
    use crate::providers::ProviderError;

    /// Backend returning a canned body and counting invocations.
    struct CannedBackend {
        body: String,
        calls: Mutex<u32>,
    }

    impl CannedBackend {
        fn new(body: &str) -> Arc<Self> {
            Arc::new(Self {
                body: body.to_string(),
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl CompletionBackend for CannedBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
            *self.calls.lock().unwrap() += 1;
            Ok(self.body.clone())
        }
    }

    fn gemini_body(completion: &str) -> String {
        serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": completion}]}}]
        })
        .to_string()
    }

    fn request(resume_text: &str) -> AnalysisRequest {
        AnalysisRequest {
            resume_text: resume_text.to_string(),
            job: JobDescription::default(),
        }
    }

    #[tokio::test]
    async fn empty_resume_text_fails_validation_without_backend_call() {
        let backend = CannedBackend::new("never used");
        let service = AnalysisService::with_backend("gemini", backend.clone());
        let err = service.analyze(&request("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_provider_is_a_validation_error() {
        let backend = CannedBackend::new("never used");
        let mut service = AnalysisService::with_backend("gemini", backend.clone());
        service.provider = "grok".to_string();
        let err = service.analyze(&request("resume")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("grok")));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn well_formed_completion_normalizes() {
        let completion = r#"{"compatibilityScore": 72, "summary": "Fit.", "strengths": ["Rust"], "weaknesses": [], "recommendations": [], "isSuitable": true}"#;
        let backend = CannedBackend::new(&gemini_body(completion));
        let service = AnalysisService::with_backend("gemini", backend);
        let result = service.analyze(&request("resume")).await.unwrap();
        assert_eq!(result.compatibility_score, 72.0);
        assert_eq!(result.summary, "Fit.");
        assert!(result.is_suitable);
    }

    #[tokio::test]
    async fn fenced_completion_is_extracted_and_normalized() {
        let completion = "Here you go:\n```json\n{\"compatibilityScore\": 60, \"isSuitable\": false}\n```";
        let backend = CannedBackend::new(&gemini_body(completion));
        let service = AnalysisService::with_backend("gemini", backend);
        let result = service.analyze(&request("resume")).await.unwrap();
        assert_eq!(result.compatibility_score, 60.0);
    }

    #[tokio::test]
    async fn unparseable_completion_degrades_with_raw_summary() {
        let body = gemini_body("Sorry, I cannot analyze this resume.");
        let backend = CannedBackend::new(&body);
        let service = AnalysisService::with_backend("gemini", backend);
        let result = service.analyze(&request("resume")).await.unwrap();
        assert_eq!(result.compatibility_score, DEFAULT_SCORE);
        assert_eq!(result.summary, body);
        assert!(!result.is_suitable);
        assert!(result.strengths.is_empty());
    }

    #[tokio::test]
    async fn unrecognized_envelope_degrades() {
        let backend = CannedBackend::new(r#"{"unexpected": "shape"}"#);
        let service = AnalysisService::with_backend("gemini", backend);
        let result = service.analyze(&request("resume")).await.unwrap();
        assert_eq!(result.summary, r#"{"unexpected": "shape"}"#);
        assert_eq!(result.compatibility_score, DEFAULT_SCORE);
    }

    #[tokio::test]
    async fn provider_error_propagates_as_typed_error() {
        struct FailingBackend;

        #[async_trait]
        impl CompletionBackend for FailingBackend {
            async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
                Err(ProviderError::Status {
                    status: 401,
                    message: "invalid key".to_string(),
                })
            }
        }

        let service = AnalysisService::with_backend("gemini", Arc::new(FailingBackend));
        let err = service.analyze(&request("resume")).await.unwrap_err();
        assert!(matches!(err, AppError::Provider(_)));
    }

    #[tokio::test]
    async fn missing_credential_maps_to_configuration_error() {
        struct UnconfiguredBackend;

        #[async_trait]
        impl CompletionBackend for UnconfiguredBackend {
            async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
                Err(ProviderError::MissingCredential("gemini".to_string()))
            }
        }

        let service = AnalysisService::with_backend("gemini", Arc::new(UnconfiguredBackend));
        let err = service.analyze(&request("resume")).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
