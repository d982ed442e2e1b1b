//! Model/transport fallback orchestration.
//!
//! Upstream LLM APIs are provisioned inconsistently per model and region and
//! return transient 404/503s when a model is deprecated or overloaded. The
//! chain walks a prioritized model list, trying both auth transports per
//! model, and short-circuits on the first success. Genuine client errors
//! (bad request, auth, quota) abort the whole chain immediately instead of
//! being masked behind further retries.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::providers::ProviderError;

/// How the credential is attached to an outbound call, independent of which
/// model is targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTransport {
    /// Credential embedded as a URL query parameter.
    QueryParam,
    /// Credential passed via a request header.
    Header,
}

/// One attempt against one model over one transport. The concrete impl is
/// the Gemini client; tests substitute scripted fakes.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    async fn attempt(
        &self,
        model: &str,
        transport: AuthTransport,
        prompt: &str,
    ) -> Result<String, ProviderError>;
}

/// Ordered list of candidate models, highest priority first. Injected at
/// construction so tests can run the chain against fake lists.
#[derive(Debug, Clone)]
pub struct FallbackChain {
    models: Vec<String>,
}

impl FallbackChain {
    pub fn new(models: Vec<String>) -> Self {
        Self { models }
    }

    /// Delivers `prompt` to the first model/transport combination that
    /// answers, or fails after exhausting every candidate.
    ///
    /// Per model: query-param transport first; on a transient failure the
    /// header transport is tried for the *same* model; a second transient
    /// failure moves on to the next model. Any non-transient failure
    /// propagates immediately without trying further models.
    pub async fn run<T: ModelTransport + ?Sized>(
        &self,
        transport: &T,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let mut last_error: Option<ProviderError> = None;

        for model in &self.models {
            match transport
                .attempt(model, AuthTransport::QueryParam, prompt)
                .await
            {
                Ok(response) => {
                    debug!("model {model} answered via query-param transport");
                    return Ok(response);
                }
                Err(err) if err.is_transient() => {
                    warn!("model {model} query-param transport failed transiently: {err}");
                }
                Err(err) => return Err(err),
            }

            match transport.attempt(model, AuthTransport::Header, prompt).await {
                Ok(response) => {
                    debug!("model {model} answered via header transport");
                    return Ok(response);
                }
                Err(err) if err.is_transient() => {
                    warn!("model {model} header transport failed transiently: {err}");
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(ProviderError::AllModelsFailed {
            models: self.models.clone(),
            last: Box::new(last_error.unwrap_or(ProviderError::Status {
                status: 503,
                message: "no models configured".to_string(),
            })),
        })
    }
}
