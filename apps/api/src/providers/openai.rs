//! Provider B: OpenAI chat completions. Single endpoint, header auth only,
//! fixed model. Failures propagate directly; there is no model list to fall
//! back across.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::providers::{CompletionBackend, ProviderError};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-4";
const SYSTEM_MESSAGE: &str =
    "You are an HR specialist who analyzes resumes and compares them against job descriptions.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: Option<String>,
    api_url: String,
}

impl OpenAiClient {
    pub fn new(http: Client, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key,
            api_url: OPENAI_API_URL.to_string(),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredential("openai".to_string()))?;

        let body = ChatRequest {
            model: OPENAI_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.7,
        };

        debug!("openai attempt: model={OPENAI_MODEL}");
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_credential_fails_before_any_attempt() {
        let client = OpenAiClient::new(Client::new(), None);
        let err = client.complete("prompt").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential(p) if p == "openai"));
    }

    #[test]
    fn request_body_matches_chat_completions_wire_shape() {
        let body = ChatRequest {
            model: OPENAI_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.7,
        };
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(encoded["model"], "gpt-4");
        assert_eq!(encoded["messages"][0]["role"], "user");
        assert_eq!(encoded["temperature"], 0.7);
    }
}
