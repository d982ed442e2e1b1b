use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Provider credentials are optional on purpose: a missing key only becomes an
/// error when the corresponding provider is actually selected for a call.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Active LLM provider: "gemini" or "openai".
    pub ai_provider: String,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    /// Per-attempt timeout for outbound LLM calls, in seconds.
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            ai_provider: std::env::var("AI_PROVIDER")
                .unwrap_or_else(|_| "gemini".to_string())
                .to_lowercase(),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Treats unset and blank values the same so an empty `GEMINI_API_KEY=` line
/// in a .env file does not masquerade as a configured credential.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
