//! AI configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default OpenRouter base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Default per-call deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default rate limit between requests in milliseconds.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 500;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// AI client configuration. All knobs are fixed at construction; the rest of
/// the pipeline never reconfigures the transport.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for the provider.
    pub api_key: String,
    /// Model name (e.g., "openai/gpt-4o-mini").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Deadline for a single completion call, in seconds.
    pub timeout_secs: u64,
    /// Milliseconds to wait between requests.
    pub rate_limit_ms: u64,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENROUTER_API_KEY`: API key for the provider
    ///
    /// Optional:
    /// - `FRIDGECHEF_AI_MODEL`: Model name (default: "openai/gpt-4o-mini")
    /// - `FRIDGECHEF_AI_BASE_URL`: API base URL (default: OpenRouter)
    /// - `FRIDGECHEF_AI_TIMEOUT_SECS`: Per-call deadline (default: 60)
    /// - `FRIDGECHEF_AI_RATE_LIMIT_MS`: Rate limit in ms (default: 500)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let model = env::var("FRIDGECHEF_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("FRIDGECHEF_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("FRIDGECHEF_AI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let rate_limit_ms = env::var("FRIDGECHEF_AI_RATE_LIMIT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_MS);

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout_secs,
            rate_limit_ms,
        })
    }
}
