//! AI client implementation using OpenRouter (OpenAI-compatible API).

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageUrlArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::config::AiConfig;
use super::types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};

#[derive(Error, Debug)]
pub enum AiError {
    /// The caller's input failed validation before any model call was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The transport failed: network error, timeout, auth, rate limit.
    /// The cause text is carried opaquely; status codes are not interpreted.
    #[error("AI service failure: {0}")]
    Api(String),

    /// The model's output did not parse as JSON or violated the target schema.
    #[error("Model output violated the expected schema: {0}")]
    SchemaViolation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

/// Trait for AI clients.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Complete a chat request. Exactly one outbound call per invocation;
    /// any retry policy lives below this trait, never above it.
    ///
    /// The `prompt_name` identifies the capability for logging.
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError>;
}

/// AI client with rate limiting and a per-call deadline, using OpenRouter.
pub struct OpenRouterClient {
    client: Client<OpenAIConfig>,
    config: AiConfig,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl OpenRouterClient {
    /// Create a new client from environment configuration.
    pub fn from_env() -> Result<Self, AiError> {
        let config = AiConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Create a new client with the given configuration.
    pub fn new(config: AiConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            config,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Apply rate limiting between requests.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            let min_interval = Duration::from_millis(self.config.rate_limit_ms);

            if elapsed < min_interval {
                tokio::time::sleep(min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// Convert our ChatMessage to async-openai's format.
    fn to_openai_message(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, AiError> {
        match msg.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::Api(format!("Failed to build system message: {}", e))),
            Role::User if msg.images.is_empty() => ChatCompletionRequestUserMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::Api(format!("Failed to build user message: {}", e))),
            Role::User => {
                let mut parts: Vec<ChatCompletionRequestUserMessageContentPart> = Vec::new();

                parts.push(
                    ChatCompletionRequestMessageContentPartTextArgs::default()
                        .text(msg.content.clone())
                        .build()
                        .map(Into::into)
                        .map_err(|e| AiError::Api(format!("Failed to build text part: {}", e)))?,
                );

                for image in &msg.images {
                    let image_url = ImageUrlArgs::default()
                        .url(image.to_data_url())
                        .build()
                        .map_err(|e| AiError::Api(format!("Failed to build image url: {}", e)))?;

                    parts.push(
                        ChatCompletionRequestMessageContentPartImageArgs::default()
                            .image_url(image_url)
                            .build()
                            .map(Into::into)
                            .map_err(|e| {
                                AiError::Api(format!("Failed to build image part: {}", e))
                            })?,
                    );
                }

                ChatCompletionRequestUserMessageArgs::default()
                    .content(parts)
                    .build()
                    .map(Into::into)
                    .map_err(|e| AiError::Api(format!("Failed to build user message: {}", e)))
            }
        }
    }
}

#[async_trait]
impl AiClient for OpenRouterClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        self.rate_limit().await;

        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(Self::to_openai_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut req_builder = CreateChatCompletionRequestArgs::default();
        req_builder.model(&self.config.model).messages(messages);

        if let Some(max_tokens) = request.max_tokens {
            req_builder.max_completion_tokens(max_tokens);
        }

        if let Some(temperature) = request.temperature {
            req_builder.temperature(temperature);
        }

        if let Some(response_schema) = &request.response_schema {
            req_builder.response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: response_schema.name.to_string(),
                    description: None,
                    schema: Some(response_schema.schema.clone()),
                    // Not every OpenAI-compatible gateway supports strict mode.
                    strict: Some(false),
                },
            });
        }

        let openai_request = req_builder
            .build()
            .map_err(|e| AiError::Api(e.to_string()))?;

        tracing::debug!(
            prompt_name = prompt_name,
            model = &self.config.model,
            "Calling AI API"
        );

        let deadline = Duration::from_secs(self.config.timeout_secs);
        let response = tokio::time::timeout(deadline, self.client.chat().create(openai_request))
            .await
            .map_err(|_| {
                AiError::Api(format!(
                    "request timed out after {}s",
                    self.config.timeout_secs
                ))
            })?
            .map_err(|e| AiError::Api(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(ChatResponse { content, usage })
    }
}

/// Scripted completion for [`MockAiClient`].
#[derive(Clone)]
pub enum MockCompletion {
    /// Return this body as the completion content.
    Json(String),
    /// Fail the call with an API error.
    Error(String),
}

/// Mock AI client for testing. Responses are consumed in order; every
/// request is recorded so tests can assert on what was sent to the model.
#[derive(Default)]
pub struct MockAiClient {
    responses: std::sync::Mutex<VecDeque<MockCompletion>>,
    requests: std::sync::Mutex<Vec<(String, ChatRequest)>>,
}

impl MockAiClient {
    /// Create a new mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON completion.
    pub fn with_json(self, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockCompletion::Json(body.to_string()));
        self
    }

    /// Queue an API failure.
    pub fn with_error(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockCompletion::Error(message.to_string()));
        self
    }

    /// Number of completion calls made so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// All recorded (prompt_name, request) pairs, in call order.
    pub fn requests(&self) -> Vec<(String, ChatRequest)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiClient for MockAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        self.requests
            .lock()
            .unwrap()
            .push((prompt_name.to_string(), request));

        match self.responses.lock().unwrap().pop_front() {
            Some(MockCompletion::Json(body)) => Ok(ChatResponse {
                content: body,
                usage: Usage::default(),
            }),
            Some(MockCompletion::Error(message)) => Err(AiError::Api(message)),
            None => Err(AiError::Api(format!(
                "no scripted response for prompt '{}'",
                prompt_name
            ))),
        }
    }
}
