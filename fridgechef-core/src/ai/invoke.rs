//! Schema-constrained model invocation.
//!
//! One place turns a result type into a provider-facing structured-output
//! contract, issues the single model call, and checks the raw completion
//! against that same type. Centralizing this keeps the shape the model is
//! told to produce and the shape the caller receives from drifting apart.

use serde::de::DeserializeOwned;

use super::client::{AiClient, AiError};
use super::types::{ChatMessage, ChatRequest, ResponseSchema};

/// A result type the model can be constrained to.
///
/// `schema()` must return the already-closed JSON Schema (see
/// [`super::schema::closed`]); `validate` checks the field constraints the
/// schema cannot express to every provider (ranges, non-emptiness).
pub(crate) trait StructuredOutput: DeserializeOwned {
    /// Schema name reported to the provider.
    const NAME: &'static str;

    fn schema() -> serde_json::Value;

    fn validate(&self) -> Result<(), String>;
}

/// Issue exactly one completion call constrained to `T`'s schema, then
/// parse and validate the response.
///
/// Parse and validation failures are hard errors; this layer never retries.
pub(crate) async fn structured_call<T: StructuredOutput>(
    client: &dyn AiClient,
    prompt_name: &str,
    messages: Vec<ChatMessage>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
) -> Result<T, AiError> {
    let request = ChatRequest {
        messages,
        max_tokens,
        temperature,
        response_schema: Some(ResponseSchema {
            name: T::NAME,
            schema: T::schema(),
        }),
    };

    let response = client.complete(prompt_name, request).await?;

    let parsed: T = serde_json::from_str(&response.content).map_err(|e| {
        AiError::SchemaViolation(format!("failed to parse {} response: {}", T::NAME, e))
    })?;

    parsed
        .validate()
        .map_err(|e| AiError::SchemaViolation(format!("{}: {}", T::NAME, e)))?;

    Ok(parsed)
}
