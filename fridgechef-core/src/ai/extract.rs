//! Ingredient extraction from fridge photos using vision AI.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::ai::client::{AiClient, AiError};
use crate::ai::invoke::{structured_call, StructuredOutput};
use crate::ai::prompts::extract_ingredients::{
    render_extract_system_prompt, render_extract_user_prompt, EXTRACT_PROMPT_NAME,
};
use crate::ai::schema;
use crate::ai::types::{ChatMessage, ImageData};

/// Single ingredient detected on a fridge photo. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetectedIngredient {
    pub name: String,
    /// Detection confidence in [0, 1].
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Structured result of the vision extraction capability. Created fresh per
/// call and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractionResult {
    pub ingredients: Vec<DetectedIngredient>,
    #[serde(default)]
    pub unsure_items: Vec<String>,
    #[serde(default)]
    pub spoiled_items: Vec<String>,
}

impl StructuredOutput for ExtractionResult {
    const NAME: &'static str = "ExtractionResult";

    fn schema() -> serde_json::Value {
        schema::closed(json!({
            "type": "object",
            "properties": {
                "ingredients": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "confidence": { "type": "number", "minimum": 0.0, "maximum": 1.0 },
                            "notes": { "type": ["string", "null"] }
                        },
                        "required": ["name", "confidence"]
                    }
                },
                "unsure_items": { "type": "array", "items": { "type": "string" } },
                "spoiled_items": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["ingredients", "unsure_items", "spoiled_items"]
        }))
    }

    fn validate(&self) -> Result<(), String> {
        for ingredient in &self.ingredients {
            if ingredient.name.trim().is_empty() {
                return Err("ingredient name must not be empty".to_string());
            }
            if !(0.0..=1.0).contains(&ingredient.confidence) {
                return Err(format!(
                    "confidence {} outside [0, 1] for '{}'",
                    ingredient.confidence, ingredient.name
                ));
            }
        }
        Ok(())
    }
}

/// Extract the edible ingredients visible on a fridge photo.
///
/// `image_base64` must be base64-encoded image bytes and `media_type` the
/// actual format of those bytes (e.g. "image/png"); it ends up in the data
/// URL the provider sees. A payload that does not decode is rejected before
/// any model call is made; detecting zero ingredients is a valid result,
/// not an error.
pub async fn extract_ingredients(
    client: &dyn AiClient,
    image_base64: &str,
    media_type: &str,
) -> Result<ExtractionResult, AiError> {
    BASE64
        .decode(image_base64)
        .map_err(|e| AiError::InvalidInput(format!("image is not valid base64: {}", e)))?;

    let image = ImageData::new(image_base64, media_type);
    let messages = vec![
        ChatMessage::system(render_extract_system_prompt()),
        ChatMessage::user_with_image(render_extract_user_prompt(), image),
    ];

    structured_call::<ExtractionResult>(client, EXTRACT_PROMPT_NAME, messages, Some(2048), Some(0.1))
        .await
}
