//! Dish suggestions from available ingredients.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::ai::client::{AiClient, AiError};
use crate::ai::identity;
use crate::ai::invoke::{structured_call, StructuredOutput};
use crate::ai::prompts::suggest_dishes::{render_suggest_system_prompt, SUGGEST_PROMPT_NAME};
use crate::ai::schema;
use crate::ai::types::ChatMessage;

/// Expected number of dishes per call. The instruction pins this range;
/// responses outside it are logged and returned as-is, never rejected.
pub const EXPECTED_DISH_RANGE: std::ops::RangeInclusive<usize> = 3..=5;

/// Model-facing request payload, serialized as the user turn.
/// Deliberately carries no suggestion id field.
#[derive(Debug, Clone, Serialize)]
struct SuggestionRequest<'a> {
    ingredients: &'a [String],
    servings: Option<u32>,
    dietary_preferences: Option<&'a [String]>,
}

/// Dish as produced by the model, before a suggestion id is attached.
/// The model is never asked to invent identifiers.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AgentDish {
    pub(crate) title: String,
    pub(crate) short_description: String,
    pub(crate) estimated_time_minutes: u32,
    pub(crate) confidence: f32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgentDishList {
    pub(crate) dishes: Vec<AgentDish>,
}

/// Short representation of a suggested dish, with its server-issued id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DishSummary {
    /// Opaque identifier generated server-side at suggestion time.
    pub suggestion_id: String,
    pub title: String,
    pub short_description: String,
    pub estimated_time_minutes: u32,
    pub confidence: f32,
}

/// Ordered dish suggestions for one request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuggestionsResult {
    pub dishes: Vec<DishSummary>,
}

impl StructuredOutput for AgentDishList {
    const NAME: &'static str = "DishSuggestions";

    fn schema() -> serde_json::Value {
        schema::closed(json!({
            "type": "object",
            "properties": {
                "dishes": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "short_description": { "type": "string" },
                            "estimated_time_minutes": { "type": "integer", "minimum": 1 },
                            "confidence": { "type": "number", "minimum": 0.0, "maximum": 1.0 }
                        },
                        "required": [
                            "title",
                            "short_description",
                            "estimated_time_minutes",
                            "confidence"
                        ]
                    }
                }
            },
            "required": ["dishes"]
        }))
    }

    fn validate(&self) -> Result<(), String> {
        for dish in &self.dishes {
            if dish.title.trim().is_empty() {
                return Err("dish title must not be empty".to_string());
            }
            if dish.estimated_time_minutes == 0 {
                return Err(format!("'{}' has a zero-minute estimate", dish.title));
            }
            if !(0.0..=1.0).contains(&dish.confidence) {
                return Err(format!(
                    "confidence {} outside [0, 1] for '{}'",
                    dish.confidence, dish.title
                ));
            }
        }
        Ok(())
    }
}

/// Propose dishes that can be cooked from the given ingredients.
///
/// Each returned dish carries a freshly generated `suggestion_id`; calls are
/// not replay-safe, retrying produces a different set of ids.
pub async fn suggest_dishes(
    client: &dyn AiClient,
    ingredients: &[String],
    servings: Option<u32>,
    dietary_preferences: Option<&[String]>,
) -> Result<SuggestionsResult, AiError> {
    if ingredients.iter().all(|i| i.trim().is_empty()) {
        return Err(AiError::InvalidInput(
            "at least one ingredient is required".to_string(),
        ));
    }
    if servings == Some(0) {
        return Err(AiError::InvalidInput(
            "servings must be a positive integer".to_string(),
        ));
    }

    let request = SuggestionRequest {
        ingredients,
        servings,
        dietary_preferences,
    };
    let body = serde_json::to_string(&request)
        .map_err(|e| AiError::InvalidInput(format!("failed to serialize request: {}", e)))?;

    let messages = vec![
        ChatMessage::system(render_suggest_system_prompt()),
        ChatMessage::user(body),
    ];

    let list: AgentDishList =
        structured_call(client, SUGGEST_PROMPT_NAME, messages, Some(1024), Some(0.7)).await?;

    if !EXPECTED_DISH_RANGE.contains(&list.dishes.len()) {
        tracing::warn!(
            count = list.dishes.len(),
            "model returned a dish count outside the requested 3-5 range"
        );
    }

    Ok(SuggestionsResult {
        dishes: identity::attach_suggestion_ids(list.dishes),
    })
}
