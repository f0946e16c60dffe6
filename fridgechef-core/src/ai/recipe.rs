//! Recipe expansion for a selected dish suggestion.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::ai::client::{AiClient, AiError};
use crate::ai::identity;
use crate::ai::invoke::{structured_call, StructuredOutput};
use crate::ai::prompts::write_recipe::{render_recipe_system_prompt, RECIPE_PROMPT_NAME};
use crate::ai::schema;
use crate::ai::types::ChatMessage;

/// Model-facing request payload. The suggestion id is a caller/server
/// concern with no bearing on recipe content, so it is never sent.
#[derive(Debug, Clone, Serialize)]
struct RecipeRequest<'a> {
    title: &'a str,
    context_summary: &'a str,
    servings: Option<u32>,
}

/// Single ingredient entry in the final detailed recipe. Quantities are
/// free text; units depend on the dish and locale.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredient {
    pub ingredient: String,
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation: Option<String>,
}

/// Single preparation instruction. Numbers run 1, 2, ... in list order;
/// anything else is rejected as a schema violation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeStep {
    pub number: u32,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

/// Recipe as produced by the model, before the suggestion id is restored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AgentRecipe {
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) servings: Option<u32>,
    pub(crate) prep_time_minutes: u32,
    pub(crate) cook_time_minutes: u32,
    pub(crate) ingredients: Vec<RecipeIngredient>,
    pub(crate) steps: Vec<RecipeStep>,
    #[serde(default)]
    pub(crate) equipment: Vec<String>,
}

/// Detailed recipe returned to the caller, correlated back to the chosen
/// suggestion via `suggestion_id`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeResult {
    /// Restored from the caller's request, never from model output.
    pub suggestion_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<RecipeStep>,
    #[serde(default)]
    pub equipment: Vec<String>,
}

impl StructuredOutput for AgentRecipe {
    const NAME: &'static str = "Recipe";

    fn schema() -> serde_json::Value {
        schema::closed(json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "servings": { "type": ["integer", "null"] },
                "prep_time_minutes": { "type": "integer", "minimum": 0 },
                "cook_time_minutes": { "type": "integer", "minimum": 0 },
                "ingredients": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "ingredient": { "type": "string" },
                            "quantity": { "type": "string" },
                            "preparation": { "type": ["string", "null"] }
                        },
                        "required": ["ingredient", "quantity"]
                    }
                },
                "steps": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "number": { "type": "integer", "minimum": 1 },
                            "instruction": { "type": "string" },
                            "tip": { "type": ["string", "null"] }
                        },
                        "required": ["number", "instruction"]
                    }
                },
                "equipment": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["title", "prep_time_minutes", "cook_time_minutes", "ingredients", "steps"]
        }))
    }

    fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("recipe title must not be empty".to_string());
        }
        for ingredient in &self.ingredients {
            if ingredient.ingredient.trim().is_empty() {
                return Err("recipe ingredient name must not be empty".to_string());
            }
        }
        for (index, step) in self.steps.iter().enumerate() {
            if step.number as usize != index + 1 {
                return Err(format!(
                    "step numbers must run 1, 2, ... in order; position {} carries number {}",
                    index + 1,
                    step.number
                ));
            }
            if step.instruction.trim().is_empty() {
                return Err(format!("step {} has an empty instruction", step.number));
            }
        }
        Ok(())
    }
}

/// Expand a selected dish into a fully detailed recipe.
///
/// `suggestion_id` is carried around the model call and restored onto the
/// result; the model never sees it.
pub async fn write_recipe(
    client: &dyn AiClient,
    suggestion_id: &str,
    title: &str,
    context_summary: &str,
    servings: Option<u32>,
) -> Result<RecipeResult, AiError> {
    if title.trim().is_empty() {
        return Err(AiError::InvalidInput("title is required".to_string()));
    }
    if servings == Some(0) {
        return Err(AiError::InvalidInput(
            "servings must be a positive integer".to_string(),
        ));
    }

    let request = RecipeRequest {
        title,
        context_summary,
        servings,
    };
    let body = serde_json::to_string(&request)
        .map_err(|e| AiError::InvalidInput(format!("failed to serialize request: {}", e)))?;

    let messages = vec![
        ChatMessage::system(render_recipe_system_prompt()),
        ChatMessage::user(body),
    ];

    let recipe: AgentRecipe =
        structured_call(client, RECIPE_PROMPT_NAME, messages, Some(4096), Some(0.4)).await?;

    Ok(identity::restore_suggestion_id(recipe, suggestion_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn schema_has_no_suggestion_id_and_is_closed() {
        let schema = AgentRecipe::schema();
        assert_eq!(schema["additionalProperties"], Value::Bool(false));
        assert!(schema["properties"].get("suggestion_id").is_none());

        for field in ["ingredients", "steps"] {
            assert_eq!(
                schema["properties"][field]["items"]["additionalProperties"],
                Value::Bool(false),
                "items of '{}' must be closed",
                field
            );
        }
    }

    fn recipe_with_step_numbers(numbers: &[u32]) -> AgentRecipe {
        AgentRecipe {
            title: "Omelette".to_string(),
            servings: Some(2),
            prep_time_minutes: 5,
            cook_time_minutes: 10,
            ingredients: vec![],
            steps: numbers
                .iter()
                .map(|&number| RecipeStep {
                    number,
                    instruction: "Crack the eggs".to_string(),
                    tip: None,
                })
                .collect(),
            equipment: vec![],
        }
    }

    #[test]
    fn validate_rejects_zero_based_steps() {
        assert!(recipe_with_step_numbers(&[0, 1]).validate().is_err());
    }

    #[test]
    fn validate_rejects_gaps_in_step_numbering() {
        assert!(recipe_with_step_numbers(&[1, 3]).validate().is_err());
        assert!(recipe_with_step_numbers(&[2, 1]).validate().is_err());
    }

    #[test]
    fn validate_accepts_sequential_steps() {
        assert!(recipe_with_step_numbers(&[1, 2, 3]).validate().is_ok());
    }
}
