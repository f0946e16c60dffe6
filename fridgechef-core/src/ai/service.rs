//! Orchestration facade over the three model-backed capabilities.

use std::sync::Arc;

use super::client::{AiClient, AiError};
use super::extract::{extract_ingredients, ExtractionResult};
use super::recipe::{write_recipe, RecipeResult};
use super::suggest::{suggest_dishes, SuggestionsResult};

/// Entry surface for the boundary layer.
///
/// Holds the one shared transport handle, injected at construction and
/// reused across calls; the facade itself keeps no other state, so it is
/// safe to share across concurrent requests.
#[derive(Clone)]
pub struct KitchenService {
    client: Arc<dyn AiClient>,
}

impl KitchenService {
    pub fn new(client: Arc<dyn AiClient>) -> Self {
        Self { client }
    }

    /// Detect edible ingredients on a base64-encoded fridge photo.
    /// `media_type` must describe the encoded bytes, e.g. "image/png".
    pub async fn extract(
        &self,
        image_base64: &str,
        media_type: &str,
    ) -> Result<ExtractionResult, AiError> {
        extract_ingredients(self.client.as_ref(), image_base64, media_type).await
    }

    /// Propose dishes from available ingredients.
    pub async fn suggest(
        &self,
        ingredients: &[String],
        servings: Option<u32>,
        dietary_preferences: Option<&[String]>,
    ) -> Result<SuggestionsResult, AiError> {
        suggest_dishes(
            self.client.as_ref(),
            ingredients,
            servings,
            dietary_preferences,
        )
        .await
    }

    /// Expand a chosen suggestion into a detailed recipe.
    pub async fn build_recipe(
        &self,
        suggestion_id: &str,
        title: &str,
        context_summary: &str,
        servings: Option<u32>,
    ) -> Result<RecipeResult, AiError> {
        write_recipe(
            self.client.as_ref(),
            suggestion_id,
            title,
            context_summary,
            servings,
        )
        .await
    }

    /// Extraction feeding straight into suggestion, with no extra logic.
    ///
    /// An extraction failure short-circuits; the suggest stage is never
    /// attempted on a failed extraction.
    pub async fn extract_and_suggest(
        &self,
        image_base64: &str,
        media_type: &str,
        servings: Option<u32>,
        dietary_preferences: Option<&[String]>,
    ) -> Result<(ExtractionResult, SuggestionsResult), AiError> {
        let extraction = self.extract(image_base64, media_type).await?;

        let ingredient_names: Vec<String> = extraction
            .ingredients
            .iter()
            .map(|ingredient| ingredient.name.clone())
            .collect();

        let suggestions = self
            .suggest(&ingredient_names, servings, dietary_preferences)
            .await?;

        Ok((extraction, suggestions))
    }
}
