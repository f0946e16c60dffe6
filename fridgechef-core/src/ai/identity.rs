//! Suggestion identity continuity.
//!
//! A suggestion id is the only key correlating a proposed dish with a later
//! recipe request; no session state exists between calls. Ids are issued
//! here, server-side, at suggestion time. The model is never asked to invent
//! identifiers: it cannot be trusted to produce stable, collision-free ones.

use uuid::Uuid;

use super::recipe::{AgentRecipe, RecipeResult};
use super::suggest::{AgentDish, DishSummary};

/// Attach a freshly generated opaque id to each model-produced dish.
///
/// UUID v4 carries 122 random bits, so collisions are negligible over a
/// deployment's lifetime without any coordination or storage.
pub(crate) fn attach_suggestion_ids(dishes: Vec<AgentDish>) -> Vec<DishSummary> {
    dishes
        .into_iter()
        .map(|dish| DishSummary {
            suggestion_id: Uuid::new_v4().to_string(),
            title: dish.title,
            short_description: dish.short_description,
            estimated_time_minutes: dish.estimated_time_minutes,
            confidence: dish.confidence,
        })
        .collect()
}

/// Re-attach the caller-supplied suggestion id to a model-produced recipe.
///
/// The id is copied verbatim. The service is stateless and cannot verify
/// the id was ever issued here; that gap is accepted and documented rather
/// than papered over.
pub(crate) fn restore_suggestion_id(recipe: AgentRecipe, suggestion_id: &str) -> RecipeResult {
    RecipeResult {
        suggestion_id: suggestion_id.to_string(),
        title: recipe.title,
        servings: recipe.servings,
        prep_time_minutes: recipe.prep_time_minutes,
        cook_time_minutes: recipe.cook_time_minutes,
        ingredients: recipe.ingredients,
        steps: recipe.steps,
        equipment: recipe.equipment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn dish(title: &str) -> AgentDish {
        AgentDish {
            title: title.to_string(),
            short_description: "test dish".to_string(),
            estimated_time_minutes: 20,
            confidence: 0.8,
        }
    }

    #[test]
    fn attached_ids_are_distinct_at_scale() {
        let dishes: Vec<AgentDish> = (0..10_000).map(|i| dish(&format!("dish {}", i))).collect();
        let summaries = attach_suggestion_ids(dishes);

        let ids: HashSet<&str> = summaries.iter().map(|s| s.suggestion_id.as_str()).collect();
        assert_eq!(ids.len(), 10_000);
        assert!(summaries.iter().all(|s| !s.suggestion_id.is_empty()));
    }

    #[test]
    fn restore_uses_caller_id_verbatim() {
        let recipe = AgentRecipe {
            title: "Omelette".to_string(),
            servings: None,
            prep_time_minutes: 5,
            cook_time_minutes: 10,
            ingredients: vec![],
            steps: vec![],
            equipment: vec![],
        };

        let result = restore_suggestion_id(recipe, "abc-123");
        assert_eq!(result.suggestion_id, "abc-123");
    }

    #[test]
    fn attach_preserves_dish_order_and_fields() {
        let summaries = attach_suggestion_ids(vec![dish("first"), dish("second")]);
        assert_eq!(summaries[0].title, "first");
        assert_eq!(summaries[1].title, "second");
        assert_eq!(summaries[0].estimated_time_minutes, 20);
    }
}
