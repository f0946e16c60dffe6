use crate::api::{ai_error_response, ErrorResponse};
use crate::state::SharedState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use fridgechef_core::ai::SuggestionsResult;
use serde::Deserialize;
use utoipa::{OpenApi, ToSchema};

#[derive(OpenApi)]
#[openapi(paths(suggest_meals), components(schemas(SuggestMealsRequest)))]
pub struct ApiDoc;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SuggestMealsRequest {
    /// Available ingredients, e.g. from a prior extraction call
    pub ingredients: Vec<String>,
    /// Number of servings
    #[serde(default)]
    pub servings: Option<u32>,
    /// Dietary restrictions or preferences
    #[serde(default)]
    pub dietary_preferences: Option<Vec<String>>,
}

/// Suggest dishes from available ingredients
///
/// Returns 3-5 dish summaries, each with a server-issued `suggestion_id`
/// to pass back when requesting the full recipe.
#[utoipa::path(
    post,
    path = "/api/v1/suggest-meals",
    tag = "pipeline",
    request_body = SuggestMealsRequest,
    responses(
        (status = 200, description = "Suggested dishes", body = SuggestionsResult),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "AI service failure", body = ErrorResponse)
    )
)]
pub async fn suggest_meals(
    State(state): State<SharedState>,
    Json(request): Json<SuggestMealsRequest>,
) -> impl IntoResponse {
    tracing::info!(
        ingredients = request.ingredients.len(),
        "generating meal suggestions"
    );

    match state
        .service
        .suggest(
            &request.ingredients,
            request.servings,
            request.dietary_preferences.as_deref(),
        )
        .await
    {
        Ok(result) => {
            tracing::info!(dishes = result.dishes.len(), "suggestions generated");
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => ai_error_response(e),
    }
}
