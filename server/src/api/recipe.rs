use crate::api::{ai_error_response, ErrorResponse};
use crate::state::SharedState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use fridgechef_core::ai::RecipeResult;
use serde::Deserialize;
use utoipa::{OpenApi, ToSchema};

#[derive(OpenApi)]
#[openapi(paths(build_recipe), components(schemas(BuildRecipeRequest)))]
pub struct ApiDoc;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BuildRecipeRequest {
    /// Id of the selected dish, from a prior suggestion response
    pub suggestion_id: String,
    /// Title of the dish
    pub title: String,
    /// Context about why this dish was chosen
    pub context_summary: String,
    /// Number of servings
    #[serde(default)]
    pub servings: Option<u32>,
}

/// Build a detailed recipe for a selected dish
///
/// The `suggestion_id` is echoed back on the result so the client can
/// correlate it with the suggestion the user picked; the service itself
/// keeps no state between calls.
#[utoipa::path(
    post,
    path = "/api/v1/build-recipe",
    tag = "pipeline",
    request_body = BuildRecipeRequest,
    responses(
        (status = 200, description = "Detailed recipe", body = RecipeResult),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "AI service failure", body = ErrorResponse)
    )
)]
pub async fn build_recipe(
    State(state): State<SharedState>,
    Json(request): Json<BuildRecipeRequest>,
) -> impl IntoResponse {
    tracing::info!(title = %request.title, "building recipe");

    match state
        .service
        .build_recipe(
            &request.suggestion_id,
            &request.title,
            &request.context_summary,
            request.servings,
        )
        .await
    {
        Ok(result) => {
            tracing::info!(steps = result.steps.len(), "recipe built");
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => ai_error_response(e),
    }
}
