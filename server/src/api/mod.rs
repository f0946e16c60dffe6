pub mod combined;
pub mod extract;
pub mod recipe;
pub mod suggest;
pub mod testing;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use fridgechef_core::ai::AiError;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::state::SharedState;

/// Shared error response used by all endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Translate a core error into a boundary response: validation failures are
/// the caller's fault, configuration means we cannot serve at all, and
/// whatever the model or transport got wrong is a bad gateway.
pub fn ai_error_response(err: AiError) -> Response {
    let status = match &err {
        AiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AiError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
        AiError::Api(_) | AiError::SchemaViolation(_) => StatusCode::BAD_GATEWAY,
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "AI capability failed");
    } else {
        tracing::warn!(error = %err, "request rejected");
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Returns the router for /api/v1 endpoints (mounted at /api/v1).
pub fn v1_router() -> Router<SharedState> {
    Router::new()
        .route("/extract-ingredients", post(extract::extract_ingredients))
        .route("/suggest-meals", post(suggest::suggest_meals))
        .route("/build-recipe", post(recipe::build_recipe))
        .route("/extract-and-suggest", post(combined::extract_and_suggest))
}

/// Generate the complete OpenAPI spec by merging all module specs.
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(components(schemas(
        ErrorResponse,
        fridgechef_core::ai::DetectedIngredient,
        fridgechef_core::ai::ExtractionResult,
        fridgechef_core::ai::DishSummary,
        fridgechef_core::ai::SuggestionsResult,
        fridgechef_core::ai::RecipeIngredient,
        fridgechef_core::ai::RecipeStep,
        fridgechef_core::ai::RecipeResult,
    )))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        extract::ApiDoc::openapi(),
        suggest::ApiDoc::openapi(),
        recipe::ApiDoc::openapi(),
        combined::ApiDoc::openapi(),
        testing::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::ai_error_response;
    use axum::http::StatusCode;
    use fridgechef_core::ai::{AiError, ConfigError};

    #[test]
    fn invalid_input_maps_to_bad_request() {
        let response = ai_error_response(AiError::InvalidInput("no ingredients".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn config_errors_map_to_service_unavailable() {
        let response = ai_error_response(AiError::Config(ConfigError::MissingEnvVar(
            "OPENROUTER_API_KEY".to_string(),
        )));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let api = ai_error_response(AiError::Api("timeout".to_string()));
        assert_eq!(api.status(), StatusCode::BAD_GATEWAY);

        let schema = ai_error_response(AiError::SchemaViolation("not json".to_string()));
        assert_eq!(schema.status(), StatusCode::BAD_GATEWAY);
    }
}
