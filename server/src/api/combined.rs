use crate::api::{ai_error_response, ErrorResponse};
use crate::images::validate_upload;
use crate::state::SharedState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use fridgechef_core::ai::{ExtractionResult, SuggestionsResult};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(OpenApi)]
#[openapi(
    paths(extract_and_suggest),
    components(schemas(ExtractAndSuggestRequest, ExtractAndSuggestResponse))
)]
pub struct ApiDoc;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ExtractAndSuggestRequest {
    /// Photo of a fridge or of loose ingredients
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// Number of servings
    #[schema(value_type = Option<u32>)]
    pub servings: Option<u32>,
    /// Comma-separated dietary preferences
    #[schema(value_type = Option<String>)]
    pub dietary_preferences: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExtractAndSuggestResponse {
    pub extraction: ExtractionResult,
    pub suggestions: SuggestionsResult,
}

/// Split a comma-separated preferences field into a clean list.
pub(crate) fn parse_dietary_preferences(raw: &str) -> Option<Vec<String>> {
    let preferences: Vec<String> = raw
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    if preferences.is_empty() {
        None
    } else {
        Some(preferences)
    }
}

/// Extract ingredients and immediately suggest dishes
///
/// Convenience composition for mobile clients to save a round trip. If the
/// extraction stage fails, suggestion is never attempted.
#[utoipa::path(
    post,
    path = "/api/v1/extract-and-suggest",
    tag = "pipeline",
    request_body(content_type = "multipart/form-data", content = ExtractAndSuggestRequest),
    responses(
        (status = 200, description = "Extraction plus suggestions", body = ExtractAndSuggestResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "AI service failure", body = ErrorResponse)
    )
)]
pub async fn extract_and_suggest(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut image_data: Option<Vec<u8>> = None;
    let mut servings: Option<u32> = None;
    let mut dietary_preferences: Option<Vec<String>> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Multipart read error: {}", e);
                return (
                    e.status(),
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart data: {}", e.body_text()),
                    }),
                )
                    .into_response();
            }
        };

        match field.name() {
            Some("image") => match field.bytes().await {
                Ok(bytes) => image_data = Some(bytes.to_vec()),
                Err(e) => {
                    return (
                        e.status(),
                        Json(ErrorResponse {
                            error: format!("Failed to read image data: {}", e.body_text()),
                        }),
                    )
                        .into_response()
                }
            },
            Some("servings") => {
                let text = field.text().await.unwrap_or_default();
                match text.trim().parse::<u32>() {
                    Ok(value) => servings = Some(value),
                    Err(_) => {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse {
                                error: format!("servings must be a positive integer, got '{}'", text),
                            }),
                        )
                            .into_response()
                    }
                }
            }
            Some("dietary_preferences") => {
                let text = field.text().await.unwrap_or_default();
                dietary_preferences = parse_dietary_preferences(&text);
            }
            _ => {}
        }
    }

    let Some(data) = image_data else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No image provided (expected an 'image' field)".to_string(),
            }),
        )
            .into_response();
    };

    let media_type = match validate_upload(&data) {
        Ok(media_type) => media_type,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response()
        }
    };

    let image_base64 = BASE64.encode(&data);

    match state
        .service
        .extract_and_suggest(
            &image_base64,
            &media_type,
            servings,
            dietary_preferences.as_deref(),
        )
        .await
    {
        Ok((extraction, suggestions)) => {
            tracing::info!(
                ingredients = extraction.ingredients.len(),
                dishes = suggestions.dishes.len(),
                "extract-and-suggest complete"
            );
            (
                StatusCode::OK,
                Json(ExtractAndSuggestResponse {
                    extraction,
                    suggestions,
                }),
            )
                .into_response()
        }
        Err(e) => ai_error_response(e),
    }
}
