use crate::api::{ai_error_response, ErrorResponse};
use crate::images::{validate_upload, MAX_UPLOAD_SIZE};
use crate::state::SharedState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use fridgechef_core::ai::ExtractionResult;
use utoipa::{OpenApi, ToSchema};

#[derive(OpenApi)]
#[openapi(
    paths(extract_ingredients),
    components(schemas(ExtractIngredientsRequest))
)]
pub struct ApiDoc;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ExtractIngredientsRequest {
    /// Photo of a fridge or of loose ingredients
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Read and validate the uploaded photo from a multipart body.
/// Returns the raw bytes together with the sniffed media type.
pub(crate) async fn read_photo_upload(
    multipart: &mut Multipart,
) -> Result<(Vec<u8>, String), Response> {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No image provided".to_string(),
                }),
            )
                .into_response())
        }
        Err(e) => {
            tracing::warn!("Multipart read error: {}", e);
            let error_msg = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                format!("File too large. Maximum size is {}MB", MAX_UPLOAD_SIZE / 1024 / 1024)
            } else {
                format!("Failed to read multipart data: {}", e.body_text())
            };
            return Err((e.status(), Json(ErrorResponse { error: error_msg })).into_response());
        }
    };

    let data = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Field read error: {}", e);
            let error_msg = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                format!("File too large. Maximum size is {}MB", MAX_UPLOAD_SIZE / 1024 / 1024)
            } else {
                format!("Failed to read file data: {}", e.body_text())
            };
            return Err((e.status(), Json(ErrorResponse { error: error_msg })).into_response());
        }
    };

    let media_type = match validate_upload(&data) {
        Ok(media_type) => media_type,
        Err(e) => {
            return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response())
        }
    };

    Ok((data.to_vec(), media_type))
}

/// Extract ingredients from a fridge photo
///
/// Runs vision AI over the uploaded photo and returns every edible
/// ingredient it can identify. Stateless: nothing is stored server-side.
#[utoipa::path(
    post,
    path = "/api/v1/extract-ingredients",
    tag = "pipeline",
    request_body(content_type = "multipart/form-data", content = ExtractIngredientsRequest),
    responses(
        (status = 200, description = "Detected ingredients", body = ExtractionResult),
        (status = 400, description = "Invalid image upload", body = ErrorResponse),
        (status = 502, description = "AI service failure", body = ErrorResponse)
    )
)]
pub async fn extract_ingredients(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let (data, media_type) = match read_photo_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    let image_base64 = BASE64.encode(&data);

    match state.service.extract(&image_base64, &media_type).await {
        Ok(result) => {
            tracing::info!(
                ingredients = result.ingredients.len(),
                unsure = result.unsure_items.len(),
                "extraction complete"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => ai_error_response(e),
    }
}
