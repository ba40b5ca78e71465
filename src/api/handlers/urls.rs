//! Handlers for URL registration and listing.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::urls::{CreateUrlRequest, UrlMappingResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new short link.
///
/// # Endpoint
///
/// `POST /urls`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "original_url": "https://example.com",
///   "short_code": "aB3xY9",
///   "created_at": "2024-01-15T10:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `original_url` is missing or empty, or the body
/// is not valid JSON.
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UrlMappingResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let mapping = state.link_service.register(payload.original_url).await?;

    Ok((StatusCode::CREATED, Json(mapping.into())))
}

/// Lists every mapping, newest first.
///
/// # Endpoint
///
/// `GET /urls`
pub async fn list_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlMappingResponse>>, AppError> {
    let mappings = state.link_service.list_all().await?;

    Ok(Json(mappings.into_iter().map(Into::into).collect()))
}
