//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Cache Strategy
///
/// Delegates to [`crate::application::services::ResolverService::resolve`]:
///
/// - **Cache hit**: Immediate redirect
/// - **Cache miss**: Query DB, spawn async cache write
/// - **Cache error**: Log and fall back to DB
///
/// Mappings never change, so the redirect is permanent (301) and clients may
/// cache it.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 503 Service Unavailable if the database cannot be reached.
/// Returns 500 Internal Server Error if the stored URL cannot be sent as a
/// `Location` header (for example, it contains a control character).
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.resolver.resolve(&code).await?;

    let location = HeaderValue::try_from(original_url).map_err(|e| {
        AppError::internal(
            "Stored URL is not a valid redirect target",
            json!({ "short_code": code, "reason": e.to_string() }),
        )
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}
