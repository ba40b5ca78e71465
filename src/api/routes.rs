//! API route configuration.

use crate::api::handlers::{create_url_handler, list_urls_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// URL management routes.
///
/// # Endpoints
///
/// - `GET  /urls` - List all mappings, newest first
/// - `POST /urls` - Register a new short link
pub fn url_routes() -> Router<AppState> {
    Router::new().route("/urls", get(list_urls_handler).post(create_url_handler))
}
