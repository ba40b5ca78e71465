//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Liveness
//! - `GET  /{code}`  - Short link redirect
//! - `GET  /health`  - Readiness: startup state, database, cache
//! - `GET  /urls`    - List all mappings
//! - `POST /urls`    - Register a short link
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Per-request deadline
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, root_handler};
use crate::api::middleware::{timeout, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
///
/// Static routes (`/health`, `/urls`) take precedence over `/{code}`.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::url_routes())
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(timeout::layer(request_timeout))
        .layer(tracing::layer())
}

/// Constructs the application router with trailing-slash normalization.
pub fn app_router(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, request_timeout))
}
