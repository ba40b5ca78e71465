//! DTOs for the URL registration and listing endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlMapping;

/// Request to register a new short link.
///
/// `original_url` is optional at the serde level so that a missing field is
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    #[serde(default)]
    #[validate(
        required(message = "original_url is required"),
        length(min = 1, message = "original_url is required")
    )]
    pub original_url: Option<String>,
}

/// A mapping as returned to API clients.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlMappingResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<UrlMapping> for UrlMappingResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            id: mapping.id,
            original_url: mapping.original_url,
            short_code: mapping.short_code,
            created_at: mapping.created_at,
        }
    }
}
