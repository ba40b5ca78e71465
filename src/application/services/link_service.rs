//! Short link creation and listing service.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Maximum number of generated codes tried before giving up on a registration.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Service for registering new short links.
///
/// The write path never touches the cache: new mappings are cached lazily on
/// their first resolution.
pub struct LinkService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a new mapping for `original_url`.
    ///
    /// # Code Generation
    ///
    /// A random 6-character code is generated and inserted. If the store
    /// reports a duplicate code (including a concurrent registration that won
    /// the race), a fresh code is generated, up to [`MAX_CODE_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is absent or empty; nothing
    /// is written in that case. Any other string is stored exactly as given.
    ///
    /// Returns [`AppError::Internal`] if every attempt collided.
    ///
    /// Returns [`AppError::ServiceUnavailable`] if the store cannot be reached.
    pub async fn register(&self, original_url: Option<String>) -> Result<UrlMapping, AppError> {
        let original_url = original_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                AppError::bad_request(
                    "original_url is required",
                    json!({ "field": "original_url" }),
                )
            })?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let new_mapping = NewUrlMapping::new(original_url.clone(), generate_code());

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => {
                    info!(
                        "Registered {} -> {}",
                        mapping.short_code, mapping.original_url
                    );
                    return Ok(mapping);
                }
                Err(StoreError::DuplicateCode(code)) => {
                    warn!(
                        "Short code collision on '{}' (attempt {}/{})",
                        code, attempt, MAX_CODE_ATTEMPTS
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Lists all mappings, newest first.
    pub async fn list_all(&self) -> Result<Vec<UrlMapping>, AppError> {
        Ok(self.repository.list_all().await?)
    }
}
