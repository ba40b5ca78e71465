//! Durable store contract for URL mappings.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the durable store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The short code is already taken (unique constraint violation).
    #[error("short code '{0}' already exists")]
    DuplicateCode(String),

    /// The backing engine cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The engine was reachable but rejected or failed the query.
    #[error("store query failed: {0}")]
    Query(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Repository interface for URL mappings.
///
/// No operation retries internally: retry policy belongs to the startup
/// coordinator and to callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Creates the mapping relation if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backing engine cannot be reached.
    async fn ensure_schema(&self) -> StoreResult<()>;

    /// Inserts a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCode`] if the short code already exists.
    /// Returns [`StoreError::Unavailable`] on connectivity loss.
    async fn insert(&self, new_mapping: NewUrlMapping) -> StoreResult<UrlMapping>;

    /// Finds a mapping by its short code.
    async fn find_by_code(&self, short_code: &str) -> StoreResult<Option<UrlMapping>>;

    /// Lists every mapping, most recently created first.
    async fn list_all(&self) -> StoreResult<Vec<UrlMapping>>;

    /// Checks connectivity with the backing engine.
    async fn ping(&self) -> StoreResult<()>;
}
