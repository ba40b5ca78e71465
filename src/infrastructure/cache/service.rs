//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching the `short_code -> original_url` projection.
///
/// The cache is never the source of truth. Implementations report failures
/// instead of hiding them; callers decide whether to fail open.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - Process-local cache with TTL support
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss or expired entry
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Unavailable`] when the backend cannot be reached.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a URL mapping that expires `ttl_seconds` after this call.
    ///
    /// Expiration is fixed: reading an entry never extends its lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Unavailable`] when the backend cannot be reached.
    async fn set_url(
        &self,
        short_code: &str,
        original_url: &str,
        ttl_seconds: u64,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    ///
    /// Used by startup and by the health endpoint.
    async fn ping(&self) -> CacheResult<()>;
}
