//! Cache-aside resolution of short codes.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// TTL applied to cache entries populated after a store hit.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;

/// How the cache is populated after a store hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheWrite {
    /// Spawned on a separate task; resolution does not wait for it.
    Background,
    /// Awaited before returning.
    Inline,
}

/// Resolves short codes to original URLs.
///
/// # Request Flow
///
/// 1. Check cache
/// 2. On hit, return immediately without touching the store
/// 3. On miss or cache error, query the store
/// 4. On store hit, populate the cache (best effort) and return
/// 5. On store miss, return [`AppError::NotFound`]
///
/// The cache is fail-open: its errors are logged and treated as misses.
pub struct ResolverService<R, C>
where
    R: UrlRepository + ?Sized,
    C: CacheService + ?Sized + 'static,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl_seconds: u64,
}

impl<R, C> ResolverService<R, C>
where
    R: UrlRepository + ?Sized,
    C: CacheService + ?Sized + 'static,
{
    /// Creates a resolver with the default TTL.
    pub fn new(repository: Arc<R>, cache: Arc<C>) -> Self {
        Self::with_ttl(repository, cache, DEFAULT_CACHE_TTL_SECONDS)
    }

    pub fn with_ttl(repository: Arc<R>, cache: Arc<C>, ttl_seconds: u64) -> Self {
        Self {
            repository,
            cache,
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Resolves `short_code` to its redirect target.
    ///
    /// Cache population after a store hit runs on a spawned task.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::ServiceUnavailable`] if the store cannot be reached.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        self.resolve_with(short_code, CacheWrite::Background).await
    }

    /// Same as [`Self::resolve`], but waits for the cache write to finish.
    pub async fn resolve_and_cache(&self, short_code: &str) -> Result<String, AppError> {
        self.resolve_with(short_code, CacheWrite::Inline).await
    }

    async fn resolve_with(&self, short_code: &str, write: CacheWrite) -> Result<String, AppError> {
        match self.cache.get_url(short_code).await {
            Ok(Some(url)) => {
                metrics::counter!("cache_hits_total").increment(1);
                debug!("Cache HIT for {}", short_code);
                return Ok(url);
            }
            Ok(None) => {
                metrics::counter!("cache_misses_total").increment(1);
                debug!("Cache MISS for {}", short_code);
            }
            Err(e) => {
                metrics::counter!("cache_errors_total").increment(1);
                warn!("Cache error for {}: {}. Falling back to database", short_code, e);
            }
        }

        let mapping = self
            .repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "short_code": short_code })))?;

        match write {
            CacheWrite::Inline => {
                store_in_cache(
                    self.cache.as_ref(),
                    short_code,
                    &mapping.original_url,
                    self.ttl_seconds,
                )
                .await;
            }
            CacheWrite::Background => {
                let cache = Arc::clone(&self.cache);
                let code = short_code.to_string();
                let url = mapping.original_url.clone();
                let ttl = self.ttl_seconds;
                tokio::spawn(async move {
                    store_in_cache(cache.as_ref(), &code, &url, ttl).await;
                });
            }
        }

        Ok(mapping.original_url)
    }
}

async fn store_in_cache<C: CacheService + ?Sized>(
    cache: &C,
    short_code: &str,
    original_url: &str,
    ttl_seconds: u64,
) {
    if let Err(e) = cache.set_url(short_code, original_url, ttl_seconds).await {
        warn!("Failed to cache URL for {}: {}", short_code, e);
    }
}
