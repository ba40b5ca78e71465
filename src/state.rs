//! Shared application state injected into request handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, ResolverService};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::CacheService;
use crate::startup::Readiness;

/// Process-wide handles, created once at startup and cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn UrlRepository>>,
    pub resolver: Arc<ResolverService<dyn UrlRepository, dyn CacheService>>,
    pub repository: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn CacheService>,
    pub readiness: Readiness,
}

impl AppState {
    /// Wires services around a single store and cache.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        readiness: Readiness,
        cache_ttl_seconds: u64,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(repository.clone()));
        let resolver = Arc::new(ResolverService::with_ttl(
            repository.clone(),
            cache.clone(),
            cache_ttl_seconds,
        ));

        Self {
            link_service,
            resolver,
            repository,
            cache,
            readiness,
        }
    }
}
