#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use short_url::domain::entities::NewUrlMapping;
use short_url::domain::repositories::UrlRepository;
use short_url::infrastructure::cache::{CacheError, CacheResult, CacheService, MemoryCache};
use short_url::infrastructure::persistence::InMemoryUrlRepository;
use short_url::routes;
use short_url::startup::{Readiness, StartupState};
use short_url::state::AppState;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_TTL_SECONDS: u64 = 3600;

/// Backends behind a test server, kept so tests can inspect them directly.
pub struct TestBackends {
    pub repository: Arc<InMemoryUrlRepository>,
    pub cache: Arc<MemoryCache>,
}

pub fn create_test_state(startup: StartupState) -> (AppState, TestBackends) {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let cache = Arc::new(MemoryCache::new());

    let state = AppState::new(
        repository.clone(),
        cache.clone(),
        Readiness::fixed(startup),
        TEST_TTL_SECONDS,
    );

    (state, TestBackends { repository, cache })
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(routes::router(state, Duration::from_secs(10))).unwrap()
}

pub fn ready_server() -> (TestServer, TestBackends) {
    let (state, backends) = create_test_state(StartupState::Ready);
    (create_test_server(state), backends)
}

pub async fn insert_mapping(repository: &InMemoryUrlRepository, code: &str, url: &str) {
    repository
        .insert(NewUrlMapping::new(url, code))
        .await
        .unwrap();
}

/// A cache whose every call fails, as if Redis were unreachable.
pub struct DownCache;

#[async_trait]
impl CacheService for DownCache {
    async fn get_url(&self, _short_code: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn set_url(&self, _short_code: &str, _url: &str, _ttl_seconds: u64) -> CacheResult<()> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> CacheResult<()> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }
}

/// Waits for a spawned cache write to land.
pub async fn wait_for_cache(cache: &MemoryCache, code: &str) -> Option<String> {
    for _ in 0..50 {
        if let Ok(Some(url)) = cache.get_url(code).await {
            return Some(url);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    None
}
