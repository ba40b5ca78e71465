//! HTTP server initialization and runtime setup.
//!
//! Startup is gated by [`StartupCoordinator`]: the listener is bound only
//! after the database, the cache and the schema are ready.

use crate::config::Config;
use crate::domain::repositories::{StoreResult, UrlRepository};
use crate::infrastructure::cache::{CacheResult, CacheService, MemoryCache, RedisCache};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::startup::{RetryPolicy, StartupCoordinator};
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (with retries)
/// - Redis cache, or the in-process cache when Redis is not configured (with retries)
/// - Schema migrations
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - A dependency stays unreachable after all startup attempts
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let coordinator = StartupCoordinator::new(RetryPolicy::from_config(&config));

    let deps = coordinator
        .run(|| connect_store(&config), || connect_cache(&config))
        .await?;

    let state = AppState::new(
        deps.repository,
        deps.cache,
        coordinator.readiness(),
        config.cache_ttl_seconds,
    );

    let app = app_router(state, Duration::from_secs(config.request_timeout_secs));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_store(config: &Config) -> StoreResult<Arc<dyn UrlRepository>> {
    let repository: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::connect(config).await?);
    Ok(repository)
}

async fn connect_cache(config: &Config) -> CacheResult<Arc<dyn CacheService>> {
    let cache: Arc<dyn CacheService> = match &config.redis_url {
        Some(redis_url) => {
            let redis = RedisCache::connect(redis_url.as_str()).await?;
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        None => {
            tracing::info!("Cache enabled (in-process, REDIS_URL not set)");
            Arc::new(MemoryCache::new())
        }
    };
    Ok(cache)
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
