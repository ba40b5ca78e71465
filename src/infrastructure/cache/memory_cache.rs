//! Process-local cache with fixed per-entry expiration.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Every this many writes, expired entries are swept from the map.
pub const SWEEP_INTERVAL: usize = 64;

#[derive(Debug)]
struct Entry {
    original_url: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// In-memory cache used when Redis is not configured.
///
/// Backed by a `DashMap`, so lookups for different codes do not contend on a
/// single lock. Deadlines are measured on the tokio clock, so tests can drive
/// expiration with `tokio::time::pause` and `tokio::time::advance`.
///
/// Expired entries are dropped when read, and swept from the whole map every
/// [`SWEEP_INTERVAL`] writes, so entries that are never read again do not
/// accumulate.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
    writes: AtomicUsize,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        debug!("Using in-memory cache");
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            debug!("Cache swept {} expired entries", removed);
        }
        removed
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(short_code)
            && entry.is_live(now)
        {
            return Ok(Some(entry.original_url.clone()));
        }

        if self
            .entries
            .remove_if(short_code, |_, entry| !entry.is_live(now))
            .is_some()
        {
            debug!("Cache EXPIRED: {}", short_code);
        }

        Ok(None)
    }

    async fn set_url(
        &self,
        short_code: &str,
        original_url: &str,
        ttl_seconds: u64,
    ) -> CacheResult<()> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
        self.entries.insert(
            short_code.to_string(),
            Entry {
                original_url: original_url.to_string(),
                expires_at,
            },
        );

        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % SWEEP_INTERVAL == 0 {
            self.purge_expired();
        }

        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }
}
