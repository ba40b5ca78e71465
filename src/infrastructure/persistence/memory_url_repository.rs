//! Process-local implementation of the URL repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{StoreError, StoreResult, UrlRepository};

/// In-memory URL repository keyed by short code.
///
/// Enforces the same short code uniqueness as the PostgreSQL schema: the
/// check and the insert happen under one shard lock, so concurrent inserts of
/// the same code cannot both succeed. Used by integration tests and local
/// experiments; data does not survive a restart.
#[derive(Debug)]
pub struct InMemoryUrlRepository {
    rows: DashMap<String, UrlMapping>,
    next_id: AtomicI64,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn ensure_schema(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert(&self, new_mapping: NewUrlMapping) -> StoreResult<UrlMapping> {
        match self.rows.entry(new_mapping.short_code) {
            Entry::Occupied(occupied) => Err(StoreError::DuplicateCode(occupied.key().clone())),
            Entry::Vacant(vacant) => {
                let mapping = UrlMapping::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                    new_mapping.original_url,
                    vacant.key().clone(),
                    Utc::now(),
                );
                vacant.insert(mapping.clone());
                Ok(mapping)
            }
        }
    }

    async fn find_by_code(&self, short_code: &str) -> StoreResult<Option<UrlMapping>> {
        Ok(self.rows.get(short_code).map(|row| row.value().clone()))
    }

    async fn list_all(&self) -> StoreResult<Vec<UrlMapping>> {
        let mut all: Vec<UrlMapping> = self.rows.iter().map(|row| row.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(all)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
