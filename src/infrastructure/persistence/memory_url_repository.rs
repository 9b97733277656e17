//! In-memory implementation of the URL repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewUrl, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// URL store held in a [`DashMap`].
///
/// Identifiers are assigned from a monotonically increasing counter starting
/// at 1, matching a database sequence. Used by integration tests and for
/// running the service without PostgreSQL.
#[derive(Debug)]
pub struct InMemoryUrlRepository {
    records: DashMap<i64, UrlRecord>,
    next_id: AtomicI64,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn user_records(&self, user_id: &str) -> Vec<UrlRecord> {
        self.records
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, new_url: NewUrl) -> Result<UrlRecord, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = UrlRecord::new(id, new_url.original_url, new_url.user_id, 0, Utc::now());
        self.records.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<UrlRecord>, AppError> {
        let mut records = self.user_records(user_id);
        records.sort_by_key(|record| Reverse((record.created_at, record.id)));

        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(records.into_iter().skip(offset).take(limit).collect())
    }

    async fn list_by_user_by_clicks(&self, user_id: &str) -> Result<Vec<UrlRecord>, AppError> {
        let mut records = self.user_records(user_id);
        records.sort_by_key(|record| (Reverse(record.clicks), record.id));
        Ok(records)
    }

    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError> {
        let count = self
            .records
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn increment_clicks(&self, id: i64) -> Result<bool, AppError> {
        match self.records.get_mut(&id) {
            Some(mut entry) => {
                entry.clicks += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.records.remove(&id).is_some())
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<Vec<i64>, AppError> {
        let mut removed = Vec::new();
        self.records.retain(|id, record| {
            let owned = record.user_id == user_id;
            if owned {
                removed.push(*id);
            }
            !owned
        });
        removed.sort_unstable();
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
