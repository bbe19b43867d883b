//! In-memory store implementation.

use crate::error::StoreError;
use crate::store::KeywordStore;
use crate::types::SubscriptionRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory keyword store.
///
/// Each mutating call holds the map's write lock for its full duration,
/// which gives the per-keyword atomicity the [`KeywordStore`] contract
/// requires. Suitable for tests and single-process deployments.
#[derive(Clone, Default)]
pub struct MemoryKeywordStore {
    records: Arc<RwLock<HashMap<String, SubscriptionRecord>>>,
}

impl MemoryKeywordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeywordStore for MemoryKeywordStore {
    async fn get(&self, keyword: &str) -> Result<Option<SubscriptionRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(keyword).cloned())
    }

    async fn create(&self, keyword: &str, subscribers: &[String]) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(keyword) {
            return Err(StoreError::AlreadyExists(keyword.to_string()));
        }
        records.insert(
            keyword.to_string(),
            SubscriptionRecord::new(keyword, subscribers.to_vec()),
        );
        debug!(keyword, "Record created");
        Ok(())
    }

    async fn add_subscriber(&self, keyword: &str, token: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(keyword)
            .ok_or_else(|| StoreError::NotFound(keyword.to_string()))?;
        if record.add_subscriber(token) {
            debug!(keyword, subscribers = record.subscribers.len(), "Subscriber added");
        }
        Ok(())
    }

    async fn remove_subscriber(&self, keyword: &str, token: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(keyword)
            .ok_or_else(|| StoreError::NotFound(keyword.to_string()))?;
        if record.remove_subscriber(token) {
            debug!(keyword, subscribers = record.subscribers.len(), "Subscriber removed");
        }
        Ok(())
    }

    async fn keywords_for_subscriber(&self, token: &str) -> Result<Vec<String>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.has_subscriber(token))
            .map(|r| r.keyword.clone())
            .collect())
    }

    async fn all(&self) -> Result<Vec<SubscriptionRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let records = self.records.read().await;
        Ok(records.len())
    }
}
