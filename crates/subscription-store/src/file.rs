//! JSON snapshot store implementation.

use crate::error::StoreError;
use crate::store::KeywordStore;
use crate::types::SubscriptionRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// File-backed keyword store.
///
/// Holds the full record map in memory and rewrites a JSON snapshot on
/// every mutation, using a temp file and rename so a crash mid-write
/// leaves the previous snapshot intact. The snapshot is written before
/// the in-memory map is committed: a failed write reports an error and
/// leaves the visible state untouched, keeping each call all-or-nothing.
pub struct JsonFileStore {
    records: Arc<RwLock<HashMap<String, SubscriptionRecord>>>,
    path: PathBuf,
}

impl JsonFileStore {
    /// Open a store at `path`, loading an existing snapshot if present.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let records = if path.exists() {
            let data = fs::read(&path).await?;
            let records: HashMap<String, SubscriptionRecord> = serde_json::from_slice(&data)?;
            info!(records = records.len(), path = %path.display(), "Loaded subscription snapshot");
            records
        } else {
            info!(path = %path.display(), "No snapshot found, starting empty");
            HashMap::new()
        };

        Ok(Self {
            records: Arc::new(RwLock::new(records)),
            path,
        })
    }

    /// Write a snapshot of `records` atomically via temp file + rename.
    async fn persist(&self, records: &HashMap<String, SubscriptionRecord>) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(records)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!(bytes = data.len(), path = %self.path.display(), "Snapshot written");
        Ok(())
    }
}

#[async_trait]
impl KeywordStore for JsonFileStore {
    async fn get(&self, keyword: &str) -> Result<Option<SubscriptionRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(keyword).cloned())
    }

    async fn create(&self, keyword: &str, subscribers: &[String]) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(keyword) {
            return Err(StoreError::AlreadyExists(keyword.to_string()));
        }

        let record = SubscriptionRecord::new(keyword, subscribers.to_vec());
        let mut snapshot = records.clone();
        snapshot.insert(keyword.to_string(), record.clone());
        self.persist(&snapshot).await?;

        records.insert(keyword.to_string(), record);
        Ok(())
    }

    async fn add_subscriber(&self, keyword: &str, token: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let mut record = records
            .get(keyword)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(keyword.to_string()))?;
        if !record.add_subscriber(token) {
            return Ok(());
        }

        let mut snapshot = records.clone();
        snapshot.insert(keyword.to_string(), record.clone());
        self.persist(&snapshot).await?;

        records.insert(keyword.to_string(), record);
        Ok(())
    }

    async fn remove_subscriber(&self, keyword: &str, token: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let mut record = records
            .get(keyword)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(keyword.to_string()))?;
        if !record.remove_subscriber(token) {
            return Ok(());
        }

        // The record is kept even with an empty subscriber set.
        let mut snapshot = records.clone();
        snapshot.insert(keyword.to_string(), record.clone());
        self.persist(&snapshot).await?;

        records.insert(keyword.to_string(), record);
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
