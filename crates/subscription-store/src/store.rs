//! Storage interface consumed by the subscription registry.

use crate::error::StoreError;
use crate::types::SubscriptionRecord;
use async_trait::async_trait;

/// Backing document store for subscription records.
///
/// Implementations must make each call atomic with respect to concurrent
/// calls touching the same keyword: `add_subscriber` and `remove_subscriber`
/// are single-element set-union and set-difference, never a caller-visible
/// read-modify-write. A call either fully applies or fully fails.
#[async_trait]
pub trait KeywordStore: Send + Sync {
    /// Fetch the record for a keyword, if one exists.
    async fn get(&self, keyword: &str) -> Result<Option<SubscriptionRecord>, StoreError>;

    /// Create a record for a previously unseen keyword.
    ///
    /// Fails with [`StoreError::AlreadyExists`] if any record is present
    /// for the keyword, including one whose subscriber set has emptied.
    async fn create(&self, keyword: &str, subscribers: &[String]) -> Result<(), StoreError>;

    /// Atomically add a token to a keyword's subscriber set.
    ///
    /// Adding a token that is already a member changes nothing. Fails with
    /// [`StoreError::NotFound`] if no record exists for the keyword.
    async fn add_subscriber(&self, keyword: &str, token: &str) -> Result<(), StoreError>;

    /// Atomically remove a token from a keyword's subscriber set.
    ///
    /// Removing a token that is not a member changes nothing. The record
    /// itself is kept even when the set becomes empty. Fails with
    /// [`StoreError::NotFound`] if no record exists for the keyword.
    async fn remove_subscriber(&self, keyword: &str, token: &str) -> Result<(), StoreError>;

    /// Keywords whose subscriber set contains the token.
    async fn keywords_for_subscriber(&self, token: &str) -> Result<Vec<String>, StoreError>;

    /// All records, in unspecified order.
    async fn all(&self) -> Result<Vec<SubscriptionRecord>, StoreError>;

    /// Number of keyword records, emptied ones included.
    async fn count(&self) -> Result<usize, StoreError>;
}
