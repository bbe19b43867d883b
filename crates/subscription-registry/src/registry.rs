//! Subscription registry implementation.

use crate::error::RegistryError;
use std::collections::HashSet;
use std::sync::Arc;
use subscription_store::{KeywordStore, StoreError, SubscriptionRecord};
use tracing::{debug, info, instrument};

/// Membership management for keyword-to-subscriber mappings.
///
/// The registry is the sole mutator of subscription state. It keeps no
/// cache of its own: every call goes to the injected store, so there is
/// no stale state to reconcile, at the cost of a store round trip per
/// call. All operations are idempotent.
#[derive(Clone)]
pub struct SubscriptionRegistry {
    store: Arc<dyn KeywordStore>,
}

impl SubscriptionRegistry {
    /// Create a registry backed by `store`.
    pub fn new(store: Arc<dyn KeywordStore>) -> Self {
        Self { store }
    }

    /// Subscribe `token` to `keyword`, creating the keyword record on
    /// first use.
    ///
    /// Subscribing an already-subscribed pair changes nothing.
    #[instrument(skip(self, token))]
    pub async fn subscribe(&self, keyword: &str, token: &str) -> Result<(), RegistryError> {
        validate(keyword, token)?;

        // Records are never deleted, so once a record is seen it stays
        // visible and the union below cannot miss.
        if self.store.get(keyword).await?.is_some() {
            self.store.add_subscriber(keyword, token).await?;
            debug!(keyword, "Joined existing keyword");
            return Ok(());
        }

        // First subscriber for this keyword. Another caller may win the
        // create race; join the record they made instead.
        match self.store.create(keyword, &[token.to_string()]).await {
            Ok(()) => {
                info!(keyword, "Keyword record created");
                Ok(())
            }
            Err(StoreError::AlreadyExists(_)) => {
                self.store.add_subscriber(keyword, token).await?;
                debug!(keyword, "Lost create race, joined existing record");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove `token` from `keyword`'s subscriber set.
    ///
    /// Unsubscribing a pair that is not present is a no-op, and no record
    /// is created for a keyword never seen. A record whose subscriber set
    /// empties is kept as a tombstone rather than deleted; re-subscribing
    /// reuses it.
    #[instrument(skip(self, token))]
    pub async fn unsubscribe(&self, keyword: &str, token: &str) -> Result<(), RegistryError> {
        validate(keyword, token)?;

        match self.store.remove_subscriber(keyword, token).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound(_)) => {
                debug!(keyword, "Unsubscribe for unknown keyword, nothing to do");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Keywords the token is currently subscribed to.
    ///
    /// Each keyword is reported once even if the store briefly holds
    /// redundant entries.
    pub async fn subscriptions(&self, token: &str) -> Result<Vec<String>, RegistryError> {
        if token.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "token must not be empty".into(),
            ));
        }

        let keywords = self.store.keywords_for_subscriber(token).await?;
        let mut seen = HashSet::new();
        Ok(keywords
            .into_iter()
            .filter(|k| seen.insert(k.clone()))
            .collect())
    }

    /// Records with at least one subscriber, the input to notification
    /// fan-out.
    pub async fn active_records(&self) -> Result<Vec<SubscriptionRecord>, RegistryError> {
        let records = self.store.all().await?;
        Ok(records.into_iter().filter(|r| r.is_active()).collect())
    }

    /// Total keyword records, tombstones included.
    pub async fn keyword_count(&self) -> Result<usize, RegistryError> {
        Ok(self.store.count().await?)
    }
}

fn validate(keyword: &str, token: &str) -> Result<(), RegistryError> {
    if keyword.is_empty() {
        return Err(RegistryError::InvalidArgument(
            "keyword must not be empty".into(),
        ));
    }
    if token.is_empty() {
        return Err(RegistryError::InvalidArgument(
            "token must not be empty".into(),
        ));
    }
    Ok(())
}
