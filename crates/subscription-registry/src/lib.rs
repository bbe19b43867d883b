//! Keyword subscription registry.
//!
//! Owns the mapping from keyword to the set of subscriber device tokens
//! and exposes subscribe, unsubscribe, and reverse-lookup operations.
//! The backing store is injected through the [`KeywordStore`] trait from
//! `subscription-store`, so the registry can be exercised against an
//! in-memory store in tests.

mod error;
mod registry;

pub use error::RegistryError;
pub use registry::SubscriptionRegistry;
pub use subscription_store::{KeywordStore, SubscriptionRecord};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use subscription_store::{MemoryKeywordStore, StoreError};

    fn registry() -> (SubscriptionRegistry, Arc<MemoryKeywordStore>) {
        let store = Arc::new(MemoryKeywordStore::new());
        (SubscriptionRegistry::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_subscribe_fresh_keyword_creates_record() {
        let (registry, store) = registry();

        registry.subscribe("4090", "tokA").await.unwrap();

        let record = store.get("4090").await.unwrap().unwrap();
        assert_eq!(record.subscribers, vec!["tokA".to_string()]);
    }

    #[tokio::test]
    async fn test_subscribe_second_token_joins_set() {
        let (registry, store) = registry();

        registry.subscribe("4090", "tokA").await.unwrap();
        registry.subscribe("4090", "tokB").await.unwrap();

        let record = store.get("4090").await.unwrap().unwrap();
        assert!(record.has_subscriber("tokA"));
        assert!(record.has_subscriber("tokB"));
        assert_eq!(record.subscribers.len(), 2);
    }

    #[tokio::test]
    async fn test_subscribe_is_idempotent() {
        let (registry, store) = registry();

        for _ in 0..5 {
            registry.subscribe("4090", "tokA").await.unwrap();
        }

        let record = store.get("4090").await.unwrap().unwrap();
        assert_eq!(record.subscribers, vec!["tokA".to_string()]);
    }

    #[tokio::test]
    async fn test_unsubscribe_removes_only_that_token() {
        let (registry, store) = registry();

        registry.subscribe("4090", "tokA").await.unwrap();
        registry.subscribe("4090", "tokB").await.unwrap();
        registry.unsubscribe("4090", "tokA").await.unwrap();

        let record = store.get("4090").await.unwrap().unwrap();
        assert_eq!(record.subscribers, vec!["tokB".to_string()]);

        let keywords = registry.subscriptions("tokA").await.unwrap();
        assert!(!keywords.contains(&"4090".to_string()));
    }

    #[tokio::test]
    async fn test_unsubscribe_is_idempotent() {
        let (registry, store) = registry();

        registry.subscribe("4090", "tokA").await.unwrap();
        registry.unsubscribe("4090", "tokA").await.unwrap();
        registry.unsubscribe("4090", "tokA").await.unwrap();

        let record = store.get("4090").await.unwrap().unwrap();
        assert!(record.subscribers.is_empty());
    }

    #[tokio::test]
    async fn test_unsubscribe_unknown_keyword_is_noop() {
        let (registry, store) = registry();

        registry.unsubscribe("5070", "tokZ").await.unwrap();

        assert!(store.get("5070").await.unwrap().is_none());
        assert_eq!(registry.keyword_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_emptied_record_is_kept_and_reusable() {
        let (registry, store) = registry();

        registry.subscribe("4090", "tokA").await.unwrap();
        registry.unsubscribe("4090", "tokA").await.unwrap();

        // Tombstone: the record survives with an empty set
        assert_eq!(registry.keyword_count().await.unwrap(), 1);
        let record = store.get("4090").await.unwrap().unwrap();
        assert!(record.subscribers.is_empty());

        // No resurrection without an explicit re-subscribe
        assert!(registry.subscriptions("tokA").await.unwrap().is_empty());

        registry.subscribe("4090", "tokB").await.unwrap();
        let record = store.get("4090").await.unwrap().unwrap();
        assert_eq!(record.subscribers, vec!["tokB".to_string()]);
    }

    #[tokio::test]
    async fn test_cross_keyword_independence() {
        let (registry, store) = registry();

        registry.subscribe("4090", "tokA").await.unwrap();
        registry.subscribe("5070", "tokA").await.unwrap();
        registry.unsubscribe("4090", "tokA").await.unwrap();

        let record = store.get("5070").await.unwrap().unwrap();
        assert_eq!(record.subscribers, vec!["tokA".to_string()]);
    }

    #[tokio::test]
    async fn test_token_can_span_many_keywords() {
        let (registry, _) = registry();

        for keyword in ["4090", "5070", "9800x3d"] {
            registry.subscribe(keyword, "tokA").await.unwrap();
        }

        let mut keywords = registry.subscriptions("tokA").await.unwrap();
        keywords.sort();
        assert_eq!(
            keywords,
            vec!["4090".to_string(), "5070".to_string(), "9800x3d".to_string()]
        );
    }

    #[tokio::test]
    async fn test_concurrent_first_subscribes_both_land() {
        let (registry, store) = registry();

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.subscribe("4090", &format!("tok{}", i)).await })
            })
            .collect();

        for task in futures::future::join_all(tasks).await {
            task.unwrap().unwrap();
        }

        let record = store.get("4090").await.unwrap().unwrap();
        assert_eq!(record.subscribers.len(), 8);
    }

    #[tokio::test]
    async fn test_concurrent_subscribe_and_unsubscribe_interleave() {
        let (registry, store) = registry();
        registry.subscribe("4090", "tokA").await.unwrap();

        let r1 = registry.clone();
        let r2 = registry.clone();
        let (a, b) = tokio::join!(
            tokio::spawn(async move { r1.subscribe("4090", "tokB").await }),
            tokio::spawn(async move { r2.unsubscribe("4090", "tokA").await }),
        );
        a.unwrap().unwrap();
        b.unwrap().unwrap();

        let record = store.get("4090").await.unwrap().unwrap();
        assert_eq!(record.subscribers, vec!["tokB".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_arguments_rejected() {
        let (registry, _) = registry();

        assert!(matches!(
            registry.subscribe("", "tokA").await,
            Err(RegistryError::InvalidArgument(_))
        ));
        assert!(matches!(
            registry.subscribe("4090", "").await,
            Err(RegistryError::InvalidArgument(_))
        ));
        assert!(matches!(
            registry.unsubscribe("", "tokA").await,
            Err(RegistryError::InvalidArgument(_))
        ));
        assert!(matches!(
            registry.subscriptions("").await,
            Err(RegistryError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_active_records_excludes_tombstones() {
        let (registry, _) = registry();

        registry.subscribe("4090", "tokA").await.unwrap();
        registry.subscribe("5070", "tokB").await.unwrap();
        registry.unsubscribe("5070", "tokB").await.unwrap();

        let active = registry.active_records().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].keyword, "4090");
        assert_eq!(registry.keyword_count().await.unwrap(), 2);
    }

    /// Store that fails every call, for error propagation tests.
    struct UnavailableStore;

    #[async_trait]
    impl KeywordStore for UnavailableStore {
        async fn get(&self, _: &str) -> Result<Option<SubscriptionRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn create(&self, _: &str, _: &[String]) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn add_subscriber(&self, _: &str, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn remove_subscriber(&self, _: &str, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn keywords_for_subscriber(&self, _: &str) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn all(&self) -> Result<Vec<SubscriptionRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn count(&self) -> Result<usize, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_unavailable() {
        let registry = SubscriptionRegistry::new(Arc::new(UnavailableStore));

        assert!(matches!(
            registry.subscribe("4090", "tokA").await,
            Err(RegistryError::StoreUnavailable(_))
        ));
        assert!(matches!(
            registry.unsubscribe("4090", "tokA").await,
            Err(RegistryError::StoreUnavailable(_))
        ));
        assert!(matches!(
            registry.subscriptions("tokA").await,
            Err(RegistryError::StoreUnavailable(_))
        ));
    }

    /// Store whose reverse lookup reports a keyword twice, as an
    /// eventually consistent backend briefly might.
    struct DuplicatingStore;

    #[async_trait]
    impl KeywordStore for DuplicatingStore {
        async fn get(&self, _: &str) -> Result<Option<SubscriptionRecord>, StoreError> {
            Ok(None)
        }
        async fn create(&self, _: &str, _: &[String]) -> Result<(), StoreError> {
            Ok(())
        }
        async fn add_subscriber(&self, _: &str, _: &str) -> Result<(), StoreError> {
            Ok(())
        }
        async fn remove_subscriber(&self, _: &str, _: &str) -> Result<(), StoreError> {
            Ok(())
        }
        async fn keywords_for_subscriber(&self, _: &str) -> Result<Vec<String>, StoreError> {
            Ok(vec!["4090".into(), "5070".into(), "4090".into()])
        }
        async fn all(&self) -> Result<Vec<SubscriptionRecord>, StoreError> {
            Ok(vec![])
        }
        async fn count(&self) -> Result<usize, StoreError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_subscriptions_deduplicates_redundant_entries() {
        let registry = SubscriptionRegistry::new(Arc::new(DuplicatingStore));

        let keywords = registry.subscriptions("tokA").await.unwrap();
        assert_eq!(keywords, vec!["4090".to_string(), "5070".to_string()]);
    }
}
