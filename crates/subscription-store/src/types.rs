//! Subscription record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A keyword subscription record.
///
/// One record exists per keyword ever subscribed to. The keyword is the
/// record key and is matched as an exact string: no case folding, no
/// trimming. `subscribers` is stored as an ordered list but carries set
/// semantics; the mutators below refuse duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// The keyword, immutable identity of the record.
    pub keyword: String,

    /// Subscriber device tokens, in insertion order, no duplicates.
    pub subscribers: Vec<String>,

    /// When the keyword was first subscribed to.
    pub created_at: DateTime<Utc>,

    /// Last membership change.
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionRecord {
    /// Create a record with an initial subscriber set.
    pub fn new(keyword: impl Into<String>, subscribers: Vec<String>) -> Self {
        let now = Utc::now();
        let mut record = Self {
            keyword: keyword.into(),
            subscribers: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        for token in subscribers {
            if !record.subscribers.contains(&token) {
                record.subscribers.push(token);
            }
        }
        record
    }

    /// Add a token to the subscriber set.
    ///
    /// Returns `false` if the token was already a member.
    pub fn add_subscriber(&mut self, token: &str) -> bool {
        if self.subscribers.iter().any(|t| t == token) {
            return false;
        }
        self.subscribers.push(token.to_string());
        self.updated_at = Utc::now();
        true
    }

    /// Remove a token from the subscriber set.
    ///
    /// Returns `false` if the token was not a member.
    pub fn remove_subscriber(&mut self, token: &str) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|t| t != token);
        if self.subscribers.len() == before {
            return false;
        }
        self.updated_at = Utc::now();
        true
    }

    /// Whether the token is a member of the subscriber set.
    pub fn has_subscriber(&self, token: &str) -> bool {
        self.subscribers.iter().any(|t| t == token)
    }

    /// Whether the record has at least one subscriber.
    ///
    /// Records are never deleted, so an inactive record is a tombstone
    /// left behind after its last subscriber left.
    pub fn is_active(&self) -> bool {
        !self.subscribers.is_empty()
    }
}
