//! Registry errors.

use subscription_store::StoreError;
use thiserror::Error;

/// Failure kinds reported to registry callers.
///
/// The registry performs no internal retries: every operation is
/// idempotent, so callers may retry a failed call blindly.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Empty keyword or token supplied.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backing store could not be reached or failed mid-call.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// An atomic set operation lost an optimistic-concurrency check.
    #[error("Store conflict on keyword: {0}")]
    StoreConflict(String),
}

impl From<StoreError> for RegistryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(keyword) => RegistryError::StoreConflict(keyword),
            other => RegistryError::StoreUnavailable(other.to_string()),
        }
    }
}
