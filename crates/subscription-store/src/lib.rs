//! Storage for keyword subscription records.
//!
//! Defines the document-store interface the subscription registry is
//! written against, plus two implementations: an in-memory store for
//! tests and single-process deployments, and a JSON snapshot store for
//! durable state.

mod error;
mod file;
mod memory;
mod store;
mod types;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryKeywordStore;
pub use store::KeywordStore;
pub use types::SubscriptionRecord;
