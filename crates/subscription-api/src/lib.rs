//! Keyword subscription service.
//!
//! HTTP front end for the subscription registry: devices register
//! interest in keywords, and the notification crawler reads back the
//! keyword-to-subscriber map for fan-out.

pub mod api;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::ApiError;
