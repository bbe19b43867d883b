//! Subscriber identity provider client.
//!
//! The registry identifies a device by the opaque token the push
//! messaging gateway hands it. This crate wraps the gateway's local
//! token endpoint; the registry itself never calls it and only ever
//! sees whatever token string a caller supplies.

mod client;
mod error;
mod types;

pub use client::IdentityClient;
pub use error::IdentityError;
pub use types::TokenResponse;
