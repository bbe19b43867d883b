//! Push gateway client implementation.

use crate::error::IdentityError;
use crate::types::TokenResponse;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for the push-messaging gateway that issues device tokens.
///
/// Tokens are opaque and occasionally reissued by the gateway: the value
/// returned by [`current_token`](Self::current_token) may differ from any
/// previously cached one, and subscriptions made under an old token are
/// not migrated when it rotates. Callers should fetch a fresh token per
/// session rather than persisting one.
#[derive(Clone)]
pub struct IdentityClient {
    client: Client,
    base_url: String,
}

impl IdentityClient {
    /// Create a new identity client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IdentityError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the current device token.
    #[instrument(skip(self))]
    pub async fn current_token(&self) -> Result<String, IdentityError> {
        let response = self
            .client
            .get(format!("{}/v1/token", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, "Token request failed");
            return Err(IdentityError::Unavailable(format!(
                "Token endpoint returned {}",
                status
            )));
        }

        let body: TokenResponse = response.json().await?;
        if body.token.is_empty() {
            return Err(IdentityError::EmptyToken);
        }

        debug!(len = body.token.len(), "Fetched device token");
        Ok(body.token)
    }

    /// Check if the push gateway is reachable.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/v1/health", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}
