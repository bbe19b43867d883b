//! Identity provider wire types.

use serde::Deserialize;

/// Token response from the push gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Opaque device token. The gateway may reissue this at any time.
    pub token: String,
}
