//! Identity client errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("Identity provider returned an empty token")]
    EmptyToken,
}
