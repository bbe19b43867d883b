//! Error types for the subscription API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use subscription_registry::RegistryError;
use thiserror::Error;

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Registry(err) = &self;
        let (status, code) = match err {
            RegistryError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            RegistryError::StoreConflict(_) => (StatusCode::CONFLICT, "STORE_CONFLICT"),
            RegistryError::StoreUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE")
            }
        };

        let body = ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
