//! HTTP API for the subscription registry.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::log_requests;
pub use types::*;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use subscription_registry::SubscriptionRegistry;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Subscription registry
    pub registry: Arc<SubscriptionRegistry>,
}

impl AppState {
    /// Create new application state.
    pub fn new(registry: SubscriptionRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Subscription management
        .route("/v1/subscriptions", post(handlers::subscribe))
        .route("/v1/subscriptions", delete(handlers::unsubscribe))
        .route("/v1/subscriptions/:token", get(handlers::list_subscriptions))
        // Fan-out feed for the notification crawler
        .route("/v1/keywords", get(handlers::list_active_keywords))
        .layer(axum_middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
