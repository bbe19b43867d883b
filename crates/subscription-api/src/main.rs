//! Subscription service - Entry point.

use std::sync::Arc;
use subscription_api::{
    api::{create_router, AppState},
    config::Config,
};
use subscription_registry::SubscriptionRegistry;
use subscription_store::{JsonFileStore, KeywordStore, MemoryKeywordStore};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting subscription service");

    // Initialize storage
    let store: Arc<dyn KeywordStore> = if config.store.persist {
        match JsonFileStore::open(&config.store.path).await {
            Ok(s) => Arc::new(s),
            Err(e) => {
                error!("Failed to open subscription snapshot: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        info!("Persistence disabled, using in-memory storage");
        Arc::new(MemoryKeywordStore::new())
    };

    let registry = SubscriptionRegistry::new(store);

    match registry.keyword_count().await {
        Ok(count) => info!("Registry ready with {} keyword records", count),
        Err(e) => {
            error!("Failed to read registry: {}", e);
            std::process::exit(1);
        }
    }

    // Create application state and router
    let state = AppState::new(registry);
    let app = create_router(state);

    // Bind to address
    let addr = match config.server.socket_addr() {
        Ok(a) => a,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
