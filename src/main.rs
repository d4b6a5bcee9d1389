use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use wishlist_service::config::ServerConfig;
use wishlist_service::router::create_app_router;
use wishlist_service::telemetry::init_tracing;
use wishlist_service::wishlist::{AppState, DynStore, MemoryStore, MongoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("Invalid configuration")?;
    init_tracing(&config.log_level, config.log_json)?;

    // Select the backing store
    let store: DynStore = match config.mongodb_uri.as_deref() {
        Some(uri) => {
            let store = MongoStore::connect(uri, &config.mongodb_database)
                .await
                .context("Failed to connect to MongoDB")?;
            info!(database = %config.mongodb_database, "Using MongoDB store");
            Arc::new(store)
        }
        None => {
            warn!("MONGODB_URI not set, using the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    // Initialize application state
    let state = Arc::new(AppState::new(store, config.jwt_secret.clone()));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    info!(addr = %config.addr, "Server running");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
