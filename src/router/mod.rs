//! Routing module for the wishlist service

use crate::wishlist::SharedState;
use axum::{body::Body, extract::Request, middleware::Next, routing::get, Json, Router};
use serde_json::{json, Value};
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let request_id = Uuid::new_v4().simple().to_string();
        let span = tracing::info_span!(
            "request",
            request_id = %request_id,
            method = %req.method(),
            uri = %req.uri(),
        );

        async move {
            let start = Instant::now();
            info!("Incoming request");
            let res = next.run(req).await;
            let duration_ms = start.elapsed().as_millis() as u64;
            if res.status().is_success() {
                info!(status = %res.status(), duration_ms, "Request completed");
            } else {
                warn!(status = %res.status(), duration_ms, "Request failed");
            }
            res
        }
        .instrument(span)
        .await
    });

    // Middleware: CORS (Permissive)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .route("/health", get(health))
        .merge(crate::wishlist::routes())
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}

/// Endpoint: GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
