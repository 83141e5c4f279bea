//! API Routes
//!
//! Configures the Axum router with all cache endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    flush_handler, forget_handler, get_handler, has_handler, health_handler, put_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /cache/:key` - Retrieve a value (404 when absent)
/// - `GET /cache/:key/exists` - Check whether a live entry exists
/// - `PUT /cache/:key` - Store a value with optional TTL
/// - `DELETE /cache/:key` - Forget a key
/// - `DELETE /cache` - Flush every entry
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/cache", delete(flush_handler))
        .route(
            "/cache/:key",
            get(get_handler).put(put_handler).delete(forget_handler),
        )
        .route("/cache/:key/exists", get(has_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
