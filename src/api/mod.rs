//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use routes::create_router;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Layers run outermost-last: trace -> logging -> routes
    Router::new()
        .route("/health", get(health_check))
        .merge(create_router(state.clone()))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
