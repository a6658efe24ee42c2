//! Axum router configuration with middleware.
//!
//! Routes: `POST /chat`, `GET /health`. If the configured web directory
//! exists, it is served as the fallback so the widget page and the relay
//! share one origin. Middleware: CORS, tracing.

use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let web_dir = state.config.server.web_dir.clone();

    let mut router = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/health", get(handlers::health::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if Path::new(&web_dir).is_dir() {
        router = router.fallback_service(ServeDir::new(&web_dir));
        tracing::info!(path = %web_dir, "static file serving enabled");
    } else {
        tracing::debug!(path = %web_dir, "web directory not found, serving API only");
    }

    router
}
