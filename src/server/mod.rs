// HTTP server - thin surface over the optimizer
//
// Routes, shared state, CORS, and request tracing. All refinement semantics
// live in the optimizer module; this layer only wires streams to transport.

mod handlers;
mod stream;

pub use handlers::{handle_check_keys, handle_health, handle_optimize, OptimizeRequest};
pub use stream::optimize_stream;

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::providers::RoleBindings;

/// Shared server state: the three role bindings plus where templates live.
///
/// Each request builds its own Optimizer from these bindings - no run state
/// is shared between concurrent optimizations.
pub struct AppState {
    pub bindings: RoleBindings,
    pub templates_dir: PathBuf,
}

impl AppState {
    pub fn new(bindings: RoleBindings, settings: &Settings) -> Self {
        Self {
            bindings,
            templates_dir: settings.templates_dir.clone(),
        }
    }
}

/// Build the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // The UI is served from a separate origin, so CORS stays permissive.
    // (tower-http rejects wildcard origins combined with credentials, so
    // unlike the original deployment we don't allow credentials.)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::handle_health))
        .route("/api/check_keys", get(handlers::handle_check_keys))
        .route("/api/optimize", post(handlers::handle_optimize))
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024)) // 1MB
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
