// Request handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;

use crate::optimizer::RunConfig;

use super::{optimize_stream, AppState};

/// Request body for POST /api/optimize.
#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    /// The user's request describing the prompt to produce.
    /// "prompt" is the field name older UI builds send.
    #[serde(alias = "prompt")]
    pub user_request: String,
    /// Optional existing prompt to refine instead of starting fresh
    #[serde(default)]
    pub starting_prompt: Option<String>,
}

/// GET /health
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// GET /api/check_keys - per-provider key status and per-role model report.
///
/// Reports key presence only; validating credentials against provider
/// endpoints is deliberately out of scope for this probe.
pub async fn handle_check_keys(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let bindings = &state.bindings;

    let mut keys = serde_json::Map::new();
    for binding in bindings.all() {
        // Bindings on the same provider share a key, so repeats overwrite
        // with an identical status
        keys.insert(binding.client.provider().to_string(), json!(binding.status));
    }

    let models: serde_json::Map<String, serde_json::Value> = bindings
        .all()
        .iter()
        .map(|binding| {
            (
                binding.name.to_string(),
                json!({
                    "name": binding.client.model(),
                    "provider": binding.client.provider(),
                    "status": binding.status,
                }),
            )
        })
        .collect();

    Json(json!({ "keys": keys, "models": models }))
}

/// POST /api/optimize - run one optimization, streaming NDJSON progress.
///
/// The stream carries log events as they happen and ends with exactly one
/// terminal event (result or error).
pub async fn handle_optimize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OptimizeRequest>,
) -> Response {
    let config = RunConfig {
        user_request: request.user_request,
        starting_prompt: request.starting_prompt,
    };

    let body = optimize_stream(state.bindings.clone(), state.templates_dir.clone(), config);

    (
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        body,
    )
        .into_response()
}
