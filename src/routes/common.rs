//! Operational probes mounted at the root, outside the API base path.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

/// Liveness only; never touches the store.
async fn liveness() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 200 when the store answers a ping, 503 otherwise. Both carry the same shape.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let (status, overall, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok", "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "store did not answer readiness ping");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };
    (status, Json(json!({ "status": overall, "database": database })))
}

async fn build_info() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
        .route("/version", get(build_info))
        .with_state(state)
}
