use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::error;
use crate::api::AppState;

pub async fn is_alive() -> Json<Value> {
    Json(json!({
        "status": "alive",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "build_timestamp": env!("BUILD_TIMESTAMP"),
        "git_hash": option_env!("GIT_HASH"),
    }))
}

pub async fn is_ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.db.ping() {
        Ok(()) => (StatusCode::OK, Json(json!({"status": "ready"}))),
        Err(e) => {
            error!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"status": "unavailable"})))
        }
    }
}
