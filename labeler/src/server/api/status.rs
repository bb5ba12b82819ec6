//! Health and job status endpoints.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::services::log_buffer;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "ql-labeler",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /status – current job plus the last 50 log lines.
pub async fn job_status(State(state): State<SharedState>) -> Json<Value> {
    let job = state.job_status().await;
    let logs = log_buffer::recent(50);
    Json(json!({ "job": job, "logs": logs }))
}
