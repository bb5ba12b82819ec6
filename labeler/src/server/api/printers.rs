//! Printer discovery API.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::app::SharedState;

/// GET /printers – USB and CUPS printers visible to the host.
pub async fn list_printers(State(state): State<SharedState>) -> Json<Value> {
    let printers = ql_raster::discover().await;

    let configured = state.config().await.printer.clone();
    Json(json!({
        "configured": configured,
        "printers": printers,
    }))
}
