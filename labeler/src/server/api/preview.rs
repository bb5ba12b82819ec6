//! Label preview rendering for the web UI.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Value, json};

use label_engine::label::{LabelSpec, render_label};
use label_engine::preview::encode_png;

use crate::app::SharedState;
use crate::catalog;

use super::err_json;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    /// CSV path as returned by upload-csv or use-sample.
    pub path: String,
    /// Columns whose values form the label text.
    pub columns: Vec<String>,
    /// Include the QR glyph.
    #[serde(default = "default_qr")]
    pub qr: bool,
}

fn default_qr() -> bool {
    true
}

/// POST /preview – Render the first usable row as a label PNG.
pub async fn preview_label(
    State(state): State<SharedState>,
    Json(req): Json<PreviewRequest>,
) -> ApiResult {
    if req.columns.is_empty() {
        return Err(err_json(400, "No columns selected"));
    }

    let path = std::path::PathBuf::from(&req.path);
    let text = catalog::first_preview_row(&path, &req.columns)
        .map_err(|e| err_json(400, &e.to_string()))?
        .ok_or_else(|| err_json(400, "No row with data in the selected columns"))?;

    let qr_size = if req.qr {
        state.config().await.qr_size
    } else {
        0
    };
    let spec = LabelSpec {
        qr_size,
        ..LabelSpec::default()
    };

    let img = render_label(state.font(), &text, &spec, None)
        .map_err(|e| err_json(500, &e.to_string()))?;
    let png = encode_png(&img).map_err(|e| err_json(500, &e.to_string()))?;

    Ok(Json(json!({
        "text": text,
        "image_base64": STANDARD.encode(&png),
    })))
}
