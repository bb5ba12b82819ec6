//! CSV catalog upload and the bundled sample.

use std::path::{Path, PathBuf};

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::app::SharedState;
use crate::catalog;

use super::err_json;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// POST /upload-csv – Save an uploaded catalog and report its shape.
pub async fn upload_csv(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> ApiResult {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        if !filename.to_lowercase().ends_with(".csv") {
            return Err(err_json(400, "Only .csv files are accepted"));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| err_json(400, &e.to_string()))?;
        if data.is_empty() {
            return Err(err_json(400, "Uploaded file is empty"));
        }

        let dir = state.upload_dir().clone();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| err_json(500, &e.to_string()))?;
        let path = unique_upload_path(&dir, &filename);

        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| err_json(500, &e.to_string()))?;

        return match catalog::inspect(&path) {
            Ok((columns, rows)) => {
                info!(file = %path.display(), rows, "catalog uploaded");
                Ok(Json(json!({
                    "path": path.to_string_lossy(),
                    "columns": columns,
                    "rows": rows,
                })))
            }
            Err(e) => {
                // Do not leave a half-usable file behind.
                if let Err(rm) = tokio::fs::remove_file(&path).await {
                    warn!(file = %path.display(), error = %rm, "could not remove invalid upload");
                }
                Err(err_json(400, &format!("Invalid CSV file: {e}")))
            }
        };
    }

    Err(err_json(400, "No file field in upload"))
}

/// GET /use-sample – Point the UI at the bundled sample catalog.
pub async fn use_sample(State(state): State<SharedState>) -> ApiResult {
    let path = state.sample_dir().join("sample.csv");
    if !path.exists() {
        return Err(err_json(404, "Sample catalog not found"));
    }

    let (columns, rows) = catalog::inspect(&path).map_err(|e| err_json(500, &e.to_string()))?;
    Ok(Json(json!({
        "path": path.to_string_lossy(),
        "columns": columns,
        "rows": rows,
    })))
}

/// A writable path in `dir` derived from the client filename: the name
/// is sanitized and suffixed with a timestamp when it already exists.
fn unique_upload_path(dir: &Path, filename: &str) -> PathBuf {
    let safe: String = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.csv")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let candidate = dir.join(&safe);
    if !candidate.exists() {
        return candidate;
    }

    let stem = Path::new(&safe)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{stem}_{stamp}.csv"))
}
