use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use super::api;
use crate::app::SharedState;

/// Uploaded CSV files are capped at 5 MB.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(api::status::health))
        .route("/status", get(api::status::job_status))
        .route("/printers", get(api::printers::list_printers))
        .route(
            "/upload-csv",
            post(api::upload::upload_csv).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/use-sample", get(api::upload::use_sample))
        .route("/preview", post(api::preview::preview_label))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
