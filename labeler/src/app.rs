//! Shared application state for the web UI.

use std::path::PathBuf;
use std::sync::Arc;

use ab_glyph::FontVec;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::services::status::JobStatus;

/// State shared across all axum handlers. Cheap to clone.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: RwLock<AppConfig>,
    /// Label font, loaded once at startup.
    font: FontVec,
    upload_dir: PathBuf,
    sample_dir: PathBuf,
    job: RwLock<JobStatus>,
}

impl SharedState {
    pub fn new(config: AppConfig, font: FontVec) -> Self {
        let upload_dir = config.upload_dir.clone();
        let sample_dir = config.sample_dir.clone();
        Self {
            inner: Arc::new(SharedStateInner {
                config: RwLock::new(config),
                font,
                upload_dir,
                sample_dir,
                job: RwLock::new(JobStatus::default()),
            }),
        }
    }

    pub fn font(&self) -> &FontVec {
        &self.inner.font
    }

    pub fn upload_dir(&self) -> &PathBuf {
        &self.inner.upload_dir
    }

    pub fn sample_dir(&self) -> &PathBuf {
        &self.inner.sample_dir
    }

    /// Get a read lock on the current config.
    pub async fn config(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.config.read().await
    }

    pub async fn job_status(&self) -> JobStatus {
        self.inner.job.read().await.clone()
    }

    pub async fn set_job_status(&self, status: JobStatus) {
        *self.inner.job.write().await = status;
    }
}
