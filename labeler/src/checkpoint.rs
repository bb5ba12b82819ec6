//! Batch progress checkpoint file.
//!
//! Written after each completed batch, read on startup to offer resume,
//! deleted when the whole job finishes. Write failures are logged and
//! the job continues without persisted progress.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Persisted progress marker enabling resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub last_completed_batch: usize,
    pub last_product_index: usize,
    pub timestamp: String,
    pub total_batches: usize,
    pub batch_size: usize,
}

impl Checkpoint {
    pub fn new(
        last_completed_batch: usize,
        last_product_index: usize,
        total_batches: usize,
        batch_size: usize,
    ) -> Self {
        Self {
            last_completed_batch,
            last_product_index,
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_batches,
            batch_size,
        }
    }
}

/// Checkpoint file path for a catalog: `<stem>_progress.json` next to
/// the CSV file.
pub fn checkpoint_path(csv_path: &Path) -> PathBuf {
    let stem = csv_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("catalog");
    let file = format!("{stem}_progress.json");
    match csv_path.parent() {
        Some(dir) if dir != Path::new("") => dir.join(file),
        _ => PathBuf::from(file),
    }
}

/// Load a checkpoint if one exists and parses; a corrupt file is
/// treated as absent (logged).
pub fn load(path: &Path) -> Option<Checkpoint> {
    let data = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(cp) => Some(cp),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not parse progress file, starting fresh");
            None
        }
    }
}

/// Persist a checkpoint. Failure is non-fatal for the print job.
pub fn save(path: &Path, checkpoint: &Checkpoint) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(checkpoint)?;
    std::fs::write(path, json)
}

/// Delete the checkpoint after a completed job.
pub fn remove(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "could not delete progress file");
        }
    }
}
