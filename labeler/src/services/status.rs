//! Print job status shared with the web UI.

use serde::Serialize;

/// Snapshot of the current (or last) print job, as reported by `/status`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobStatus {
    pub running: bool,
    /// Labels printed so far.
    pub progress: usize,
    /// Labels in the job, if known.
    pub total: usize,
    /// Job start time, `None` when no job has run yet.
    pub started_at: Option<String>,
}

impl JobStatus {
    pub fn started(total: usize) -> Self {
        Self {
            running: true,
            progress: 0,
            total,
            started_at: Some(
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
        }
    }

    pub fn finish(&mut self) {
        self.running = false;
    }
}
