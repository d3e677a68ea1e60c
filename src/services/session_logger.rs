// src/services/session_logger.rs

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::{error::AppError, models::session_log::SessionLog};

/// Writes one JSON file per graded submission.
#[derive(Debug, Clone)]
pub struct SessionLogger {
    dir: PathBuf,
}

impl SessionLogger {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persists `log` as `quiz_log_<YYYYmmdd_HHMMSS>.json` and returns its path.
    ///
    /// Two submissions in the same second share a name; the later one wins.
    pub async fn persist(&self, log: &SessionLog) -> Result<PathBuf, AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self.dir.join(format!("quiz_log_{}.json", timestamp));

        let body = serde_json::to_string_pretty(log)?;
        tokio::fs::write(&path, body).await?;

        tracing::info!(
            "Saved quiz log {} ({}/{} correct)",
            path.display(),
            log.correct_count,
            log.total
        );
        Ok(path)
    }

    /// Reads back a previously persisted log.
    pub async fn read(path: impl AsRef<Path>) -> Result<SessionLog, AppError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}
