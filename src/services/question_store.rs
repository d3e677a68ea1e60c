// src/services/question_store.rs

use std::path::{Path, PathBuf};

use validator::Validate;

use crate::{error::AppError, models::question::QuestionRecord};

/// JSON-file backed collection of `QuestionRecord`s.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    path: PathBuf,
}

impl QuestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full question list.
    ///
    /// * `NotFound` if the artifact does not exist yet.
    /// * `Parse` if the file is not a JSON array of records.
    ///
    /// Records failing validation are dropped so callers only see well-formed questions.
    pub async fn load(&self) -> Result<Vec<QuestionRecord>, AppError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Err(AppError::NotFound(format!(
                "{} not found. Run build-questions first",
                self.path.display()
            )));
        }

        let raw = tokio::fs::read_to_string(&self.path).await?;
        let records: Vec<QuestionRecord> = serde_json::from_str(&raw)?;

        let total = records.len();
        let valid: Vec<QuestionRecord> = records
            .into_iter()
            .filter(|record| match record.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Dropping malformed question {:?}: {}", record.question, e);
                    false
                }
            })
            .collect();

        tracing::debug!(
            "Loaded {} of {} questions from {}",
            valid.len(),
            total,
            self.path.display()
        );
        Ok(valid)
    }

    /// Overwrites the artifact with `records`.
    pub async fn save(&self, records: &[QuestionRecord]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}
