// src/models/session_log.rs

use serde::{Deserialize, Serialize};

use crate::models::question::SessionQuestion;

/// Text recorded for a missing or unusable marker.
pub const NOT_ANSWERED: &str = "Not answered";

/// Letter recorded when the marker is absent, blank or not a string.
pub const NO_MARKER: &str = "None";

/// One graded question, as returned to the client and written to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedAnswer {
    pub question: String,
    pub all_options: Vec<String>,
    pub user_answer_letter: String,
    pub user_answer_text: String,
    pub correct_answer_letter: String,
    pub correct_answer_text: String,
    pub is_correct: bool,
    /// Empty unless an explanation was generated.
    #[serde(default)]
    pub explanation: String,
}

/// A fully graded submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    pub results: Vec<GradedAnswer>,
    pub correct_count: usize,
    pub total: usize,
    pub percentage: f64,
}

impl SessionLog {
    /// Computes the aggregates over `results`.
    pub fn from_results(results: Vec<GradedAnswer>) -> Self {
        let total = results.len();
        let correct_count = results.iter().filter(|r| r.is_correct).count();
        let percentage = if total > 0 {
            correct_count as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            results,
            correct_count,
            total,
            percentage,
        }
    }
}

/// DTO for `POST /api/submit-quiz`.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    /// One marker per question. Anything but a non-empty string means unanswered.
    #[serde(default)]
    pub answers: Vec<serde_json::Value>,

    /// The session questions exactly as served by `start-quiz`.
    #[serde(default)]
    pub questions: Vec<SessionQuestion>,
}

impl SubmitQuizRequest {
    /// Marker submitted for question `index`, if it is a non-empty string.
    pub fn marker_at(&self, index: usize) -> Option<&str> {
        self.answers
            .get(index)
            .and_then(|answer| answer.as_str())
            .filter(|marker| !marker.trim().is_empty())
    }
}

/// Response of `POST /api/submit-quiz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitQuizResponse {
    #[serde(flatten)]
    pub log: SessionLog,
    pub log_file: String,
}
