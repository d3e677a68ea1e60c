// src/models/question.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Every question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// Position markers, in option order.
pub const MARKERS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// A question as stored in `questions.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuestionRecord {
    #[validate(length(min = 1))]
    pub question: String,

    /// Exactly 4 distinct choices, in A-D order.
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,

    /// Marker of the correct option ("A".."D").
    #[validate(custom(function = validate_marker))]
    pub answer: String,
}

/// A question as handed to the client for one quiz session.
/// Options are reshuffled; `correct_answer` follows the correct option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    /// Marker in the stored record, before shuffling.
    #[serde(default)]
    pub original_answer: String,
}

/// Payload of `GET /api/start-quiz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuizSession {
    pub questions: Vec<SessionQuestion>,
    pub total: usize,
}

/// Marker for the option at `index`, if there is one.
pub fn marker_for_index(index: usize) -> Option<char> {
    MARKERS.get(index).copied()
}

/// Resolves a marker to an option index, bounded by `option_count`.
///
/// Comparison is case-insensitive and ignores surrounding whitespace.
/// Anything other than a single known letter yields `None`.
pub fn index_for_marker(marker: &str, option_count: usize) -> Option<usize> {
    let mut chars = marker.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }
    MARKERS
        .iter()
        .position(|m| *m == letter)
        .filter(|idx| *idx < option_count)
}

fn validate_options(options: &[String]) -> Result<(), ValidationError> {
    if options.len() != OPTION_COUNT {
        return Err(ValidationError::new("options_must_have_four_entries"));
    }
    if options.iter().any(|opt| opt.trim().is_empty()) {
        return Err(ValidationError::new("option_cannot_be_empty"));
    }
    let distinct: HashSet<&str> = options.iter().map(|opt| opt.trim()).collect();
    if distinct.len() != options.len() {
        return Err(ValidationError::new("options_must_be_distinct"));
    }
    Ok(())
}

fn validate_marker(answer: &str) -> Result<(), ValidationError> {
    match index_for_marker(answer, OPTION_COUNT) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("answer_must_be_a_to_d")),
    }
}
