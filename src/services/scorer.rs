// src/services/scorer.rs

use crate::models::{
    question::{SessionQuestion, index_for_marker},
    session_log::{GradedAnswer, NO_MARKER, NOT_ANSWERED},
};

/// Grades one answer against a session question.
///
/// A missing, blank or out-of-range marker counts as wrong and resolves to
/// `"Not answered"`. The explanation is left empty.
pub fn grade(question: &SessionQuestion, user_marker: Option<&str>) -> GradedAnswer {
    let user_marker = user_marker.map(str::trim).filter(|m| !m.is_empty());

    let user_index = user_marker.and_then(|m| index_for_marker(m, question.options.len()));
    let correct_index = index_for_marker(&question.correct_answer, question.options.len());

    let is_correct = matches!((user_index, correct_index), (Some(u), Some(c)) if u == c);

    GradedAnswer {
        question: question.question.clone(),
        all_options: question.options.clone(),
        user_answer_letter: user_marker.unwrap_or(NO_MARKER).to_string(),
        user_answer_text: option_text(question, user_index),
        correct_answer_letter: question.correct_answer.clone(),
        correct_answer_text: option_text(question, correct_index),
        is_correct,
        explanation: String::new(),
    }
}

fn option_text(question: &SessionQuestion, index: Option<usize>) -> String {
    index
        .and_then(|i| question.options.get(i))
        .cloned()
        .unwrap_or_else(|| NOT_ANSWERED.to_string())
}
