// src/services/session_builder.rs

use rand::{Rng, seq::index};

use crate::{
    models::question::{QuestionRecord, QuizSession, SessionQuestion},
    services::shuffler::shuffle_options,
};

/// Draws up to `desired_count` distinct questions and shuffles each one's options.
///
/// The count is clamped to the number of available questions.
pub fn build_session<R: Rng + ?Sized>(
    all_questions: &[QuestionRecord],
    desired_count: usize,
    rng: &mut R,
) -> QuizSession {
    let count = desired_count.min(all_questions.len());

    let questions: Vec<SessionQuestion> = index::sample(&mut *rng, all_questions.len(), count)
        .into_iter()
        .filter_map(|i| {
            let record = &all_questions[i];
            let (options, correct_answer) = shuffle_options(&record.options, &record.answer, &mut *rng)?;
            Some(SessionQuestion {
                question: record.question.clone(),
                options,
                correct_answer,
                original_answer: record.answer.clone(),
            })
        })
        .collect();

    QuizSession {
        total: questions.len(),
        questions,
    }
}
