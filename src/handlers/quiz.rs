// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
};

use crate::{
    config::Config,
    error::AppError,
    models::session_log::{SessionLog, SubmitQuizRequest, SubmitQuizResponse},
    services::{
        explanation::Explainer, question_store::QuestionStore, scorer,
        session_builder::build_session, session_logger::SessionLogger,
    },
};

/// Starts a quiz session.
///
/// * 404 if the question file has not been built yet.
/// * A malformed question file is logged and served as an empty quiz.
/// * Each question's options are shuffled; the response must not be cached.
pub async fn start_quiz(
    State(config): State<Config>,
    State(store): State<QuestionStore>,
) -> Result<impl IntoResponse, AppError> {
    let all_questions = match store.load().await {
        Ok(questions) => questions,
        Err(AppError::Parse(msg)) => {
            tracing::error!("Question file {} is malformed: {}", store.path().display(), msg);
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let session = {
        let mut rng = rand::thread_rng();
        build_session(&all_questions, config.num_questions, &mut rng)
    };

    tracing::info!(
        "Started quiz with {} of {} questions",
        session.total,
        all_questions.len()
    );

    Ok((
        [
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        Json(session),
    ))
}

/// Grades a submission, explains the wrong answers and saves the session log.
///
/// Explanations are requested one at a time; a failing model call only
/// changes the explanation text. An unreadable body is a 400 JSON error.
pub async fn submit_quiz(
    State(explainer): State<Explainer>,
    State(logger): State<SessionLogger>,
    payload: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let mut results = Vec::with_capacity(req.questions.len());

    for (i, question) in req.questions.iter().enumerate() {
        let marker = req.marker_at(i);
        let mut graded = scorer::grade(question, marker);
        explainer.annotate(&mut graded).await;
        results.push(graded);
    }

    let log = SessionLog::from_results(results);
    let path = logger.persist(&log).await.map_err(|e| {
        tracing::error!("Failed to save quiz log: {}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(SubmitQuizResponse {
        log,
        log_file: path.display().to_string(),
    }))
}
