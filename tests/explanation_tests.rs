// tests/explanation_tests.rs

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::post,
};
use quiz_backend::{
    error::AppError,
    models::session_log::GradedAnswer,
    services::{
        explanation::{Explainer, build_prompt},
        llm::{CompletionClient, GeminiClient},
    },
};

struct EchoClient;

#[async_trait]
impl CompletionClient for EchoClient {
    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        Ok(format!("\n{}\n", prompt.len()))
    }
}

struct BrokenClient;

#[async_trait]
impl CompletionClient for BrokenClient {
    async fn complete(&self, _prompt: &str) -> Result<String, AppError> {
        Err(AppError::Collaborator("connection refused".to_string()))
    }
}

fn options() -> Vec<String> {
    ["Cat", "Dog", "Bird", "Fish"].iter().map(|s| s.to_string()).collect()
}

fn wrong_answer() -> GradedAnswer {
    GradedAnswer {
        question: "Which animal barks?".to_string(),
        all_options: options(),
        user_answer_letter: "A".to_string(),
        user_answer_text: "Cat".to_string(),
        correct_answer_letter: "B".to_string(),
        correct_answer_text: "Dog".to_string(),
        is_correct: false,
        explanation: String::new(),
    }
}

/// Spawns a fake Gemini endpoint answering with `status` and `body`.
async fn spawn_fake_gemini(status: StatusCode, body: serde_json::Value) -> String {
    let app = Router::new().route(
        "/models/{action}",
        post(
            move |Path(action): Path<String>,
                  Query(query): Query<HashMap<String, String>>,
                  Json(request): Json<serde_json::Value>| {
                let body = body.clone();
                async move {
                    assert_eq!(action, "test-model:generateContent");
                    assert_eq!(query.get("key").map(String::as_str), Some("secret"));
                    assert_eq!(request["contents"][0]["parts"][0]["text"], "hello");
                    (status, Json(body))
                }
            },
        ),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

#[test]
fn prompt_mentions_question_options_and_both_answers() {
    let prompt = build_prompt("Which animal barks?", &options(), "Not answered", "Dog");

    assert!(prompt.contains("Question: Which animal barks?"));
    for opt in options() {
        assert!(prompt.contains(&format!("- {}", opt)));
    }
    assert!(prompt.contains("Student answered: Not answered"));
    assert!(prompt.contains("Correct answer: Dog"));
    assert!(prompt.contains("2-3 sentences"));
}

#[tokio::test]
async fn explanation_is_trimmed_model_output() {
    let explainer = Explainer::new(Some(Arc::new(EchoClient)));
    let expected = build_prompt("Which animal barks?", &options(), "Cat", "Dog").len();

    let text = explainer
        .explain("Which animal barks?", &options(), "Cat", "Dog")
        .await
        .unwrap();

    assert_eq!(text, expected.to_string());
}

#[tokio::test]
async fn failing_model_returns_fallback_with_error_detail() {
    let explainer = Explainer::new(Some(Arc::new(BrokenClient)));

    let text = explainer
        .explain("Which animal barks?", &options(), "Cat", "Dog")
        .await
        .unwrap();

    assert!(text.starts_with("Unable to generate explanation:"));
    assert!(text.contains("connection refused"));
}

#[tokio::test]
async fn disabled_explainer_produces_nothing() {
    let explainer = Explainer::default();
    assert!(!explainer.is_enabled());

    let mut graded = wrong_answer();
    explainer.annotate(&mut graded).await;
    assert_eq!(graded.explanation, "");
}

#[tokio::test]
async fn correct_answers_are_not_annotated() {
    let explainer = Explainer::new(Some(Arc::new(EchoClient)));

    let mut graded = wrong_answer();
    graded.is_correct = true;
    explainer.annotate(&mut graded).await;
    assert_eq!(graded.explanation, "");

    let mut graded = wrong_answer();
    explainer.annotate(&mut graded).await;
    assert!(!graded.explanation.is_empty());
}

#[tokio::test]
async fn gemini_client_returns_first_candidate_text() {
    let base_url = spawn_fake_gemini(
        StatusCode::OK,
        serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other"}]}}
            ]
        }),
    )
    .await;

    let client = GeminiClient::new("secret".to_string(), base_url, "test-model".to_string());
    assert_eq!(client.complete("hello").await.unwrap(), "first");
}

#[tokio::test]
async fn gemini_error_status_is_a_collaborator_error() {
    let base_url = spawn_fake_gemini(
        StatusCode::TOO_MANY_REQUESTS,
        serde_json::json!({"error": {"message": "Resource exhausted"}}),
    )
    .await;

    let client = GeminiClient::new("secret".to_string(), base_url, "test-model".to_string());
    let err = client.complete("hello").await.unwrap_err();

    match err {
        AppError::Collaborator(msg) => assert!(msg.contains("Resource exhausted")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn gemini_without_candidates_is_a_collaborator_error() {
    let base_url = spawn_fake_gemini(StatusCode::OK, serde_json::json!({"candidates": []})).await;

    let client = GeminiClient::new("secret".to_string(), base_url, "test-model".to_string());
    assert!(matches!(
        client.complete("hello").await,
        Err(AppError::Collaborator(_))
    ));
}
