// src/services/explanation.rs

use std::sync::Arc;

use crate::{models::session_log::GradedAnswer, services::llm::CompletionClient};

/// Asks the model why an answer was wrong.
///
/// Without a client every request yields `None`, which callers record as an
/// empty explanation.
#[derive(Clone, Default)]
pub struct Explainer {
    client: Option<Arc<dyn CompletionClient>>,
}

impl Explainer {
    pub fn new(client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { client }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Explains an incorrect answer. Never fails: collaborator errors come back
    /// as a readable fallback message.
    pub async fn explain(
        &self,
        question: &str,
        options: &[String],
        user_answer_text: &str,
        correct_answer_text: &str,
    ) -> Option<String> {
        let client = self.client.as_ref()?;
        let prompt = build_prompt(question, options, user_answer_text, correct_answer_text);

        let text = match client.complete(&prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!("Explanation request failed: {}", e);
                format!("Unable to generate explanation: {}", e)
            }
        };
        Some(text)
    }

    /// Fills in `graded.explanation` when the answer was wrong.
    pub async fn annotate(&self, graded: &mut GradedAnswer) {
        if graded.is_correct {
            return;
        }
        if let Some(text) = self
            .explain(
                &graded.question,
                &graded.all_options,
                &graded.user_answer_text,
                &graded.correct_answer_text,
            )
            .await
        {
            graded.explanation = text;
        }
    }
}

pub fn build_prompt(
    question: &str,
    options: &[String],
    user_answer_text: &str,
    correct_answer_text: &str,
) -> String {
    let option_lines = options
        .iter()
        .map(|opt| format!("- {}", opt))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a helpful tutor explaining why a student got a question wrong.

Question: {question}

All options were:
{option_lines}

Student answered: {user_answer_text}
Correct answer: {correct_answer_text}

Provide a clear, concise explanation (2-3 sentences) that:
1. Explains why the correct answer is right
2. Explains why the student's answer was wrong (if not "Not answered")
3. Teaches the key concept so they understand for next time

Keep it educational and encouraging, not condescending."#
    )
}
