// src/services/extraction.rs

use std::{
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
};

use regex::Regex;
use validator::Validate;

use crate::{
    error::AppError,
    models::question::QuestionRecord,
    services::{llm::CompletionClient, question_store::QuestionStore},
    utils::docx,
};

/// File extension the pipeline picks up from the input folder.
pub const DOCUMENT_EXTENSION: &str = "docx";

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```(?:json)?").expect("valid regex"));
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```$").expect("valid regex"));

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSummary {
    pub documents_processed: usize,
    pub documents_skipped: usize,
    pub questions_extracted: usize,
    pub output_path: PathBuf,
}

/// Offline batch job: documents in, `questions.json` out.
///
/// Each document goes through read, extract, filter; the union of all
/// questions then replaces the store artifact.
pub struct ExtractionPipeline {
    client: Arc<dyn CompletionClient>,
    store: QuestionStore,
}

impl ExtractionPipeline {
    pub fn new(client: Arc<dyn CompletionClient>, store: QuestionStore) -> Self {
        Self { client, store }
    }

    /// Runs the whole batch over `docs_dir`, sequentially.
    pub async fn run(&self, docs_dir: &Path) -> Result<ExtractionSummary, AppError> {
        let documents = list_documents(docs_dir).await?;
        tracing::info!(
            "Found {} document(s) in {}",
            documents.len(),
            docs_dir.display()
        );

        let mut all_questions = Vec::new();
        let mut processed = 0;
        let mut skipped = 0;

        for path in &documents {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            tracing::info!("Processing {}...", name);

            let text = match read_document(path.clone()).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Skipping {}: {}", name, e);
                    skipped += 1;
                    continue;
                }
            };

            if text.is_empty() {
                tracing::warn!("No text found in {}", name);
                skipped += 1;
                continue;
            }

            let questions = self.extract(&text, &name).await;
            tracing::info!("Extracted {} question(s) from {}", questions.len(), name);
            all_questions.extend(questions);
            processed += 1;
        }

        self.store.save(&all_questions).await?;

        Ok(ExtractionSummary {
            documents_processed: processed,
            documents_skipped: skipped,
            questions_extracted: all_questions.len(),
            output_path: self.store.path().to_path_buf(),
        })
    }

    /// Asks the model for the questions in `text`.
    /// Collaborator and parse failures both yield an empty list.
    pub async fn extract(&self, text: &str, source: &str) -> Vec<QuestionRecord> {
        let prompt = build_extraction_prompt(text);

        let response = match self.client.complete(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Model request failed for {}: {}", source, e);
                return Vec::new();
            }
        };

        match parse_model_response(&response) {
            Ok(questions) => questions,
            Err(e) => {
                let preview: String = response.chars().take(200).collect();
                tracing::error!("Could not parse model response for {}: {}", source, e);
                tracing::debug!("Response was: {}...", preview);
                Vec::new()
            }
        }
    }
}

/// Documents with the recognized extension in `dir`, sorted by file name.
pub async fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut documents = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_document = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION));
        if !is_document {
            continue;
        }
        if tokio::fs::metadata(&path).await.is_ok_and(|meta| meta.is_file()) {
            documents.push(path);
        }
    }

    documents.sort();
    Ok(documents)
}

/// Reads a document's text on the blocking pool.
async fn read_document(path: PathBuf) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || docx::read_text(&path))
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
}

/// Removes an optional Markdown code fence around the model's answer.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(m) = LEADING_FENCE.find(text) {
        text = &text[m.end()..];
    }
    if let Some(m) = TRAILING_FENCE.find(text) {
        text = &text[..m.start()];
    }
    text.trim()
}

/// Parses the model's answer into validated records.
///
/// The answer must be a JSON array; entries that do not match the record shape
/// or fail validation are dropped.
pub fn parse_model_response(raw: &str) -> Result<Vec<QuestionRecord>, AppError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(strip_code_fence(raw))?;

    let questions = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<QuestionRecord>(entry) {
            Ok(record) => match record.validate() {
                Ok(()) => Some(record),
                Err(e) => {
                    tracing::warn!("Dropping invalid question {:?}: {}", record.question, e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Dropping malformed entry: {}", e);
                None
            }
        })
        .collect();

    Ok(questions)
}

pub fn build_extraction_prompt(text: &str) -> String {
    format!(
        r#"Extract and REFORMAT quiz questions from the following text to make them self-contained and clear.

FILTERING RULES:
- SKIP questions that reference diagrams, images, figures, charts, or tables not included in the text
- SKIP questions containing phrases like "refer to the diagram", "see figure", "as shown in", "the image shows"
- SKIP questions whose answer cannot be determined from the text alone
- SKIP incomplete questions or questions missing answer options

REFORMATTING RULES:
- If a question or answer mentions "A and B", "both A and C", "options 1 and 3" or similar, REWRITE it using the actual content of those options
  Example: "Both A and B are correct" becomes "Both Authentication and Authorization are correct"
- Remove any reference to option letters (A, B, C, D) from the question text
- Make every question standalone, with no cross-references to other questions

For each VALID question return:
1. The question text (keep its number if present)
2. Exactly 4 distinct answer options, in order A, B, C, D
3. The correct answer as exactly ONE letter: A, B, C or D

Return ONLY a JSON array in exactly this format, with no other text:
[
  {{
    "question": "1. What are the main security mechanisms in web applications?",
    "options": ["Authentication and Authorization", "Encryption only", "Firewalls only", "None of the above"],
    "answer": "A"
  }}
]

If an original answer is "A and B are correct", combine them into option A and make that the answer.
If no valid questions are found, return an empty array: []

Text to process:
{text}"#
    )
}
