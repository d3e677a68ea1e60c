// src/config.rs

use std::{env, path::PathBuf, str::FromStr};

use dotenvy::dotenv;

use crate::error::AppError;

/// Value shipped in `.env.example`; treated the same as a missing key.
const API_KEY_PLACEHOLDER: &str = "your-api-key-here";

pub const DEFAULT_NUM_QUESTIONS: usize = 20;
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the Gemini API. `None` disables explanations.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,

    /// Question Store artifact written by `build-questions`.
    pub questions_path: PathBuf,
    /// Input folder scanned by the extraction pipeline.
    pub docs_dir: PathBuf,
    /// Session logs and the rolling application log land here.
    pub log_dir: PathBuf,
    /// Folder holding `quiz_web.html`.
    pub static_dir: PathBuf,

    /// Questions per quiz session.
    pub num_questions: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            questions_path: PathBuf::from("questions.json"),
            docs_dir: PathBuf::from("docs"),
            log_dir: PathBuf::from("logs"),
            static_dir: PathBuf::from("static"),
            num_questions: DEFAULT_NUM_QUESTIONS,
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != API_KEY_PLACEHOLDER);

        Self {
            gemini_api_key,
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            questions_path: env::var("QUESTIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.questions_path),
            docs_dir: env::var("DOCS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.docs_dir),
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            num_questions: parse_or_default("NUM_QUESTIONS", defaults.num_questions),
            port: parse_or_default("PORT", defaults.port),
            rust_log: env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        }
    }

    /// Returns the Gemini credential, or a `Config` error when it is unset.
    pub fn require_api_key(&self) -> Result<&str, AppError> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("GEMINI_API_KEY not set".to_string()))
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value {:?} for {}, using default {}", raw, key, default);
            default
        }),
        Err(_) => default,
    }
}
