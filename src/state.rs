// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    services::{
        explanation::Explainer,
        llm::{CompletionClient, GeminiClient},
        question_store::QuestionStore,
        session_logger::SessionLogger,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: QuestionStore,
    pub logger: SessionLogger,
    pub explainer: Explainer,
}

impl AppState {
    /// Wires the components from `config`, using Gemini when a key is configured.
    pub fn from_config(config: Config) -> Self {
        let client = GeminiClient::from_config(&config)
            .map(|client| Arc::new(client) as Arc<dyn CompletionClient>);
        Self::with_client(config, client)
    }

    /// Same as `from_config` with an explicit model client.
    pub fn with_client(config: Config, client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self {
            store: QuestionStore::new(config.questions_path.clone()),
            logger: SessionLogger::new(config.log_dir.clone()),
            explainer: Explainer::new(client),
            config,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for QuestionStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for SessionLogger {
    fn from_ref(state: &AppState) -> Self {
        state.logger.clone()
    }
}

impl FromRef<AppState> for Explainer {
    fn from_ref(state: &AppState) -> Self {
        state.explainer.clone()
    }
}
