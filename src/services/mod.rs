// src/services/mod.rs

pub mod explanation;
pub mod extraction;
pub mod llm;
pub mod question_store;
pub mod scorer;
pub mod session_builder;
pub mod session_logger;
pub mod shuffler;
