// src/bin/build_questions.rs

use std::sync::Arc;

use dotenvy::dotenv;
use quiz_backend::config::Config;
use quiz_backend::services::{
    extraction::ExtractionPipeline, llm::GeminiClient, question_store::QuestionStore,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const RULE: &str = "============================================================";

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.rust_log))
        .with(fmt::layer().with_writer(std::io::stdout).with_target(false))
        .init();

    let api_key = match config.require_api_key() {
        Ok(key) => key.to_string(),
        Err(_) => {
            eprintln!("{RULE}");
            eprintln!("ERROR: GEMINI_API_KEY not set");
            eprintln!("{RULE}");
            eprintln!("\n1. Get your API key from:");
            eprintln!("   https://makersuite.google.com/app/apikey");
            eprintln!("\n2. Create a .env file in this directory with:");
            eprintln!("   GEMINI_API_KEY=your-actual-key-here");
            eprintln!("\n   Or copy .env.example to .env and edit it");
            eprintln!("{RULE}");
            std::process::exit(1);
        }
    };

    let client = GeminiClient::new(
        api_key,
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
    );
    let store = QuestionStore::new(config.questions_path.clone());
    let pipeline = ExtractionPipeline::new(Arc::new(client), store);

    println!("Building {} from {}...\n", config.questions_path.display(), config.docs_dir.display());

    match pipeline.run(&config.docs_dir).await {
        Ok(summary) => {
            println!("\n{RULE}");
            println!("Documents processed: {}", summary.documents_processed);
            println!("Documents skipped: {}", summary.documents_skipped);
            println!("Total questions extracted: {}", summary.questions_extracted);
            println!("Saved to: {}", summary.output_path.display());
            println!("{RULE}");
        }
        Err(e) => {
            tracing::error!("Extraction failed: {}", e);
            std::process::exit(1);
        }
    }
}
