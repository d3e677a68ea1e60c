// src/routes.rs

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};

use crate::{handlers::quiz, state::AppState};

/// File name of the browser client inside `static_dir`.
pub const QUIZ_PAGE: &str = "quiz_web.html";

/// Assembles the main application router.
///
/// * Quiz API under `/api`.
/// * The quiz page at `/` and `/quiz_web.html`.
/// * Global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let page = state.config.static_dir.join(QUIZ_PAGE);

    let api_routes = Router::new()
        .route("/start-quiz", get(quiz::start_quiz))
        .route("/submit-quiz", post(quiz::submit_quiz));

    Router::new()
        .nest("/api", api_routes)
        .route_service("/", ServeFile::new(&page))
        .route_service("/quiz_web.html", ServeFile::new(&page))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
