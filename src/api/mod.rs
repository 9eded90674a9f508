pub mod health;
pub mod options;
pub mod session;
pub mod view;

use axum::{
    routing::{get, post},
    Router,
};

use crate::infrastructure::AppState;

/// JSON API, mounted under `/api`
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Option lists
        .route("/options", get(options::list_options))
        // Session
        .route("/state", get(session::get_state))
        .route("/actions", post(session::dispatch_action))
        .route("/recommendations", post(session::request_recommendation))
        .with_state(state)
}

/// HTML form page and its form posts
pub fn view_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(view::index))
        .route("/select/:field", post(view::select))
        .route("/recommend", post(view::recommend))
        .with_state(state)
}
