use axum::{routing::get, Router};
use models::Settings;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, repository::DocumentRepository};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn DocumentRepository>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(repo: Arc<dyn DocumentRepository>, settings: Settings) -> Self {
        Self {
            repo,
            settings: Arc::new(settings),
        }
    }
}

/// Create the main application router with all dashboard routes
pub fn create_router(state: AppState) -> Router {
    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        // HTML pages
        .route("/pages/:slug", get(handlers::page_html))
        // JSON page models
        .route("/api/pages", get(handlers::navigation))
        .route("/api/pages/:slug", get(handlers::page_json))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
