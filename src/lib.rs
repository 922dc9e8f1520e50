//! Fix-On community service.
//!
//! Hosts the community topic browser over a JSON API backed by SQLite, and provides the
//! PWA install-prompt controller used by client shells.

pub mod api;
pub mod browser;
pub mod config;
pub mod db;
pub mod errors;
pub mod install;
pub mod models;
pub mod nav;
pub mod storage;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Topics
        .route("/topics", get(api::list_topics).post(api::create_topic))
        .route("/topics/{id}", get(api::get_topic))
        // Categories
        .route("/categories", get(api::list_categories));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
