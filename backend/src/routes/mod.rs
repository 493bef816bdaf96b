//! Route definitions for the planting advisor

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/vegetables", vegetable_routes())
        .route("/advice", get(handlers::get_advice))
        .route("/progress", get(handlers::get_progress))
}

/// Vegetable catalog routes
fn vegetable_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_vegetables))
        .route("/names", get(handlers::list_vegetable_names))
        .route("/:name", get(handlers::get_vegetable))
}
