use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

// Service info and health probes
pub fn status_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::api::root))
        .route("/health", get(handlers::api::health))
}

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/generate-sql", post(handlers::api::generate_sql))
}
