//! HTTP API module
//!
//! This module contains the HTTP endpoints that drive the timer and their response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/:counter/increment", post(increment_handler))
        .route("/:counter/decrement", post(decrement_handler))
        .route("/:counter/reset", post(reset_handler))
        .route("/:counter/toggle", post(toggle_handler))
        .route("/save", post(save_handler))
        .route("/load", post(load_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
