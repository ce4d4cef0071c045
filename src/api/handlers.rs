//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{AppState, Counter};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

fn parse_counter(name: &str) -> Result<Counter, StatusCode> {
    Counter::from_name(name).ok_or_else(|| {
        warn!("Unknown counter requested: {}", name);
        StatusCode::NOT_FOUND
    })
}

/// Handle POST /:counter/increment - the "++" button
pub async fn increment_handler(
    State(state): State<Arc<AppState>>,
    Path(counter): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let counter = parse_counter(&counter)?;
    let timer = state.increment(counter);
    state.record_action(&format!("{}-increment", counter));
    info!("Incremented {} to {}", counter, timer.value(counter));
    Ok(Json(ApiResponse::ok(format!("{} incremented", counter), timer)))
}

/// Handle POST /:counter/decrement - the "--" button
pub async fn decrement_handler(
    State(state): State<Arc<AppState>>,
    Path(counter): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let counter = parse_counter(&counter)?;
    let timer = state.decrement(counter);
    state.record_action(&format!("{}-decrement", counter));
    info!("Decremented {} to {}", counter, timer.value(counter));
    Ok(Json(ApiResponse::ok(format!("{} decremented", counter), timer)))
}

/// Handle POST /:counter/reset - clicking the count itself
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Path(counter): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let counter = parse_counter(&counter)?;
    let timer = state.reset(counter);
    state.record_action(&format!("{}-reset", counter));
    info!("Reset {}", counter);
    Ok(Json(ApiResponse::ok(format!("{} reset", counter), timer)))
}

/// Handle POST /:counter/toggle - play/pause
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
    Path(counter): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let counter = parse_counter(&counter)?;
    let running = state.toggle(counter);
    state.record_action(&format!("{}-toggle", counter));

    let message = if running {
        format!("{} running", counter)
    } else {
        format!("{} paused", counter)
    };
    Ok(Json(ApiResponse::ok(message, state.snapshot())))
}

/// Handle POST /save - "Save to File"
pub async fn save_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.record_action("save");
    match state.save_to_file(&state.save_path).await {
        Ok(_) => Json(ApiResponse::ok(
            format!("Saved to {}", state.save_path.display()),
            state.snapshot(),
        )),
        Err(e) => {
            error!("Failed to save timer state: {}", e);
            Json(ApiResponse::error(e.to_string(), state.snapshot()))
        }
    }
}

/// Handle POST /load - "Load from File"
pub async fn load_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.record_action("load");
    match state.load_from_file(&state.save_path).await {
        Ok(_) => Json(ApiResponse::ok(
            format!("Loaded from {}", state.save_path.display()),
            state.snapshot(),
        )),
        Err(e) => {
            warn!("Failed to load timer state: {}", e);
            Json(ApiResponse::error(e.to_string(), state.snapshot()))
        }
    }
}

/// Handle GET /status - Return both counters and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.snapshot(),
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
