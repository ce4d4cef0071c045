//! Twin Timer - A state-managed HTTP server driving a two-counter timer
//! 
//! This is the main entry point for the twin-timer application.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use twin_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("twin_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting twin-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, save_file={}",
          config.host, config.port, config.save_file.display());

    let state = Arc::new(AppState::with_save_path(config.save_file.clone()));
    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /{{minutes|seconds}}/increment - Add one");
    info!("  POST /{{minutes|seconds}}/decrement - Subtract one");
    info!("  POST /{{minutes|seconds}}/reset     - Set to zero");
    info!("  POST /{{minutes|seconds}}/toggle    - Start or pause auto-tick");
    info!("  POST /save                          - Save to {}", config.save_file.display());
    info!("  POST /load                          - Load from {}", config.save_file.display());
    info!("  GET  /status                        - Current counters");
    info!("  GET  /health                        - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.stop_all();
    info!("Server shutdown complete");
    Ok(())
}
