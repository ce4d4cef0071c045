//! Twin Timer - A state-managed HTTP server driving a two-counter timer
//! 
//! This library holds a minutes counter and a total-seconds counter that can
//! be stepped, reset and auto-ticked independently, with save/load of the
//! whole state to a JSON file.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::PersistError;
pub use state::{AppState, Counter, SaveRecord, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
