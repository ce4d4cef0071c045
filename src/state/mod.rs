//! State management module
//! 
//! This module contains the timer state structures and their management logic.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{Counter, SaveRecord, TimerState};
