//! External services module
//! 
//! This module contains the save file persistence used by the timer state.

pub mod save_file;

// Re-export main functions
pub use save_file::{load, save, DEFAULT_SAVE_FILE};
