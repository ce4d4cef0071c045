//! Background tasks module
//! 
//! This module contains the tick loops that advance the counters alongside the HTTP server.

pub mod tick_loop;

// Re-export main functions
pub use tick_loop::tick_loop_task;
