//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::services::DEFAULT_SAVE_FILE;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "twin-timer")]
#[command(about = "A state-managed HTTP server driving a two-counter minutes/seconds timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// File used by "save" and "load"
    #[arg(long, default_value = DEFAULT_SAVE_FILE)]
    pub save_file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
