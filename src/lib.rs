//! postwatch: an incremental keyword watcher for paginated listing sites
//!
//! This crate walks a paginated listing site, tests each detail page
//! against a keyword filter, and reports only matches that have not been
//! reported before, keeping a flat newest-first history file as the
//! dedup record between runs.

pub mod config;
pub mod crawler;
pub mod history;
pub mod report;

use thiserror::Error;

/// Main error type for postwatch operations
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Extraction error: {0}")]
    Extract(#[from] crawler::ExtractError),

    #[error("History error: {0}")]
    History(#[from] history::HistoryError),

    #[error("Notification error: {0}")]
    Notify(#[from] report::NotifyError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for postwatch operations
pub type Result<T> = std::result::Result<T, WatchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOutcome, Match, RunOutcome, StopReason};
