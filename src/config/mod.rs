//! Configuration module for postwatch
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use postwatch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Watching for: {:?}", config.search.keywords);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HistoryConfig, NotifyConfig, SearchConfig, SiteConfig};

// Re-export parser functions
pub use parser::load_config;
