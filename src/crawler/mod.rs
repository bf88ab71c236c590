//! Crawler module for listing traversal and match extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with error classification
//! - Candidate-link and title extraction from HTML
//! - The bounded pagination walk with its stopping conditions
//! - Overall run coordination

mod coordinator;
mod extractor;
mod fetcher;
mod walker;

pub use coordinator::{oldest_date_marker, run_watch, RunOutcome};
pub use extractor::{extract_candidate_links, match_detail_page, page_text, ExtractError};
pub use fetcher::{build_http_client, fetch_page, FetchError};
pub use walker::{CrawlOutcome, Match, StopReason, Walker};
