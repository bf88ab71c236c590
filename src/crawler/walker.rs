//! Crawl walker - the bounded pagination state machine
//!
//! The walker drives the paginated traversal of the listing site:
//! - fetches each listing page in offset order
//! - fetches and tests every candidate detail page in document order
//! - accumulates new matches against the history snapshot
//! - halts on the first stopping condition encountered
//!
//! Independent bounds guard against unbounded crawling: the history
//! snapshot acts as a hard dedup wall, the oldest-date text marker bounds
//! the lookback window, and the offset ceiling caps the page count even
//! when every post is new or the site's date text changes.

use crate::config::{SearchConfig, SiteConfig};
use crate::crawler::extractor::{extract_candidate_links, match_detail_page, page_text};
use crate::crawler::fetcher::fetch_page;
use crate::WatchError;
use reqwest::Client;
use std::fmt;
use url::Url;

/// A detail page judged relevant because its text contains a keyword
///
/// Immutable once created. The rendered form `"<title>: <link>"` is the
/// match's identity: it is the history file line, the membership probe
/// against the snapshot, and the report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Title text from the detail page's heading element
    pub title: String,

    /// Canonical host+path form of the detail URL
    pub link: String,
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.link)
    }
}

/// The condition that terminated a crawl run
///
/// Exactly one reason terminates each run: the first one encountered in
/// fetch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A rendered match was already present in the history snapshot.
    /// Everything at or beyond it is assumed already known.
    AlreadySeenMatch,

    /// The listing page text contains the oldest-date marker
    OldestDateReached,

    /// The next offset would exceed the configured page ceiling
    OffsetBoundExceeded,

    /// A listing page yielded no candidate links at all
    NoMorePages,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            StopReason::AlreadySeenMatch => "already-seen match",
            StopReason::OldestDateReached => "oldest date reached",
            StopReason::OffsetBoundExceeded => "offset bound exceeded",
            StopReason::NoMorePages => "no more pages",
        };
        write!(f, "{}", reason)
    }
}

/// Result of a completed walk
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Matches not present in the history snapshot, in discovery order
    pub new_matches: Vec<Match>,

    /// The stopping condition that halted the walk
    pub stop_reason: StopReason,

    /// The listing offset at halt; the number of posts looked through
    pub pages_checked: u64,
}

/// Drives one bounded walk over the paginated listing
pub struct Walker<'a> {
    client: &'a Client,
    site: &'a SiteConfig,
    search: &'a SearchConfig,
    oldest_date_marker: String,
}

impl<'a> Walker<'a> {
    /// Creates a walker for one run
    ///
    /// `oldest_date_marker` is the rendered text of the oldest date to
    /// check (today minus the lookback window), computed by the caller so
    /// the walk itself stays clock-free.
    pub fn new(
        client: &'a Client,
        site: &'a SiteConfig,
        search: &'a SearchConfig,
        oldest_date_marker: String,
    ) -> Self {
        Self {
            client,
            site,
            search,
            oldest_date_marker,
        }
    }

    /// Walks the listing until a stopping condition fires
    ///
    /// A listing-page fetch failure aborts the run: without that page no
    /// further offset is meaningful. A detail-page fetch failure or a
    /// matching page with a missing title heading only skips that
    /// candidate; the rest of the run is still valid.
    pub async fn run(&self, snapshot: &str) -> Result<CrawlOutcome, WatchError> {
        let base_url = Url::parse(&self.site.base_url)?;
        let increment = u64::from(self.site.offset_increment);
        let ceiling = self.offset_ceiling();

        let mut offset: u64 = 0;
        let mut new_matches: Vec<Match> = Vec::new();

        loop {
            let listing_url = self.listing_url_for(offset);
            tracing::debug!("fetching listing page: {}", listing_url);
            let listing_html = fetch_page(self.client, &listing_url).await?;

            let candidates = extract_candidate_links(&listing_html, &self.site.detail_path_pattern);
            tracing::debug!("{} candidate links at offset {}", candidates.len(), offset);

            for href in &candidates {
                let detail_url = match base_url.join(href) {
                    Ok(resolved) => resolved,
                    Err(e) => {
                        tracing::debug!("ignoring unresolvable href '{}': {}", href, e);
                        continue;
                    }
                };

                let detail_html = match fetch_page(self.client, detail_url.as_str()).await {
                    Ok(body) => body,
                    Err(e) => {
                        tracing::warn!("skipping candidate {}: {}", detail_url, e);
                        continue;
                    }
                };

                let title = match match_detail_page(
                    &detail_html,
                    &self.search.keywords,
                    &self.site.title_selector,
                ) {
                    Ok(Some(title)) => title,
                    Ok(None) => continue,
                    Err(e) => {
                        tracing::warn!("skipping candidate {}: {}", detail_url, e);
                        continue;
                    }
                };

                let found = Match {
                    title,
                    link: display_link(&detail_url),
                };
                let rendered = found.to_string();

                if snapshot.contains(&rendered) {
                    // Everything from here back is already reported
                    tracing::info!("reached previously reported match: {}", rendered);
                    return Ok(CrawlOutcome {
                        new_matches,
                        stop_reason: StopReason::AlreadySeenMatch,
                        pages_checked: offset,
                    });
                }

                if new_matches.iter().any(|m| m.to_string() == rendered) {
                    tracing::debug!("duplicate listing for {}", rendered);
                    continue;
                }

                tracing::info!("new match: {}", rendered);
                new_matches.push(found);
            }

            if page_text(&listing_html).contains(&self.oldest_date_marker) {
                tracing::info!("listing page reached date marker '{}'", self.oldest_date_marker);
                return Ok(CrawlOutcome {
                    new_matches,
                    stop_reason: StopReason::OldestDateReached,
                    pages_checked: offset,
                });
            }

            if candidates.is_empty() {
                tracing::info!("listing page at offset {} has no posts", offset);
                return Ok(CrawlOutcome {
                    new_matches,
                    stop_reason: StopReason::NoMorePages,
                    pages_checked: offset,
                });
            }

            if offset + increment > ceiling {
                tracing::info!(
                    "next offset {} would exceed ceiling {}",
                    offset + increment,
                    ceiling
                );
                return Ok(CrawlOutcome {
                    new_matches,
                    stop_reason: StopReason::OffsetBoundExceeded,
                    pages_checked: offset,
                });
            }

            offset += increment;
        }
    }

    /// Listing URL for a given offset
    ///
    /// Offset 0 is the bare listing URL; later pages append the offset as
    /// a query parameter.
    fn listing_url_for(&self, offset: u64) -> String {
        if offset == 0 {
            self.site.listing_url.clone()
        } else {
            format!("{}?offset={}", self.site.listing_url, offset)
        }
    }

    /// Hard page-count ceiling: twice the lookback days' worth of pages
    fn offset_ceiling(&self) -> u64 {
        u64::from(self.site.offset_increment) * 2 * u64::from(self.search.days_to_check)
    }
}

/// Canonical display form of a detail URL: host plus path
///
/// A non-default port is kept so the form stays unambiguous. This is the
/// form persisted in the history file, e.g. `supost.com/post/index/1`.
fn display_link(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}{}", host, port, url.path()),
        None => format!("{}{}", host, url.path()),
    }
}
