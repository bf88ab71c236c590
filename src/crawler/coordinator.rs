//! Run coordinator - composes one complete watch run
//!
//! The coordinator ties the pieces together in a fixed order:
//! load the history snapshot, walk the listing, prepend any new matches
//! to the history, then compose and deliver the report. The ordering
//! carries the consistency guarantees: a failed history write prevents
//! delivery (so a match is never mailed without being persisted), while a
//! failed delivery after the write loses no durable progress.

use crate::config::Config;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::walker::{Match, StopReason, Walker};
use crate::history;
use crate::report::{compose, subject_line, Notifier};
use crate::WatchError;
use chrono::{Local, NaiveDate};

/// Result of one complete watch run
#[derive(Debug)]
pub struct RunOutcome {
    /// Matches found this run, in discovery order
    pub new_matches: Vec<Match>,

    /// The condition that halted the crawl
    pub stop_reason: StopReason,

    /// Number of posts looked through
    pub pages_checked: u64,

    /// Whether a notification was sent
    pub delivered: bool,
}

/// Runs one complete watch: crawl, persist, notify
///
/// With no new matches the history file is left untouched and the
/// notifier is never invoked. With new matches the history is updated
/// first; a delivery failure after that point surfaces as an error but
/// the matches stay persisted, so the next run will not re-report them.
pub async fn run_watch(config: &Config, notifier: &dyn Notifier) -> Result<RunOutcome, WatchError> {
    let history_path = config.history_path();
    tracing::info!("loading history from {}", history_path.display());
    let previous_text = history::load(&history_path)?;

    let client = build_http_client(&config.site)?;
    let marker = oldest_date_marker(Local::now().date_naive(), config.search.days_to_check);
    tracing::debug!("oldest-date marker: '{}'", marker);

    let walker = Walker::new(&client, &config.site, &config.search, marker);
    let outcome = walker.run(&previous_text).await?;

    tracing::info!(
        "crawl halted ({}): {} new matches across {} posts",
        outcome.stop_reason,
        outcome.new_matches.len(),
        outcome.pages_checked
    );

    if outcome.new_matches.is_empty() {
        return Ok(RunOutcome {
            new_matches: outcome.new_matches,
            stop_reason: outcome.stop_reason,
            pages_checked: outcome.pages_checked,
            delivered: false,
        });
    }

    let new_lines: Vec<String> = outcome.new_matches.iter().map(Match::to_string).collect();
    history::prepend(&history_path, &new_lines, &previous_text)?;
    tracing::info!("recorded {} new matches in history", new_lines.len());

    let body = compose(
        &outcome.new_matches,
        &config.search.keywords,
        outcome.pages_checked,
        &previous_text,
    );
    notifier.send(&subject_line(Local::now()), &body).await?;
    tracing::info!("notification sent to {}", config.notify.to_address);

    Ok(RunOutcome {
        new_matches: outcome.new_matches,
        stop_reason: outcome.stop_reason,
        pages_checked: outcome.pages_checked,
        delivered: true,
    })
}

/// Renders the oldest date to check as listing pages print it
///
/// Today minus the lookback window, in weekday/month/day form
/// (e.g. "Wed, Aug 05"). Finding this string in a listing page's text
/// means the walk has looked back far enough.
pub fn oldest_date_marker(today: NaiveDate, days_to_check: u32) -> String {
    let oldest = today - chrono::Duration::days(i64::from(days_to_check));
    oldest.format("%a, %b %d").to_string()
}
