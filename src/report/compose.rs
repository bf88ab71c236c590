use crate::crawler::Match;
use chrono::{DateTime, Local};

/// Builds the notification body
///
/// The layout is deterministic: a header naming the keyword set, the
/// posts-checked count and the new-match count, one rendered match per
/// line in discovery order, then the full previous history verbatim so
/// the message is self-contained.
pub fn compose(
    new_matches: &[Match],
    keywords: &[String],
    pages_checked: u64,
    previous_text: &str,
) -> String {
    let mut body = format!("Keywords used: {:?}\n\n", keywords);
    body.push_str(&format!(
        "We checked through {} posts, and found {} new matches:\n",
        pages_checked,
        new_matches.len()
    ));

    for found in new_matches {
        body.push_str(&found.to_string());
        body.push('\n');
    }

    body.push_str("\nHere are your old matches:\n");
    body.push_str(previous_text);

    body
}

/// Timestamped subject line for the notification
pub fn subject_line(now: DateTime<Local>) -> String {
    format!("POSTWATCH [{}]", now.format("%m/%d/%y %H:%M:%S"))
}
