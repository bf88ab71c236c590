use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure for postwatch
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub search: SearchConfig,
    pub site: SiteConfig,
    pub history: HistoryConfig,
    pub notify: NotifyConfig,
}

/// Keyword filter configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Keywords to search for (logical OR, case-insensitive substring)
    pub keywords: Vec<String>,

    /// Number of days back to search
    #[serde(rename = "days-to-check")]
    pub days_to_check: u32,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Listing (search index) URL; offset 0 uses this URL bare,
    /// later pages append an offset query parameter
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// Base URL against which detail-page hrefs are resolved
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path fragment that identifies a detail-page link
    #[serde(rename = "detail-path-pattern")]
    pub detail_path_pattern: String,

    /// CSS selector for the detail page's title heading
    #[serde(rename = "title-selector")]
    pub title_selector: String,

    /// Pagination step (posts per listing page)
    #[serde(rename = "offset-increment", default = "default_offset_increment")]
    pub offset_increment: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

/// Match history storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Directory holding the per-keyword-set history files
    pub dir: String,
}

/// Mail delivery configuration
///
/// Credentials live here and are passed in at call time, never compiled in.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    #[serde(rename = "smtp-host")]
    pub smtp_host: String,

    #[serde(rename = "smtp-port")]
    pub smtp_port: u16,

    /// Address to send from; also the SMTP login user
    #[serde(rename = "from-address")]
    pub from_address: String,

    #[serde(rename = "to-address")]
    pub to_address: String,

    /// Password for the from address
    pub password: String,
}

fn default_offset_increment() -> u32 {
    99
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Path of the history file for this keyword set
    ///
    /// One file per keyword set, so changing the keywords starts a fresh
    /// history rather than polluting an existing one.
    pub fn history_path(&self) -> PathBuf {
        let name = format!("watch-{}.log", self.search.keywords.join("-"));
        Path::new(&self.history.dir).join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keywords(keywords: Vec<String>) -> Config {
        Config {
            search: SearchConfig {
                keywords,
                days_to_check: 5,
            },
            site: SiteConfig {
                listing_url: "http://supost.com/search/index/5".to_string(),
                base_url: "http://supost.com".to_string(),
                detail_path_pattern: "post/index".to_string(),
                title_selector: "h2#posttitle".to_string(),
                offset_increment: 99,
                fetch_timeout_secs: 30,
            },
            history: HistoryConfig {
                dir: "/var/lib/postwatch".to_string(),
            },
            notify: NotifyConfig {
                smtp_host: "smtp.example.com".to_string(),
                smtp_port: 587,
                from_address: "from@example.com".to_string(),
                to_address: "to@example.com".to_string(),
                password: "secret".to_string(),
            },
        }
    }

    #[test]
    fn test_history_path_single_keyword() {
        let config = config_with_keywords(vec!["monitor".to_string()]);
        assert_eq!(
            config.history_path(),
            Path::new("/var/lib/postwatch/watch-monitor.log")
        );
    }

    #[test]
    fn test_history_path_joins_keywords() {
        let config = config_with_keywords(vec!["desk".to_string(), "chair".to_string()]);
        assert_eq!(
            config.history_path(),
            Path::new("/var/lib/postwatch/watch-desk-chair.log")
        );
    }
}
