use crate::config::types::{Config, HistoryConfig, NotifyConfig, SearchConfig, SiteConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_config(&config.search)?;
    validate_site_config(&config.site)?;
    validate_history_config(&config.history)?;
    validate_notify_config(&config.notify)?;
    Ok(())
}

/// Validates the keyword filter configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.keywords.is_empty() {
        return Err(ConfigError::Validation(
            "keywords must contain at least one entry".to_string(),
        ));
    }

    for keyword in &config.keywords {
        if keyword.trim().is_empty() {
            return Err(ConfigError::Validation(
                "keywords must not contain empty entries".to_string(),
            ));
        }

        // Keywords name the history file, so keep them path-safe
        if keyword.contains('/') || keyword.contains('\\') {
            return Err(ConfigError::Validation(format!(
                "keyword '{}' must not contain path separators",
                keyword
            )));
        }
    }

    if config.days_to_check < 1 {
        return Err(ConfigError::Validation(format!(
            "days-to-check must be >= 1, got {}",
            config.days_to_check
        )));
    }

    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    Url::parse(&config.listing_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid listing-url: {}", e)))?;

    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "base-url must have a host".to_string(),
        ));
    }

    if config.detail_path_pattern.is_empty() {
        return Err(ConfigError::Validation(
            "detail-path-pattern cannot be empty".to_string(),
        ));
    }

    if Selector::parse(&config.title_selector).is_err() {
        return Err(ConfigError::Validation(format!(
            "title-selector '{}' is not a valid CSS selector",
            config.title_selector
        )));
    }

    if config.offset_increment < 1 {
        return Err(ConfigError::Validation(format!(
            "offset-increment must be >= 1, got {}",
            config.offset_increment
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch-timeout-secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    Ok(())
}

/// Validates the history storage configuration
fn validate_history_config(config: &HistoryConfig) -> Result<(), ConfigError> {
    if config.dir.is_empty() {
        return Err(ConfigError::Validation(
            "history dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the mail delivery configuration
fn validate_notify_config(config: &NotifyConfig) -> Result<(), ConfigError> {
    if config.smtp_host.is_empty() {
        return Err(ConfigError::Validation(
            "smtp-host cannot be empty".to_string(),
        ));
    }

    if config.smtp_port == 0 {
        return Err(ConfigError::Validation(
            "smtp-port must be non-zero".to_string(),
        ));
    }

    validate_email(&config.from_address)?;
    validate_email(&config.to_address)?;

    if config.password.is_empty() {
        return Err(ConfigError::Validation(
            "password cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email address validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{HistoryConfig, NotifyConfig, SearchConfig, SiteConfig};

    fn valid_config() -> Config {
        Config {
            search: SearchConfig {
                keywords: vec!["monitor".to_string()],
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
                dir: "./history".to_string(),
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
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_keywords_rejected() {
        let mut config = valid_config();
        config.search.keywords.clear();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let mut config = valid_config();
        config.search.keywords.push("  ".to_string());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_keyword_with_path_separator_rejected() {
        let mut config = valid_config();
        config.search.keywords.push("a/b".to_string());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_days_rejected() {
        let mut config = valid_config();
        config.search.days_to_check = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_listing_url_rejected() {
        let mut config = valid_config();
        config.site.listing_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_bad_title_selector_rejected() {
        let mut config = valid_config();
        config.site.title_selector = "h2[[[".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut config = valid_config();
        config.notify.to_address = "not-an-address".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_offset_increment_rejected() {
        let mut config = valid_config();
        config.site.offset_increment = 0;
        assert!(validate(&config).is_err());
    }
}
