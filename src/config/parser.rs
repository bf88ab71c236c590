use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[search]
keywords = ["monitor", "desk"]
days-to-check = 5

[site]
listing-url = "http://supost.com/search/index/5"
base-url = "http://supost.com"
detail-path-pattern = "post/index"
title-selector = "h2#posttitle"

[history]
dir = "./history"

[notify]
smtp-host = "smtp.example.com"
smtp-port = 587
from-address = "from@example.com"
to-address = "to@example.com"
password = "secret"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.search.keywords, vec!["monitor", "desk"]);
        assert_eq!(config.search.days_to_check, 5);
        // Defaults apply when omitted
        assert_eq!(config.site.offset_increment, 99);
        assert_eq!(config.site.fetch_timeout_secs, 30);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[search]
keywords = []
days-to-check = 5

[site]
listing-url = "http://supost.com/search/index/5"
base-url = "http://supost.com"
detail-path-pattern = "post/index"
title-selector = "h2#posttitle"

[history]
dir = "./history"

[notify]
smtp-host = "smtp.example.com"
smtp-port = 587
from-address = "from@example.com"
to-address = "to@example.com"
password = "secret"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
