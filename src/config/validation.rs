use crate::config::types::{Config, CrawlerConfig, HttpConfig, UserAgentConfig};
use crate::{ConfigError, ConfigResult};

/// Upper bound on the fan-out limit
const MAX_FAN_OUT: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > MAX_FAN_OUT {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and {}, got {}",
            MAX_FAN_OUT, config.max_concurrent_fetches
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP transport configuration
fn validate_http_config(config: &HttpConfig) -> ConfigResult<()> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_fan_out_bounds() {
        let mut config = Config::default();

        config.crawler.max_concurrent_fetches = 0;
        assert!(validate(&config).is_err());

        config.crawler.max_concurrent_fetches = MAX_FAN_OUT + 1;
        assert!(validate(&config).is_err());

        config.crawler.max_concurrent_fetches = 1;
        assert!(validate(&config).is_ok());

        config.crawler.max_concurrent_fetches = MAX_FAN_OUT;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_crawler_name() {
        let mut config = Config::default();

        config.user_agent.crawler_name = "site-mapper2".to_string();
        assert!(validate(&config).is_ok());

        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = "bad name/1".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_crawler_version() {
        let mut config = Config::default();
        config.user_agent.crawler_version = "  ".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_timeouts() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.http.connect_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }
}
