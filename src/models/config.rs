//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Remote feed endpoint paths
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if Url::parse(&self.client.base_url).is_err() {
            return Err(AppError::validation("client.base_url is not a valid URL"));
        }
        if self.client.user_agent.trim().is_empty() {
            return Err(AppError::validation("client.user_agent is empty"));
        }
        if self.client.timeout_secs == 0 {
            return Err(AppError::validation("client.timeout_secs must be > 0"));
        }
        if self.client.prefetch_window == 0 {
            return Err(AppError::validation("client.prefetch_window must be > 0"));
        }
        if self.client.prefetch_concurrent == 0 {
            return Err(AppError::validation(
                "client.prefetch_concurrent must be > 0",
            ));
        }
        for (name, path) in [
            ("endpoints.galleries_path", &self.endpoints.galleries_path),
            ("endpoints.notices_path", &self.endpoints.notices_path),
            ("endpoints.calendar_path", &self.endpoints.calendar_path),
            ("endpoints.contact_path", &self.endpoints.contact_path),
        ] {
            if !path.starts_with('/') {
                return Err(AppError::validation(format!("{name} must start with '/'")));
            }
        }
        Ok(())
    }

    /// Parsed base URL of the content server.
    pub fn base(&self) -> Result<Url> {
        Ok(Url::parse(&self.client.base_url)?)
    }

    /// Absolute URL of the gallery index endpoint.
    pub fn galleries_url(&self) -> String {
        format!("{}{}", self.client.base_url, self.endpoints.galleries_path)
    }

    /// Absolute URL of the notices feed.
    pub fn notices_url(&self) -> String {
        format!("{}{}", self.client.base_url, self.endpoints.notices_path)
    }

    /// Absolute URL of the calendar feed.
    pub fn calendar_url(&self) -> String {
        format!("{}{}", self.client.base_url, self.endpoints.calendar_path)
    }

    /// Absolute URL of the contact form endpoint.
    pub fn contact_url(&self) -> String {
        format!("{}{}", self.client.base_url, self.endpoints.contact_path)
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the content server (no trailing slash)
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Number of not-yet-visible items to prefetch ahead of scroll
    #[serde(default = "defaults::prefetch_window")]
    pub prefetch_window: usize,

    /// Maximum concurrent prefetch requests
    #[serde(default = "defaults::prefetch_concurrent")]
    pub prefetch_concurrent: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            prefetch_window: defaults::prefetch_window(),
            prefetch_concurrent: defaults::prefetch_concurrent(),
        }
    }
}

/// Remote feed endpoint paths, relative to the base URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Gallery index endpoint
    #[serde(default = "defaults::galleries_path")]
    pub galleries_path: String,

    /// Notice feed endpoint
    #[serde(default = "defaults::notices_path")]
    pub notices_path: String,

    /// Calendar feed endpoint
    #[serde(default = "defaults::calendar_path")]
    pub calendar_path: String,

    /// Contact form submission endpoint
    #[serde(default = "defaults::contact_path")]
    pub contact_path: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            galleries_path: defaults::galleries_path(),
            notices_path: defaults::notices_path(),
            calendar_path: defaults::calendar_path(),
            contact_path: defaults::contact_path(),
        }
    }
}

mod defaults {
    // Client defaults
    pub fn base_url() -> String {
        "https://tuenmunpathfinder.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; clubfeed/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn prefetch_window() -> usize {
        10
    }
    pub fn prefetch_concurrent() -> usize {
        5
    }

    // Endpoint defaults
    pub fn galleries_path() -> String {
        "/api/photo-links".into()
    }
    pub fn notices_path() -> String {
        "/notice-data.json".into()
    }
    pub fn calendar_path() -> String {
        "/calendar-data.json".into()
    }
    pub fn contact_path() -> String {
        "/api/send".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.client.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.client.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_relative_endpoint_path() {
        let mut config = Config::default();
        config.endpoints.notices_path = "notice-data.json".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn endpoint_urls_join_base_and_path() {
        let config = Config::default();
        assert_eq!(
            config.galleries_url(),
            "https://tuenmunpathfinder.com/api/photo-links"
        );
        assert_eq!(
            config.notices_url(),
            "https://tuenmunpathfinder.com/notice-data.json"
        );
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [client]
            base_url = "https://staging.example.org"
            "#,
        )
        .unwrap();
        assert_eq!(config.client.base_url, "https://staging.example.org");
        assert_eq!(config.client.timeout_secs, 10);
        assert_eq!(config.endpoints.galleries_path, "/api/photo-links");
    }
}
