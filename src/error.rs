// src/error.rs

//! Unified error handling for the club content client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport failure or non-2xx response on a feed fetch
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    /// Response body did not match the expected shape
    #[error("decode error for {url}: {message}")]
    Decode { url: String, message: String },

    /// Request exceeded the configured deadline
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed outside a feed fetch
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a network error for a request URL.
    pub fn network(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a decode error for a request URL.
    pub fn decode(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Classify a reqwest error for a request URL.
    ///
    /// Deadline expiry maps to `Timeout`; everything else (DNS, TLS,
    /// connect, body read) is a transport-level `Network` error.
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::network(url, error)
        }
    }

    /// Whether this error is a network-level failure (transport or timeout).
    ///
    /// Decode errors are excluded: a malformed body means the server
    /// answered, so a cached fallback must not hide it.
    pub fn is_network_failure(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failure_classification() {
        assert!(AppError::network("https://x", "boom").is_network_failure());
        assert!(
            AppError::Timeout {
                url: "https://x".into()
            }
            .is_network_failure()
        );
        assert!(!AppError::decode("https://x", "bad json").is_network_failure());
        assert!(!AppError::config("oops").is_network_failure());
    }
}
