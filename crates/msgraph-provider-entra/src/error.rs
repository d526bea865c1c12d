//! Error types for the Microsoft Graph provider.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias using `EntraError`.
pub type EntraResult<T> = Result<T, EntraError>;

/// Errors that can occur when talking to Microsoft Graph.
#[derive(Debug, Error)]
pub enum EntraError {
    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `OAuth2` authentication error.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Microsoft Graph API error.
    #[error("Graph API error: {code} - {message}")]
    GraphApi {
        status: u16,
        code: String,
        message: String,
        inner_error: Option<String>,
    },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<ConfigError> for EntraError {
    fn from(e: ConfigError) -> Self {
        EntraError::Config(e.to_string())
    }
}

impl EntraError {
    /// Check whether the error came from an HTTP status the API returned.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            EntraError::GraphApi { status, .. } => Some(*status),
            EntraError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
