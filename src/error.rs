// Local error types
// Network and endpoint failures are never errors here: they travel as ApiResult.

use thiserror::Error;

/// Problems with the dashboard settings read at startup
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid API base URL '{value}': {reason}")]
    InvalidApiBase { value: String, reason: String },

    #[error("invalid request timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A navigation key that names no dashboard page
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown page '{0}'")]
pub struct UnknownPage(pub String);

/// A form key that names no config field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown config field '{0}'")]
pub struct UnknownField(pub String);
