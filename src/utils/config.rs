// Centralized configuration for the dashboard controller

use std::time::Duration;

use reqwest::Url;

use crate::error::SettingsError;

/// Backend used when DASHBOARD_API_BASE is not set
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:3000";

/// Request timeout used when DASHBOARD_TIMEOUT_SECS is not set
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const USER_AGENT: &str = "Guild-Dashboard/0.1";

/// Guild directory endpoint
pub const GUILDS_PATH: &str = "/api/guilds";

/// OAuth redirect target, only ever opened as a full-page navigation
pub const LOGIN_PATH: &str = "/auth/discord";

/// Per-guild config endpoint (GET and POST)
pub fn guild_config_path(guild_id: &str) -> String {
    format!("/api/guild/{}/config", urlencoding::encode(guild_id))
}

/// Status line colors, keyed by severity
pub mod colors {
    pub const OK: &str = "#bbf7d0";
    pub const ERROR: &str = "#fca5a5";
}

/// Runtime settings for the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Absolute base URL without a trailing slash
    pub api_base: String,
    pub timeout: Duration,
    /// Optional `name=value` cookie carrying an existing session
    pub session_cookie: Option<String>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_cookie: None,
        }
    }
}

impl DashboardSettings {
    /// Load settings from the process environment (after `.env`)
    pub fn from_env() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = match lookup("DASHBOARD_API_BASE") {
            Some(raw) if !raw.trim().is_empty() => normalize_api_base(&raw)?,
            _ => DEFAULT_API_BASE.to_string(),
        };

        let timeout = match lookup("DASHBOARD_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| SettingsError::InvalidTimeout(raw.clone()))?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let session_cookie = lookup("DASHBOARD_SESSION_COOKIE")
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            api_base,
            timeout,
            session_cookie,
        })
    }

    /// Full URL of the OAuth login redirect
    pub fn login_url(&self) -> String {
        format!("{}{}", self.api_base, LOGIN_PATH)
    }
}

/// Validate the base URL and strip trailing slashes
fn normalize_api_base(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| SettingsError::InvalidApiBase {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(SettingsError::InvalidApiBase {
            value: raw.to_string(),
            reason: "expected an http or https URL".to_string(),
        });
    }

    Ok(trimmed.to_string())
}
