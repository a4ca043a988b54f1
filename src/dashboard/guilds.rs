// Guild directory loader
// Fills the guild selector from /api/guilds. A missing endpoint is expected
// while the backend is incomplete; the operator can paste an id instead.

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{ApiRequest, ApiResult, Transport};
use crate::models::GuildSummary;
use crate::utils::config::GUILDS_PATH;

use super::status::StatusReporter;

pub const PLACEHOLDER_LABEL: &str = "Select a server (guild)";

pub const MSG_LOADING: &str = "Loading servers...";
pub const MSG_UNAVAILABLE: &str =
    "Could not fetch servers from backend. Paste Guild ID manually or implement /api/guilds at backend.";
pub const MSG_BAD_SHAPE: &str = "Unexpected response from /api/guilds";
pub const MSG_LOADED: &str = "Servers loaded. Choose one.";

/// One selectable entry; the placeholder has an empty value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildOption {
    pub value: String,
    pub label: String,
}

impl GuildOption {
    fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: PLACEHOLDER_LABEL.to_string(),
        }
    }
}

impl From<GuildSummary> for GuildOption {
    fn from(guild: GuildSummary) -> Self {
        Self {
            value: guild.id,
            label: guild.name,
        }
    }
}

/// The guild selector: options (placeholder first) and the selected value.
/// The selected value is always one of the options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildDirectory {
    options: Vec<GuildOption>,
    selected: String,
}

impl Default for GuildDirectory {
    fn default() -> Self {
        Self {
            options: vec![GuildOption::placeholder()],
            selected: String::new(),
        }
    }
}

impl GuildDirectory {
    pub fn options(&self) -> &[GuildOption] {
        &self.options
    }

    /// Guild entries without the placeholder
    pub fn guilds(&self) -> &[GuildOption] {
        &self.options[1..]
    }

    pub fn label_for(&self, guild_id: &str) -> Option<&str> {
        self.guilds()
            .iter()
            .find(|o| o.value == guild_id)
            .map(|o| o.label.as_str())
    }

    /// Selected guild id; empty while the placeholder is selected
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Select an option by value. Ids not in the list are refused.
    pub fn select(&mut self, guild_id: &str) -> bool {
        if !self.options.iter().any(|o| o.value == guild_id) {
            debug!("guild {} is not in the directory", guild_id);
            return false;
        }
        self.selected = guild_id.to_string();
        true
    }

    /// Drop every entry except the placeholder, which becomes selected
    pub fn clear(&mut self) {
        self.options.truncate(1);
        self.selected.clear();
    }

    /// Replace all entries with `guilds`
    pub fn replace(&mut self, guilds: impl IntoIterator<Item = GuildSummary>) {
        self.clear();
        self.options.extend(guilds.into_iter().map(GuildOption::from));
    }
}

pub async fn fetch_guilds<T: Transport>(transport: &T) -> ApiResult {
    transport.fetch(GUILDS_PATH, ApiRequest::get()).await
}

/// Apply a directory response to the selector and report the outcome
pub fn apply_guilds(result: ApiResult, directory: &mut GuildDirectory, status: &mut StatusReporter) {
    if !result.ok {
        debug!("guild directory unavailable: {:?}", result.error);
        status.error(MSG_UNAVAILABLE);
        return;
    }

    directory.clear();

    let Some(Value::Array(items)) = result.json() else {
        status.error(MSG_BAD_SHAPE);
        return;
    };

    let guilds: Vec<GuildSummary> = items
        .iter()
        .filter_map(|item| {
            let guild = GuildSummary::from_value(item);
            if guild.is_none() {
                warn!("skipping guild entry without an id: {}", item);
            }
            guild
        })
        .collect();

    directory.replace(guilds);
    status.ok(MSG_LOADED);
}

/// Local half of a directory load, before the request goes out
pub fn begin_guilds(status: &mut StatusReporter) {
    status.info(MSG_LOADING);
}

/// Fetch the guild list and repopulate the selector
pub async fn load_guilds<T: Transport>(
    transport: &T,
    directory: &mut GuildDirectory,
    status: &mut StatusReporter,
) {
    begin_guilds(status);
    let result = fetch_guilds(transport).await;
    apply_guilds(result, directory, status);
}
