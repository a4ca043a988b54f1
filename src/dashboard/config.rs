// Config loader and saver
// Load fills the form with defaults for missing fields; save validates
// locally before any network call and posts the normalized config.

use reqwest::Method;
use tracing::{debug, error, info};

use crate::api::{ApiRequest, ApiResult, Transport};
use crate::models::{ConfigForm, GuildConfig, PartialGuildConfig};
use crate::utils::config::guild_config_path;

use super::status::StatusReporter;

pub const MSG_NO_GUILD: &str = "No guild selected.";
pub const MSG_LOADING: &str = "Loading server configuration...";
pub const MSG_NOT_FOUND: &str = "No config found or endpoint missing. You can still save a new config.";
pub const MSG_LOADED: &str = "Configuration loaded.";

pub const MSG_MISSING_ID: &str = "Please select or paste a Guild ID first.";
pub const MSG_SAVING: &str = "Saving configuration...";
pub const MSG_SAVE_FAILED: &str = "Failed to save config. Check backend logs or endpoint.";
pub const MSG_SAVED: &str = "Configuration saved successfully.";

pub async fn fetch_config<T: Transport>(transport: &T, guild_id: &str) -> ApiResult {
    transport
        .fetch(&guild_config_path(guild_id), ApiRequest::get())
        .await
}

/// Apply a config response to the form and report the outcome
pub fn apply_config(result: ApiResult, form: &mut ConfigForm, status: &mut StatusReporter) {
    if !result.ok {
        debug!("no config loaded: {:?}", result.error);
        status.error(MSG_NOT_FOUND);
        return;
    }

    let partial = PartialGuildConfig::from_payload(result.payload.as_ref());
    form.fill(&partial);
    status.ok(MSG_LOADED);
}

/// Local half of a load: `false` means no request may go out
pub fn begin_load(guild_id: &str, status: &mut StatusReporter) -> bool {
    if guild_id.is_empty() {
        status.info(MSG_NO_GUILD);
        return false;
    }
    status.info(MSG_LOADING);
    true
}

/// Load one guild's config into the form. An empty id is a no-op.
pub async fn load_config<T: Transport>(
    transport: &T,
    guild_id: &str,
    form: &mut ConfigForm,
    status: &mut StatusReporter,
) {
    if !begin_load(guild_id, status) {
        return;
    }

    let result = fetch_config(transport, guild_id).await;
    apply_config(result, form, status);
}

/// Pick the guild to save to: the selector wins, then the trimmed manual id
pub fn resolve_guild_id(selected: Option<&str>, manual: &str) -> Option<String> {
    match selected {
        Some(id) if !id.is_empty() => Some(id.to_string()),
        _ => {
            let manual = manual.trim();
            (!manual.is_empty()).then(|| manual.to_string())
        }
    }
}

/// A save ready to go out: resolved guild and normalized config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub guild_id: String,
    pub config: GuildConfig,
}

impl SavePlan {
    /// Validate locally; `None` means no network call may happen
    pub fn prepare(selected: Option<&str>, manual: &str, form: &ConfigForm) -> Option<Self> {
        let guild_id = resolve_guild_id(selected, manual)?;
        Some(Self {
            guild_id,
            config: form.to_config(),
        })
    }
}

/// Local half of a save: validate and report, `None` means no request
pub fn begin_save(
    selected: Option<&str>,
    manual: &str,
    form: &ConfigForm,
    status: &mut StatusReporter,
) -> Option<SavePlan> {
    let Some(plan) = SavePlan::prepare(selected, manual, form) else {
        status.error(MSG_MISSING_ID);
        return None;
    };
    status.info(MSG_SAVING);
    Some(plan)
}

/// Post the config; `false` for any non-success outcome
pub async fn post_config<T: Transport>(transport: &T, plan: &SavePlan) -> bool {
    let request = match ApiRequest::json(Method::POST, &plan.config) {
        Ok(request) => request,
        Err(e) => {
            error!("Failed to serialize config for guild {}: {}", plan.guild_id, e);
            return false;
        }
    };

    let result = transport
        .fetch(&guild_config_path(&plan.guild_id), request)
        .await;
    if !result.ok {
        debug!("save failed for guild {}: {:?}", plan.guild_id, result.error);
    }
    result.ok
}

pub fn apply_save(saved: bool, guild_id: &str, status: &mut StatusReporter) {
    if saved {
        info!("Saved config for guild {}", guild_id);
        status.ok(MSG_SAVED);
    } else {
        status.error(MSG_SAVE_FAILED);
    }
}

/// Validate, serialize and post the form for the resolved guild
pub async fn save_config<T: Transport>(
    transport: &T,
    selected: Option<&str>,
    manual: &str,
    form: &ConfigForm,
    status: &mut StatusReporter,
) {
    let Some(plan) = begin_save(selected, manual, form, status) else {
        return;
    };

    let saved = post_config(transport, &plan).await;
    apply_save(saved, &plan.guild_id, status);
}
