// Dashboard controller
// Owns the whole UI state and turns UI events into loads, saves and page
// switches. Network calls run without holding the state lock, so the UI
// stays usable while a request is outstanding.

pub mod config;
pub mod guilds;
pub mod navigation;
pub mod status;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::api::Transport;
use crate::models::{ConfigField, ConfigForm};
use crate::utils::config::DashboardSettings;
use crate::utils::formatters::welcome_preview;

use self::config::{apply_config, apply_save, begin_load, begin_save, fetch_config, post_config};
use self::guilds::{apply_guilds, begin_guilds, fetch_guilds, GuildDirectory};
use self::navigation::{Navigator, Page};
use self::status::StatusReporter;

pub const MSG_READY: &str = "Ready. Connect your Discord account to load servers (if implemented).";

/// Everything the page renders
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub status: StatusReporter,
    pub navigator: Navigator,
    pub directory: GuildDirectory,
    pub form: ConfigForm,
    /// Guild id typed by hand
    pub manual_guild: String,
    config_generation: u64,
    directory_generation: u64,
}

/// Shared handle to the dashboard; clones see the same state
pub struct Dashboard<T> {
    transport: Arc<T>,
    state: Arc<RwLock<DashboardState>>,
    login_url: String,
}

impl<T> Clone for Dashboard<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            state: self.state.clone(),
            login_url: self.login_url.clone(),
        }
    }
}

impl<T: Transport> Dashboard<T> {
    pub fn new(transport: Arc<T>, settings: &DashboardSettings) -> Self {
        Self {
            transport,
            state: Arc::new(RwLock::new(DashboardState::default())),
            login_url: settings.login_url(),
        }
    }

    /// Copy of the current state for rendering
    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Startup: overview page, guild directory, then the ready message
    pub async fn init(&self) {
        self.navigate(Page::Overview).await;
        self.reload_guilds().await;
        self.state.write().await.status.info(MSG_READY);
    }

    pub async fn navigate(&self, page: Page) {
        self.state.write().await.navigator.activate(page);
    }

    /// Reload the guild directory; an older reload finishing late is ignored
    pub async fn reload_guilds(&self) {
        let generation = {
            let mut state = self.state.write().await;
            state.directory_generation += 1;
            begin_guilds(&mut state.status);
            state.directory_generation
        };

        let result = fetch_guilds(&*self.transport).await;

        let mut state = self.state.write().await;
        if state.directory_generation != generation {
            debug!("dropping stale guild directory response");
            return;
        }
        let state = &mut *state;
        apply_guilds(result, &mut state.directory, &mut state.status);
    }

    /// Guild selector changed; ids missing from the directory are ignored
    pub async fn select_guild(&self, guild_id: &str) {
        {
            let mut state = self.state.write().await;
            if !state.directory.select(guild_id) || guild_id.is_empty() {
                return;
            }
            state.manual_guild.clear();
        }
        self.load_config(guild_id).await;
    }

    /// Manual guild id field changed
    pub async fn enter_manual_guild(&self, guild_id: &str) {
        self.state.write().await.manual_guild = guild_id.to_string();
        let trimmed = guild_id.trim();
        if !trimmed.is_empty() {
            self.load_config(trimmed).await;
        }
    }

    /// Load a guild's config into the form.
    /// Only the most recently started load may write its result.
    pub async fn load_config(&self, guild_id: &str) {
        let generation = {
            let mut state = self.state.write().await;
            if !begin_load(guild_id, &mut state.status) {
                return;
            }
            state.config_generation += 1;
            state.config_generation
        };

        let result = fetch_config(&*self.transport, guild_id).await;

        let mut state = self.state.write().await;
        if state.config_generation != generation {
            debug!("dropping stale config response for guild {}", guild_id);
            return;
        }
        let state = &mut *state;
        apply_config(result, &mut state.form, &mut state.status);
    }

    pub async fn edit(&self, field: ConfigField, value: impl Into<String>) {
        self.state.write().await.form.set(field, value);
    }

    /// Save the form to the selected (or manually entered) guild
    pub async fn save(&self) {
        let plan = {
            let mut guard = self.state.write().await;
            let state = &mut *guard;
            let prepared = begin_save(
                Some(state.directory.selected()),
                &state.manual_guild,
                &state.form,
                &mut state.status,
            );
            match prepared {
                Some(plan) => plan,
                None => return,
            }
        };

        let saved = post_config(&*self.transport, &plan).await;
        apply_save(saved, &plan.guild_id, &mut self.state.write().await.status);
    }

    /// OAuth entry point for a full-page navigation by the host
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    pub async fn welcome_preview(&self) -> String {
        welcome_preview(&self.state.read().await.form.welcome_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::ScriptedTransport;
    use crate::api::ApiResult;
    use crate::dashboard::status::Severity;
    use crate::models::GuildSummary;
    use reqwest::Method;
    use serde_json::json;

    fn dashboard(transport: &Arc<ScriptedTransport>) -> Dashboard<ScriptedTransport> {
        Dashboard::new(transport.clone(), &DashboardSettings::default())
    }

    async fn with_guilds(dash: &Dashboard<ScriptedTransport>, ids: &[&str]) {
        dash.state.write().await.directory.replace(ids.iter().map(|id| GuildSummary {
            id: id.to_string(),
            name: format!("Guild {}", id),
        }));
    }

    #[tokio::test]
    async fn test_init_loads_directory_and_reports_ready() {
        let transport = ScriptedTransport::new();
        transport.ok_json(Method::GET, "/api/guilds", json!([{"id": "1", "name": "Alpha"}]));
        let dash = dashboard(&transport);

        dash.navigate(Page::Roles).await;
        dash.init().await;

        let state = dash.snapshot().await;
        assert_eq!(state.navigator.current(), Page::Overview);
        assert_eq!(state.directory.guilds().len(), 1);
        assert_eq!(state.status.current().text, MSG_READY);
        assert_eq!(state.status.current().severity, Severity::Info);
    }

    #[tokio::test]
    async fn test_select_guild_loads_and_clears_manual() {
        let transport = ScriptedTransport::new();
        transport.ok_json(Method::GET, "/api/guild/1/config", json!({"prefix": "!"}));
        let dash = dashboard(&transport);
        with_guilds(&dash, &["1"]).await;

        dash.enter_manual_guild("   ").await;
        assert!(transport.calls().is_empty());

        dash.select_guild("1").await;
        let state = dash.snapshot().await;
        assert_eq!(state.directory.selected(), "1");
        assert_eq!(state.manual_guild, "");
        assert_eq!(state.form.prefix, "!");
    }

    #[tokio::test]
    async fn test_placeholder_selection_does_nothing() {
        let transport = ScriptedTransport::new();
        let dash = dashboard(&transport);

        dash.enter_manual_guild("77").await;
        dash.select_guild("").await;

        let state = dash.snapshot().await;
        assert_eq!(state.manual_guild, "77");
        assert_eq!(transport.calls().len(), 1);
        assert_eq!(transport.calls()[0].path, "/api/guild/77/config");
    }

    #[tokio::test]
    async fn test_save_prefers_selector() {
        let transport = ScriptedTransport::new();
        transport.ok_json(Method::POST, "/api/guild/123/config", json!({}));
        let dash = dashboard(&transport);

        with_guilds(&dash, &["123"]).await;
        {
            let mut state = dash.state.write().await;
            state.directory.select("123");
            state.manual_guild = "456".into();
        }
        dash.save().await;

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "/api/guild/123/config");
        assert_eq!(dash.snapshot().await.status.current().text, config::MSG_SAVED);
    }

    #[tokio::test]
    async fn test_unknown_guild_selection_ignored() {
        let transport = ScriptedTransport::new();
        let dash = dashboard(&transport);
        with_guilds(&dash, &["1"]).await;

        dash.select_guild("2").await;

        assert!(transport.calls().is_empty());
        assert_eq!(dash.snapshot().await.directory.selected(), "");
    }

    #[tokio::test]
    async fn test_reload_resets_selection_before_save() {
        let transport = ScriptedTransport::new();
        transport.ok_json(Method::GET, "/api/guilds", json!([{"id": "9"}]));
        transport.ok_json(Method::GET, "/api/guild/9/config", json!({}));
        let dash = dashboard(&transport);

        dash.reload_guilds().await;
        dash.select_guild("9").await;
        assert_eq!(dash.snapshot().await.directory.selected(), "9");

        transport.ok_json(Method::GET, "/api/guilds", json!({"oops": true}));
        dash.reload_guilds().await;
        let state = dash.snapshot().await;
        assert_eq!(state.directory.selected(), "");
        assert_eq!(state.directory.options().len(), 1);

        dash.save().await;
        assert_eq!(dash.snapshot().await.status.current().text, config::MSG_MISSING_ID);
        assert!(transport
            .calls()
            .iter()
            .all(|c| c.request.method != Method::POST));

        // the manual id is used once the selection is gone
        transport.ok_json(Method::POST, "/api/guild/456/config", json!({}));
        dash.state.write().await.manual_guild = "456".into();
        dash.save().await;
        let calls = transport.calls();
        assert_eq!(calls.last().unwrap().path, "/api/guild/456/config");
        assert_eq!(dash.snapshot().await.status.current().text, config::MSG_SAVED);
    }

    #[tokio::test]
    async fn test_load_config_with_empty_id() {
        let transport = ScriptedTransport::new();
        let dash = dashboard(&transport);

        dash.load_config("").await;

        assert!(transport.calls().is_empty());
        let state = dash.snapshot().await;
        assert_eq!(state.status.current().text, config::MSG_NO_GUILD);
        assert_eq!(state.status.current().severity, Severity::Info);
    }

    #[tokio::test]
    async fn test_save_without_any_guild() {
        let transport = ScriptedTransport::new();
        let dash = dashboard(&transport);

        dash.edit(ConfigField::Prefix, "!").await;
        dash.save().await;

        assert!(transport.calls().is_empty());
        let state = dash.snapshot().await;
        assert_eq!(state.status.current().text, config::MSG_MISSING_ID);
        assert_eq!(state.status.current().severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_stale_config_response_is_dropped() {
        let transport = ScriptedTransport::new();
        transport.ok_json(Method::GET, "/api/guild/1/config", json!({"prefix": "one"}));
        transport.ok_json(Method::GET, "/api/guild/2/config", json!({"prefix": "two"}));
        let gate = transport.gate("/api/guild/1/config");
        let dash = dashboard(&transport);
        with_guilds(&dash, &["1", "2"]).await;

        tokio::join!(dash.select_guild("1"), async {
            dash.select_guild("2").await;
            gate.notify_one();
        });

        let state = dash.snapshot().await;
        assert_eq!(state.directory.selected(), "2");
        assert_eq!(state.form.prefix, "two");
        assert_eq!(state.status.current().text, config::MSG_LOADED);
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_stale_directory_response_is_dropped() {
        let transport = ScriptedTransport::new();
        transport.route(Method::GET, "/api/guilds", ApiResult::failure("timed out"));
        let gate = transport.gate("/api/guilds");
        let dash = dashboard(&transport);

        tokio::join!(dash.reload_guilds(), async {
            transport.ungate("/api/guilds");
            transport.ok_json(Method::GET, "/api/guilds", json!([{"id": "5", "name": "Five"}]));
            dash.reload_guilds().await;
            gate.notify_one();
        });

        let state = dash.snapshot().await;
        assert_eq!(state.directory.label_for("5"), Some("Five"));
        assert_eq!(state.status.current().text, guilds::MSG_LOADED);
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_navigation_not_blocked_by_pending_load() {
        let transport = ScriptedTransport::new();
        transport.ok_json(Method::GET, "/api/guild/9/config", json!({"prefix": "late"}));
        let gate = transport.gate("/api/guild/9/config");
        let dash = dashboard(&transport);
        with_guilds(&dash, &["9"]).await;

        tokio::join!(dash.select_guild("9"), async {
            dash.navigate(Page::Tickets).await;
            let state = dash.snapshot().await;
            assert_eq!(state.navigator.current(), Page::Tickets);
            assert_eq!(state.status.current().text, config::MSG_LOADING);
            gate.notify_one();
        });

        let state = dash.snapshot().await;
        assert_eq!(state.navigator.current(), Page::Tickets);
        assert_eq!(state.form.prefix, "late");
    }

    #[tokio::test]
    async fn test_welcome_preview_and_login_url() {
        let transport = ScriptedTransport::new();
        let dash = dashboard(&transport);

        assert_eq!(
            dash.welcome_preview().await,
            "Welcome ExampleUser to ExampleServer!"
        );
        dash.edit(ConfigField::WelcomeMessage, "Yo {user}").await;
        assert_eq!(dash.welcome_preview().await, "Yo ExampleUser");
        assert_eq!(dash.login_url(), "http://127.0.0.1:3000/auth/discord");
    }
}
