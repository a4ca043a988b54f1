// Guild Dashboard
// Controller for a per-guild Discord bot configuration dashboard: guild
// directory, config load/save against the bot backend, and page navigation.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod utils;

pub use api::{ApiRequest, ApiResult, HttpTransport, Payload, Transport};
pub use dashboard::navigation::Page;
pub use dashboard::status::{Severity, StatusMessage};
pub use dashboard::{Dashboard, DashboardState};
pub use models::{ConfigField, ConfigForm, GuildConfig, GuildSummary, PartialGuildConfig};
pub use utils::config::DashboardSettings;
