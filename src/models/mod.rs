// Data models
pub mod form;
pub mod guild;

pub use form::{ConfigField, ConfigForm};
pub use guild::{GuildConfig, GuildSummary, PartialGuildConfig};
