// Config form state
// The editable form is the single place load writes to and save reads from.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownField;

use super::guild::{defaults, FieldValue, GuildConfig, PartialGuildConfig};

/// Editable form fields, named by their wire keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Prefix,
    Timezone,
    WelcomeChannel,
    WelcomeMessage,
    WelcomeImage,
    MaxWarns,
    Antispam,
    LogChannel,
    TicketCategory,
    TicketTranscript,
}

impl ConfigField {
    pub const ALL: [ConfigField; 10] = [
        ConfigField::Prefix,
        ConfigField::Timezone,
        ConfigField::WelcomeChannel,
        ConfigField::WelcomeMessage,
        ConfigField::WelcomeImage,
        ConfigField::MaxWarns,
        ConfigField::Antispam,
        ConfigField::LogChannel,
        ConfigField::TicketCategory,
        ConfigField::TicketTranscript,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ConfigField::Prefix => "prefix",
            ConfigField::Timezone => "timezone",
            ConfigField::WelcomeChannel => "welcomeChannel",
            ConfigField::WelcomeMessage => "welcomeMessage",
            ConfigField::WelcomeImage => "welcomeImage",
            ConfigField::MaxWarns => "maxWarns",
            ConfigField::Antispam => "antispam",
            ConfigField::LogChannel => "logChannel",
            ConfigField::TicketCategory => "ticketCategory",
            ConfigField::TicketTranscript => "ticketTranscript",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ConfigField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigField::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Raw form values, exactly as the controls hold them.
/// `antispam` is the two-valued selector: `"true"` or `"false"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigForm {
    pub prefix: String,
    pub timezone: String,
    pub welcome_channel: String,
    pub welcome_message: String,
    pub welcome_image: String,
    pub max_warns: String,
    pub antispam: String,
    pub log_channel: String,
    pub ticket_category: String,
    pub ticket_transcript: String,
}

impl Default for ConfigForm {
    fn default() -> Self {
        Self::from_partial(&PartialGuildConfig::default())
    }
}

fn text_or(value: &Option<FieldValue>, default: &str) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| default.to_string())
}

impl ConfigForm {
    /// Build form values from a load response, filling defaults
    pub fn from_partial(partial: &PartialGuildConfig) -> Self {
        Self {
            prefix: text_or(&partial.prefix, defaults::TEXT),
            timezone: text_or(&partial.timezone, defaults::TEXT),
            welcome_channel: text_or(&partial.welcome_channel, defaults::TEXT),
            welcome_message: text_or(&partial.welcome_message, defaults::TEXT),
            welcome_image: text_or(&partial.welcome_image, defaults::TEXT),
            max_warns: text_or(&partial.max_warns, defaults::MAX_WARNS_FIELD),
            antispam: text_or(&partial.antispam, &defaults::ANTISPAM.to_string()),
            log_channel: text_or(&partial.log_channel, defaults::TEXT),
            ticket_category: text_or(&partial.ticket_category, defaults::TEXT),
            ticket_transcript: text_or(&partial.ticket_transcript, defaults::TEXT),
        }
    }

    /// Overwrite every field from a load response
    pub fn fill(&mut self, partial: &PartialGuildConfig) {
        *self = Self::from_partial(partial);
    }

    /// Read the form back into the wire config
    pub fn to_config(&self) -> GuildConfig {
        GuildConfig {
            prefix: self.prefix.trim().to_string(),
            timezone: self.timezone.trim().to_string(),
            welcome_channel: self.welcome_channel.trim().to_string(),
            welcome_message: self.welcome_message.trim().to_string(),
            welcome_image: self.welcome_image.trim().to_string(),
            max_warns: parse_max_warns(&self.max_warns),
            antispam: self.antispam == "true",
            log_channel: self.log_channel.trim().to_string(),
            ticket_category: self.ticket_category.trim().to_string(),
            ticket_transcript: self.ticket_transcript.trim().to_string(),
        }
    }

    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::Prefix => &self.prefix,
            ConfigField::Timezone => &self.timezone,
            ConfigField::WelcomeChannel => &self.welcome_channel,
            ConfigField::WelcomeMessage => &self.welcome_message,
            ConfigField::WelcomeImage => &self.welcome_image,
            ConfigField::MaxWarns => &self.max_warns,
            ConfigField::Antispam => &self.antispam,
            ConfigField::LogChannel => &self.log_channel,
            ConfigField::TicketCategory => &self.ticket_category,
            ConfigField::TicketTranscript => &self.ticket_transcript,
        }
    }

    pub fn set(&mut self, field: ConfigField, value: impl Into<String>) {
        let slot = match field {
            ConfigField::Prefix => &mut self.prefix,
            ConfigField::Timezone => &mut self.timezone,
            ConfigField::WelcomeChannel => &mut self.welcome_channel,
            ConfigField::WelcomeMessage => &mut self.welcome_message,
            ConfigField::WelcomeImage => &mut self.welcome_image,
            ConfigField::MaxWarns => &mut self.max_warns,
            ConfigField::Antispam => &mut self.antispam,
            ConfigField::LogChannel => &mut self.log_channel,
            ConfigField::TicketCategory => &mut self.ticket_category,
            ConfigField::TicketTranscript => &mut self.ticket_transcript,
        };
        *slot = value.into();
    }
}

/// Integer value of the warn limit, falling back on empty or bad input
pub fn parse_max_warns(raw: &str) -> i64 {
    raw.trim()
        .parse::<i64>()
        .unwrap_or(defaults::MAX_WARNS_FALLBACK)
}
