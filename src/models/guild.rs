use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::Payload;

use super::form::ConfigForm;

/// Defaults applied when a field is missing from a load response
pub mod defaults {
    /// Every text field
    pub const TEXT: &str = "";
    /// `maxWarns` stays unset in the form
    pub const MAX_WARNS_FIELD: &str = "";
    /// `maxWarns` sent when the form value is empty or not an integer
    pub const MAX_WARNS_FALLBACK: i64 = 0;
    pub const ANTISPAM: bool = true;
}

/// Guild entry from the directory endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuildSummary {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
struct RawGuild {
    id: Option<FieldValue>,
    name: Option<FieldValue>,
}

impl GuildSummary {
    /// Read one directory entry; ids may arrive as numbers.
    /// Entries without an id yield `None`, a missing name falls back to the id.
    pub fn from_value(value: &Value) -> Option<Self> {
        let raw: RawGuild = serde_json::from_value(value.clone()).ok()?;
        let id = raw.id.map(|v| v.to_string()).filter(|id| !id.is_empty())?;
        let name = raw
            .name
            .map(|v| v.to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| id.clone());
        Some(Self { id, name })
    }
}

/// Guild configuration as sent to the backend
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GuildConfig {
    pub prefix: String,
    pub timezone: String,
    pub welcome_channel: String,
    pub welcome_message: String,
    pub welcome_image: String,
    pub max_warns: i64,
    pub antispam: bool,
    pub log_channel: String,
    pub ticket_category: String,
    pub ticket_transcript: String,
}

/// Any JSON scalar a loosely-typed backend may put in a config field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(Value),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// Config as loaded: any field may be missing (or null)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialGuildConfig {
    pub prefix: Option<FieldValue>,
    pub timezone: Option<FieldValue>,
    pub welcome_channel: Option<FieldValue>,
    pub welcome_message: Option<FieldValue>,
    pub welcome_image: Option<FieldValue>,
    pub max_warns: Option<FieldValue>,
    pub antispam: Option<FieldValue>,
    pub log_channel: Option<FieldValue>,
    pub ticket_category: Option<FieldValue>,
    pub ticket_transcript: Option<FieldValue>,
}

impl PartialGuildConfig {
    /// Read a load response. Anything but a JSON object counts as empty.
    pub fn from_payload(payload: Option<&Payload>) -> Self {
        match payload.and_then(Payload::as_json) {
            Some(value @ Value::Object(_)) => {
                serde_json::from_value(value.clone()).unwrap_or_default()
            }
            _ => Self::default(),
        }
    }

    /// Apply the default table and the save rules in one step.
    /// Goes through the form so load and save cannot disagree.
    pub fn normalize(&self) -> GuildConfig {
        ConfigForm::from_partial(self).to_config()
    }
}
