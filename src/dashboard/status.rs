// Status line shared by every dashboard operation

use std::fmt;

use tracing::{error, info};

use crate::utils::config::colors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Ok,
    Error,
}

impl Severity {
    /// Text color for the status line; `None` keeps the default color
    pub fn color(self) -> Option<&'static str> {
        match self {
            Severity::Info => None,
            Severity::Ok => Some(colors::OK),
            Severity::Error => Some(colors::ERROR),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Ok => "ok",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity.label(), self.text)
    }
}

/// Single-slot status: each report replaces the last one
#[derive(Debug, Clone, Default)]
pub struct StatusReporter {
    current: StatusMessage,
}

impl StatusReporter {
    pub fn report(&mut self, text: impl Into<String>, severity: Severity) {
        let text = text.into();
        match severity {
            Severity::Error => error!("{}", text),
            _ => info!("{}", text),
        }
        self.current = StatusMessage { text, severity };
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.report(text, Severity::Info);
    }

    pub fn ok(&mut self, text: impl Into<String>) {
        self.report(text, Severity::Ok);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.report(text, Severity::Error);
    }

    pub fn current(&self) -> &StatusMessage {
        &self.current
    }
}
