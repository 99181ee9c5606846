//! Runtime configuration loaded from the process environment.

use std::env;

/// Default broadcast buffer per push topic.
pub const DEFAULT_PUSH_BUFFER: usize = 256;

/// Default lifetime of issued session tokens, in days.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// Default look-ahead window for deadline reminders, in days.
pub const DEFAULT_REMINDER_WINDOW_DAYS: i64 = 2;

const DEVELOPMENT_SECRET: &str = "development-secret-change-in-production";

/// Top-level configuration for wiring the tasklane services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasklaneConfig {
    /// Secret used to sign session tokens.
    pub jwt_secret: String,
    /// Lifetime of issued session tokens, in days.
    pub token_ttl_days: i64,
    /// Sender address for notification emails; `None` disables email.
    pub email_from: Option<String>,
    /// Broadcast buffer size per real-time push topic.
    pub push_buffer: usize,
    /// How many days ahead deadline reminders look.
    pub reminder_window_days: i64,
}

impl Default for TasklaneConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEVELOPMENT_SECRET.to_owned(),
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            email_from: None,
            push_buffer: DEFAULT_PUSH_BUFFER,
            reminder_window_days: DEFAULT_REMINDER_WINDOW_DAYS,
        }
    }
}

impl TasklaneConfig {
    /// Loads configuration from `TASKLANE_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Missing or unparseable values fall back to their defaults. Blank
    /// strings count as missing.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        Self {
            jwt_secret: read("TASKLANE_JWT_SECRET").unwrap_or(defaults.jwt_secret),
            token_ttl_days: read("TASKLANE_TOKEN_TTL_DAYS")
                .and_then(|v| v.parse().ok())
                .filter(|days: &i64| *days > 0)
                .unwrap_or(defaults.token_ttl_days),
            email_from: read("TASKLANE_EMAIL_FROM"),
            push_buffer: read("TASKLANE_PUSH_BUFFER")
                .and_then(|v| v.parse().ok())
                .filter(|size: &usize| *size > 0)
                .unwrap_or(defaults.push_buffer),
            reminder_window_days: read("TASKLANE_REMINDER_WINDOW_DAYS")
                .and_then(|v| v.parse().ok())
                .filter(|days: &i64| *days >= 0)
                .unwrap_or(defaults.reminder_window_days),
        }
    }

    /// Returns `true` when notification emails should be sent.
    #[must_use]
    pub const fn email_enabled(&self) -> bool {
        self.email_from.is_some()
    }
}
