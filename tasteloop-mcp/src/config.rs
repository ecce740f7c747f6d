//! Server configuration, read once from the environment at startup

use std::env;

pub const LOG_ENV: &str = "TASTELOOP_LOG";
pub const LOG_FORMAT_ENV: &str = "TASTELOOP_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// tracing-subscriber filter directive, e.g. "info" or "tasteloop_plugin=debug"
    pub log_filter: String,
    pub log_format: LogFormat,
    /// Format value that was set but not recognized
    pub unknown_format: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. `TASTELOOP_LOG` wins over `RUST_LOG`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_filter = lookup(LOG_ENV)
            .or_else(|| lookup("RUST_LOG"))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let (log_format, unknown_format) = match lookup(LOG_FORMAT_ENV) {
            None => (LogFormat::Text, None),
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "" | "text" => (LogFormat::Text, None),
                "json" => (LogFormat::Json, None),
                _ => (LogFormat::Text, Some(raw)),
            },
        };

        Self { log_filter, log_format, unknown_format }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
